use regex::Regex;
use std::sync::LazyLock;

/// Matches the first line of a message: `type(scope)!: description`.
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<type>[a-z]+)(?:\((?P<scope>[a-z0-9/-]+)\))?(?P<breaking>!)?:(?: (?P<description>.*))?$",
    )
    .expect("Invalid commit header regex")
});

/// Matches one git trailer line: `Token: value`, `Token #value` or `BREAKING CHANGE: value`.
static TRAILER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<token>BREAKING[ -]CHANGE|[A-Za-z][A-Za-z0-9-]*)(?:: | #)(?P<value>.*)$")
        .expect("Invalid trailer regex")
});

pub const BREAKING_CHANGE_TOKENS: [&str; 2] = ["BREAKING CHANGE", "BREAKING-CHANGE"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub token: String,
    pub value: String,
}

/// A message split along the Conventional Commits grammar.
///
/// Building one only checks the shape of the header; which types are allowed
/// is decided by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalCommit {
    pub commit_type: String,
    pub scope: Option<String>,
    pub breaking: bool,
    pub description: String,
    pub body: Option<String>,
    pub footers: Vec<Footer>,
}

impl ConventionalCommit {
    /// `None` when the first line is not a `type(scope)!: description` header.
    pub fn try_parse(message: &str) -> Option<Self> {
        let message = message.trim();
        let (header, rest) = message.split_once('\n').unwrap_or((message, ""));
        let caps = HEADER_REGEX.captures(header.trim_end())?;

        let mut paragraphs = paragraphs(rest);
        let footers = match paragraphs.last() {
            Some(last) if is_footer_block(last) => {
                let block = paragraphs.pop().unwrap_or_default();
                parse_footers(&block)
            }
            _ => Vec::new(),
        };
        let body = (!paragraphs.is_empty()).then(|| paragraphs.join("\n\n"));

        let breaking = caps.name("breaking").is_some()
            || footers
                .iter()
                .any(|footer| BREAKING_CHANGE_TOKENS.contains(&footer.token.as_str()));

        Some(ConventionalCommit {
            commit_type: caps["type"].to_string(),
            scope: caps.name("scope").map(|scope| scope.as_str().to_string()),
            breaking,
            description: caps
                .name("description")
                .map_or("", |description| description.as_str().trim())
                .to_string(),
            body,
            footers,
        })
    }
}

fn paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}

fn is_footer_block(paragraph: &str) -> bool {
    paragraph.lines().all(|line| TRAILER_REGEX.is_match(line))
}

fn parse_footers(block: &str) -> Vec<Footer> {
    block
        .lines()
        .filter_map(|line| TRAILER_REGEX.captures(line))
        .map(|caps| Footer {
            token: caps["token"].to_string(),
            value: caps["value"].trim().to_string(),
        })
        .collect()
}
