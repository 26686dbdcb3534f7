use crate::artifacts::message::conventional::ConventionalCommit;
use thiserror::Error;

pub const ALLOWED_TYPES: phf::OrderedSet<&'static str> = phf::phf_ordered_set! {
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
};

const FORMAT_EXAMPLE: &str = "Use the Conventional Commits format:

<type>(<scope>): <description>

[optional body]

[optional footer(s)]";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("commit message is empty")]
    Empty,
    #[error("commit message header does not follow `type(scope): description`")]
    Unparseable,
    #[error("commit type `{0}` is not allowed")]
    DisallowedType(String),
    #[error("commit message has no description after the type")]
    EmptyDescription,
}

impl ValidationError {
    /// Fixed guidance shown next to the error.
    pub fn hint(&self) -> String {
        match self {
            ValidationError::Empty | ValidationError::Unparseable => FORMAT_EXAMPLE.to_string(),
            ValidationError::DisallowedType(_) => format!(
                "Allowed types: {}",
                ALLOWED_TYPES.iter().copied().collect::<Vec<_>>().join(", ")
            ),
            ValidationError::EmptyDescription => {
                "Add a short description after the colon, e.g. `feat: add login`".to_string()
            }
        }
    }
}

pub fn validate(message: &str) -> Result<ConventionalCommit, ValidationError> {
    if message.trim().is_empty() {
        return Err(ValidationError::Empty);
    }

    let commit = ConventionalCommit::try_parse(message).ok_or(ValidationError::Unparseable)?;

    if !ALLOWED_TYPES.contains(commit.commit_type.as_str()) {
        return Err(ValidationError::DisallowedType(commit.commit_type));
    }
    if commit.description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }

    Ok(commit)
}

pub fn is_valid(message: &str) -> bool {
    validate(message).is_ok()
}

/// Type of a well-formed header, whether or not the type is allowed.
pub fn commit_type(message: &str) -> Option<String> {
    ConventionalCommit::try_parse(message).map(|commit| commit.commit_type)
}
