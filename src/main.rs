use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use gw::areas::repository::Repository;
use gw::artifacts::core::PagerWriter;
use gw::config::{DEFAULT_CONTEXT_LINES, DEFAULT_STATE_DIR, WorkflowConfig};
use gw::logging::setup_logger;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gw",
    version = "0.1.0",
    about = "A structured git-commit workflow",
    long_about = "Keeps a draft commit message next to a summary of the pending changes, \
    lets you review the diff hunk by hunk and commits with a validated \
    Conventional Commits message.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        help = "Increase log verbosity (-v info, -vv debug, -vvv trace)"
    )]
    verbose: u8,
    #[arg(
        long,
        global = true,
        env = "GW_STATE_DIR",
        default_value = DEFAULT_STATE_DIR,
        help = "Directory holding the pending document, relative to the repository root"
    )]
    state_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "prepare",
        about = "Write the pending document for the current changes",
        long_about = "This command collects the pending changes and rewrites the pending document. \
        The existing draft message is kept unless a new one is given."
    )]
    Prepare {
        #[arg(index = 1, help = "Draft commit message to store")]
        message: Option<String>,
    },
    #[command(
        name = "review",
        about = "Review the draft message and step through the changes",
        long_about = "This command refreshes the pending document, shows whether the draft message is valid \
        and then walks the changed files hunk by hunk."
    )]
    Review {
        #[arg(long, help = "Only review files with staged changes")]
        staged: bool,
        #[arg(long, help = "Print every hunk instead of navigating interactively")]
        print: bool,
        #[arg(short, long, help = "Echo every key pressed during navigation")]
        keylog: bool,
        #[arg(
            long,
            env = "GW_CONTEXT",
            default_value_t = DEFAULT_CONTEXT_LINES,
            help = "Lines of context around each change"
        )]
        context: usize,
    },
    #[command(
        name = "message",
        about = "Show or set the draft commit message",
        long_about = "Without an argument this command prints the current draft message. \
        With an argument it validates the message and stores it in the pending document."
    )]
    Message {
        #[arg(index = 1, help = "The new commit message")]
        message: Option<String>,
        #[arg(short, long, help = "Keep an invalid message without asking")]
        yes: bool,
    },
    #[command(
        name = "commit",
        about = "Commit the staged changes with the draft or given message",
        long_about = "This command validates the commit message, commits the index \
        and removes the pending document."
    )]
    Commit {
        #[arg(long, help = "Amend the previous commit")]
        amend: bool,
        #[arg(short, long, help = "Commit without asking for confirmation")]
        yes: bool,
        #[arg(index = 1, help = "The commit message, defaults to the draft message")]
        message: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logger(cli.verbose);

    let config = WorkflowConfig::default().with_state_dir(&cli.state_dir);
    let pwd = std::env::current_dir()?;

    match &cli.command {
        Commands::Prepare { message } => {
            let repository = open(&pwd, config, Box::new(std::io::stdout()))?;
            repository.prepare(message.as_deref())?
        }
        Commands::Review {
            staged,
            print,
            keylog,
            context,
        } => {
            let config = config.with_context_lines(*context);

            if *print && std::io::stdout().is_terminal() {
                let pager = Pager::new();
                let repository = open(&pwd, config, Box::new(PagerWriter::new(pager.clone())))?;

                repository.review(*staged, true, *keylog)?;
                minus::page_all(pager)?;
            } else {
                let repository = open(&pwd, config, Box::new(std::io::stdout()))?;
                repository.review(*staged, *print, *keylog)?;
            }
        }
        Commands::Message { message, yes } => {
            let repository = open(&pwd, config, Box::new(std::io::stdout()))?;
            repository.message(message.as_deref(), *yes)?
        }
        Commands::Commit {
            amend,
            yes,
            message,
        } => {
            let repository = open(&pwd, config, Box::new(std::io::stdout()))?;
            repository.commit(message.as_deref(), *amend, *yes)?
        }
    }

    Ok(())
}

fn open(
    pwd: &std::path::Path,
    config: WorkflowConfig,
    writer: Box<dyn Write>,
) -> Result<Repository> {
    Repository::discover(pwd, config, writer, Box::new(std::io::stdin().lock()))
}
