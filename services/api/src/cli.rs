use crate::commands::{run_draft_reset, run_draft_show, run_score, DraftArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hdi90::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "HDI90 Assessment Service",
    about = "Score HDI 2.0 self-assessments and serve the assessment API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score an assessment JSON file (use `-` for stdin)
    Score(ScoreArgs),
    /// Inspect or clear the persisted wizard draft
    Draft {
        #[command(subcommand)]
        command: DraftCommand,
    },
}

#[derive(Subcommand, Debug)]
enum DraftCommand {
    /// Print the stored draft with its current scores
    Show(DraftArgs),
    /// Delete the stored draft
    Reset(DraftArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Draft {
            command: DraftCommand::Show(args),
        } => run_draft_show(args),
        Command::Draft {
            command: DraftCommand::Reset(args),
        } => run_draft_reset(args),
    }
}
