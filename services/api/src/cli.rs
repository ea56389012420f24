use crate::evaluate::{run_evaluate, run_reference, EvaluateArgs, ReferenceCommand};
use crate::server;
use clap::{Args, Parser, Subcommand};
use transfer_verifier::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Transfer Verifier",
    about = "Check community-college transcripts against transfer requirements",
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
    /// Evaluate a transcript CSV without starting the server
    Evaluate(EvaluateArgs),
    /// Inspect the loaded reference data
    Reference {
        #[command(subcommand)]
        command: ReferenceCommand,
    },
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
        Command::Evaluate(args) => run_evaluate(args),
        Command::Reference { command } => run_reference(command),
    }
}
