use crate::demo::{run_demo, DemoArgs};
use crate::quiz::{run_catalog_validate, run_quiz, run_score, CatalogValidateArgs, QuizArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use daat_compass::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Daat Compass",
    about = "Run the political compass questionnaire as an HTTP service or in the terminal",
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
    /// Answer the questionnaire interactively and print the result
    Quiz(QuizArgs),
    /// Score a JSON answer file without saving or reporting anything
    Score(ScoreArgs),
    /// Inspect question catalogs
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Run scripted personas through the full scoring and analysis pipeline
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Load a catalog file and summarize its axes
    Validate(CatalogValidateArgs),
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
        Command::Quiz(args) => run_quiz(args).await,
        Command::Score(args) => run_score(args),
        Command::Catalog {
            command: CatalogCommand::Validate(args),
        } => run_catalog_validate(args),
        Command::Demo(args) => run_demo(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_line_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["daat-compass-api", "quiz", "--name", "Dana"])
            .expect("quiz parses");
        assert!(matches!(
            cli.command,
            Some(Command::Quiz(QuizArgs { name: Some(ref name), email: None })) if name == "Dana"
        ));

        let cli = Cli::try_parse_from(["daat-compass-api", "catalog", "validate", "q.csv"])
            .expect("catalog parses");
        assert!(matches!(
            cli.command,
            Some(Command::Catalog {
                command: CatalogCommand::Validate(_)
            })
        ));

        assert!(Cli::try_parse_from(["daat-compass-api", "quiz", "--email", "a@b.c"]).is_err());
        assert!(Cli::try_parse_from(["daat-compass-api"])
            .expect("bare invocation parses")
            .command
            .is_none());
    }
}
