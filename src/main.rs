use brainarena::config::{ServeArgs, ServerConfig, DEFAULT_API_URL};
use brainarena::libarena::locale::Language;
use brainarena::libarena::service::ServiceError;
use brainarena::libarena::session::TOTAL_QUESTIONS;
use brainarena::server::{start_server, ServerError};
use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "Brain Arena")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
    /// Defaults to `info` when serving and `error` when playing.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the question bank over HTTP.
    Serve(ServeArgs),
    /// Play a run in the terminal.
    Play(PlayArgs),
}

#[derive(clap::Args, Debug)]
struct PlayArgs {
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Play against a local question bank instead of the question service.
    #[arg(long, value_name = "FILE")]
    offline: Option<PathBuf>,
    #[arg(long, env = "BRAINARENA_LANG", default_value = "it")]
    language: Language,
    #[arg(short, long, default_value_t = TOTAL_QUESTIONS)]
    question_count: u32,
}

#[derive(Debug, Error)]
enum Error {
    #[error(transparent)]
    Server(#[from] ServerError),
    #[error("cannot open question bank: {0}")]
    Bank(#[from] ServiceError),
    #[allow(dead_code)]
    #[error("this build has no terminal player (enable the `cli` feature)")]
    NoCli,
}

cfg_if::cfg_if! {
    if #[cfg(feature = "cli")] {
        use brainarena::cli::cli_loop;
        use brainarena::client::HttpQuizApi;
        use brainarena::libarena::db;
        use brainarena::libarena::locale::Localization;
        use brainarena::libarena::play::QuizController;
        use brainarena::libarena::service::QuestionService;
        use brainarena::libarena::session::GameSession;
        use log::{debug, warn};

        async fn play(args: PlayArgs) -> Result<(), Error> {
            let mut locale = Localization::new(args.language);
            let mut controller = QuizController::new(GameSession::with_total(args.question_count));

            match args.offline {
                Some(db_path) => {
                    let conn = db::create_or_open(&db_path).map_err(ServiceError::from)?;
                    debug!("[DB] Database Connection Successful!");
                    let bank = QuestionService::new(conn);
                    if bank.find_all()?.is_empty() {
                        warn!("[Setup] No questions found.");
                        println!(
                            "{}",
                            "No questions found. Come back when you have added some to the database!"
                                .yellow()
                        );
                        return Ok(bank.close()?);
                    }
                    cli_loop(&bank, &mut controller, &mut locale).await;
                    bank.close()?;
                }
                None => {
                    let api = HttpQuizApi::new(&args.api_url);
                    debug!("[Setup] Using question service at {}", api.base_url());
                    cli_loop(&api, &mut controller, &mut locale).await;
                }
            }
            Ok(())
        }
    } else {
        async fn play(_args: PlayArgs) -> Result<(), Error> {
            Err(Error::NoCli)
        }
    }
}

async fn run(command: Commands) -> Result<(), Error> {
    match command {
        Commands::Serve(serve_args) => Ok(start_server(ServerConfig::from(serve_args)).await?),
        Commands::Play(play_args) => play(play_args).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let default_level = match args.command {
        Commands::Serve(_) => "info",
        Commands::Play(_) => "error",
    };
    let log_level = args.log_level.unwrap_or_else(|| default_level.to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match run(args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("{}", err.to_string().bright_red());
            ExitCode::FAILURE
        }
    }
}
