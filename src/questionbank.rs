use brainarena::libarena::db;
use brainarena::libarena::question::NewQuestion;
use brainarena::libarena::seed::seed_questions;
use brainarena::libarena::service::QuestionService;
use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::exit;

#[derive(Parser, Debug)]
#[command(name = "Question Bank")]
#[command(version, about = "Seed, import and export the Brain Arena question bank", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, default_value = "info")]
    log_level: String,
    #[arg(short, long, value_name = "FILE", env = "DATABASE_PATH", default_value = "questions.db")]
    db: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Insert the built-in questions.
    Seed,
    /// Insert every question from a JSON file.
    Import { json: PathBuf },
    /// Write every stored question, answers included, to a JSON file.
    Export { json: PathBuf },
}

#[derive(Serialize, Deserialize, Debug)]
struct QuestionBankJson {
    questions: Vec<NewQuestion>,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level)).init();

    info!("{}", format!("Database at {:?}", args.db).cyan());
    let conn = match db::create_or_open(&args.db) {
        Ok(c) => c,
        Err(e) => {
            error!("{}{}", "Unable to open Database: ".red(), e);
            exit(1);
        }
    };
    let bank = QuestionService::new(conn);

    let status = match args.command {
        Commands::Seed => {
            let inserted = seed_questions(&bank);
            info!("{}", format!("Seeded {} questions", inserted).blue());
            0
        }
        Commands::Import { json } => import(&bank, json),
        Commands::Export { json } => export(&bank, json),
    };

    if let Err(e) = bank.close() {
        error!("{}{}", "Unable to close Database: ".red(), e);
        exit(1);
    }
    exit(status)
}

fn import(bank: &QuestionService, json_file: PathBuf) -> i32 {
    let json = match std::fs::read_to_string(&json_file) {
        Ok(json) => json,
        Err(e) => {
            error!("{}", format!("Cannot read {:?}: {}!", json_file, e).red());
            return 1;
        }
    };
    let content: QuestionBankJson = match serde_json::from_str(json.as_str()) {
        Ok(c) => c,
        Err(error) => {
            error!("{}", format!("Malformed JSON: {}!", error).red());
            return 1;
        }
    };

    info!(
        "{}",
        format!("Importing data... ({} Questions)", content.questions.len()).blue()
    );
    let mut failed = 0;
    for question in content.questions {
        let text = question.text.clone();
        match bank.create(question) {
            Ok(stored) => info!("{}", format!("├ Question {}: {}", stored.id, text).green()),
            Err(e) => {
                failed += 1;
                error!(
                    "{}",
                    format!("├ ✘ Question: {} ({})", text, e)
                        .red()
                        .strikethrough()
                );
            }
        }
    }

    if failed > 0 {
        error!("{}", format!("{} questions were rejected", failed).red());
        1
    } else {
        0
    }
}

fn export(bank: &QuestionService, json_file: PathBuf) -> i32 {
    let questions = match bank.all_questions() {
        Ok(questions) => questions,
        Err(e) => {
            error!("{}", format!("Cannot read questions: {}!", e).red());
            return 1;
        }
    };
    let content = QuestionBankJson {
        questions: questions.iter().map(NewQuestion::from).collect(),
    };
    let json = match serde_json::to_string_pretty(&content) {
        Ok(json) => json,
        Err(e) => {
            error!("{}", format!("Cannot encode questions: {}!", e).red());
            return 1;
        }
    };
    if let Err(e) = std::fs::write(&json_file, json) {
        error!("{}", format!("Cannot write {:?}: {}!", json_file, e).red());
        return 1;
    }
    info!(
        "{}",
        format!("Exported {} questions to {:?}", content.questions.len(), json_file).blue()
    );
    0
}
