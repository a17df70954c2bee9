use clap::Args;
use log::{info, warn};
use std::path::PathBuf;

pub const DEFAULT_DB: &str = "questions.db";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:4000";
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    #[arg(short, long, value_name = "FILE", env = "DATABASE_PATH", default_value = DEFAULT_DB)]
    pub db: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub db: DbArgs,
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Comma separated; `*` allows every origin.
    #[arg(long, env = "ALLOWED_ORIGINS", default_value = DEFAULT_ALLOWED_ORIGINS)]
    pub allowed_origins: String,
    /// Fill an empty question bank with the built-in questions on startup.
    #[arg(long, default_value = "false")]
    pub seed: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub db_path: PathBuf,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub seed_if_empty: bool,
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        let allowed_origins = parse_origins(&args.allowed_origins);
        if allowed_origins.is_empty() {
            warn!("[Config] No allowed origins configured, only localhost will pass CORS");
        }
        info!(
            "[Config] Database at {:?}, port {}, origins {:?}",
            args.db.db, args.port, allowed_origins
        );
        Self {
            db_path: args.db.db,
            port: args.port,
            allowed_origins,
            seed_if_empty: args.seed,
        }
    }
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

/// Localhost on any port is always let through, whatever the configured list says.
pub fn is_origin_allowed(origin: &str, allowed: &[String]) -> bool {
    is_localhost(origin) || allowed.iter().any(|a| a == "*" || a == origin)
}

fn is_localhost(origin: &str) -> bool {
    let lower = origin.to_ascii_lowercase();
    let Some(rest) = lower
        .strip_prefix("http://")
        .or_else(|| lower.strip_prefix("https://"))
    else {
        return false;
    };
    let Some(port) = rest.strip_prefix("localhost") else {
        return false;
    };
    match port.strip_prefix(':') {
        None => port.is_empty(),
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_split_and_trimmed() {
        assert_eq!(
            parse_origins(" https://quiz.example , http://localhost:4000,,"),
            vec!["https://quiz.example", "http://localhost:4000"]
        );
    }

    #[test]
    fn localhost_always_passes() {
        let allowed = parse_origins("https://quiz.example");
        assert!(is_origin_allowed("http://localhost", &allowed));
        assert!(is_origin_allowed("HTTPS://LOCALHOST:5173", &allowed));
        assert!(!is_origin_allowed("http://localhost:", &allowed));
        assert!(!is_origin_allowed("http://localhost.evil.com", &allowed));
        assert!(!is_origin_allowed("http://localhost:80a", &allowed));
    }

    #[test]
    fn configured_and_wildcard_origins() {
        let allowed = parse_origins("https://quiz.example");
        assert!(is_origin_allowed("https://quiz.example", &allowed));
        assert!(!is_origin_allowed("https://other.example", &allowed));
        assert!(is_origin_allowed("https://other.example", &parse_origins("*")));
    }
}
