//! Brain Arena: a ten-question trivia run.
//!
//! The question bank lives in SQLite and is served over HTTP by [`server`].
//! Players go through [`libarena::play::QuizController`], either over HTTP
//! ([`client::HttpQuizApi`]) or straight against a local bank.
pub mod client;
pub mod config;
pub mod error;
pub mod libarena;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(feature = "cli")]
pub mod cli;
