pub mod db;
pub mod locale;
pub mod play;
pub mod question;
pub mod seed;
pub mod service;
pub mod session;
