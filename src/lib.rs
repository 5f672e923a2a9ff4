//! Library crate for breach-check-rs exposing reusable modules.
pub mod checker;
pub mod config;
pub mod error;
pub mod notifier;
pub mod passwords;
pub mod server;
pub mod types;
pub mod wordlist;
