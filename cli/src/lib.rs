//! Host adapter for `playground-core`.
//!
//! The core builds requests and interprets responses; this crate performs
//! the round-trips with reqwest and exposes the playground and uploader as
//! `playground` subcommands.

pub mod commands;
pub mod config;
pub mod files;
pub mod transport;

pub use commands::Session;
pub use transport::Transport;
