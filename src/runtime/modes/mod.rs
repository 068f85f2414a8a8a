//! Mode routing
//!
//! The binary serves HTTP when started without a subcommand (or with
//! `serve`); every other subcommand runs once against storage and exits.

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;
