//! link-shortener - a small URL shortener
//!
//! Short names map to target URLs. `GET /{name}` answers with a permanent
//! redirect and counts the hit; `/api/links` manages the mapping behind
//! HTTP Basic authentication.
//!
//! # Architecture
//! - `storage`: key-value substrate (SeaORM table or in-memory map)
//! - `services`: link registry and user accounts
//! - `api`: HTTP handlers and middleware
//! - `interfaces`: offline CLI commands
//! - `config`: TOML + environment configuration
//! - `runtime`: startup, shutdown and execution modes
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
