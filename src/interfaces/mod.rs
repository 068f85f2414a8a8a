//! User interfaces besides HTTP

pub mod cli;
