//! Admin API 服务模块
//!
//! Link management under `/api`, guarded by HTTP Basic authentication.

mod helpers;
mod link_crud;
pub mod routes;
mod types;

pub use types::*;

pub use helpers::{
    envelope, error_response, invalid_request, json_config, link_not_found, not_found,
    status_response,
};

pub use link_crud::{create_link, delete_link, get_link, list_links, update_link};
