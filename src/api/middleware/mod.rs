pub mod access_log;
pub mod auth;
pub mod headers;

pub use access_log::AccessLog;
pub use auth::BasicAuth;
pub use headers::security_headers;
