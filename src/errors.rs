use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum LinkShortenerError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Serialization(String),
    Validation(String),
    NotFound(String),
    PasswordHash(String),
}

impl LinkShortenerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkShortenerError::DatabaseConfig(_) => "E001",
            LinkShortenerError::DatabaseConnection(_) => "E002",
            LinkShortenerError::DatabaseOperation(_) => "E003",
            LinkShortenerError::Serialization(_) => "E004",
            LinkShortenerError::Validation(_) => "E005",
            LinkShortenerError::NotFound(_) => "E006",
            LinkShortenerError::PasswordHash(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkShortenerError::DatabaseConfig(_) => "Database Configuration Error",
            LinkShortenerError::DatabaseConnection(_) => "Database Connection Error",
            LinkShortenerError::DatabaseOperation(_) => "Database Operation Error",
            LinkShortenerError::Serialization(_) => "Serialization Error",
            LinkShortenerError::Validation(_) => "Validation Error",
            LinkShortenerError::NotFound(_) => "Resource Not Found",
            LinkShortenerError::PasswordHash(_) => "Password Hash Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkShortenerError::DatabaseConfig(msg) => msg,
            LinkShortenerError::DatabaseConnection(msg) => msg,
            LinkShortenerError::DatabaseOperation(msg) => msg,
            LinkShortenerError::Serialization(msg) => msg,
            LinkShortenerError::Validation(msg) => msg,
            LinkShortenerError::NotFound(msg) => msg,
            LinkShortenerError::PasswordHash(msg) => msg,
        }
    }

    /// HTTP status a handler should answer with when this error escapes.
    ///
    /// Storage-side failures are all 500; the API never exposes which layer failed.
    pub fn http_status(&self) -> StatusCode {
        match self {
            LinkShortenerError::Validation(_) => StatusCode::BAD_REQUEST,
            LinkShortenerError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkShortenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkShortenerError {}

// 便捷的构造函数
impl LinkShortenerError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinkShortenerError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinkShortenerError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LinkShortenerError::DatabaseOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkShortenerError::Serialization(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkShortenerError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkShortenerError::NotFound(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        LinkShortenerError::PasswordHash(msg.into())
    }
}

impl From<sea_orm::DbErr> for LinkShortenerError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinkShortenerError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LinkShortenerError {
    fn from(err: std::io::Error) -> Self {
        LinkShortenerError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinkShortenerError {
    fn from(err: serde_json::Error) -> Self {
        LinkShortenerError::Serialization(err.to_string())
    }
}

impl From<crate::utils::password::PasswordError> for LinkShortenerError {
    fn from(err: crate::utils::password::PasswordError) -> Self {
        LinkShortenerError::password_hash(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkShortenerError>;
