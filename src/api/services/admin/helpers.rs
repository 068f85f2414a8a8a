//! Admin API 帮助函数

use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::{debug, error};

use crate::errors::LinkShortenerError;

use super::types::{ApiResponse, Empty};

/// 构建 JSON 信封响应
pub fn envelope<T: Serialize>(status: StatusCode, data: T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse::new(status, data))
}

/// 仅包含 code / message 的响应
pub fn status_response(status: StatusCode) -> HttpResponse {
    envelope(status, Empty {})
}

/// 错误映射为信封响应，细节只进日志
///
/// 5xx responses never say which layer failed.
pub fn error_response(context: &str, err: &LinkShortenerError) -> HttpResponse {
    let status = err.http_status();
    if status.is_server_error() {
        error!("{}: {}", context, err.format_simple());
    } else {
        debug!("{}: {}", context, err.format_simple());
    }
    status_response(status)
}

/// 400：请求体缺少必填字段
pub fn invalid_request(context: &str, problem: &str) -> HttpResponse {
    error_response(context, &LinkShortenerError::validation(problem))
}

/// 404：链接不存在
pub fn link_not_found(context: &str, name: &str) -> HttpResponse {
    error_response(context, &LinkShortenerError::not_found(format!("link '{}'", name)))
}

/// Fallback for every unmatched route.
pub async fn not_found() -> HttpResponse {
    status_response(StatusCode::NOT_FOUND)
}

/// JSON 提取器配置：解析失败返回 400 信封
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            debug!("Rejected request body: {}", err);
            InternalError::from_response(err, status_response(StatusCode::BAD_REQUEST)).into()
        })
}
