//! Admin API 类型定义

use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::storage::LinkRecord;

/// 统一响应信封：`{code, message, ...data}`
///
/// `message` is the canonical reason phrase of `code`, and the fields of
/// `data` are merged into the top-level object.
#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            code: status.as_u16(),
            message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            data,
        }
    }
}

/// Envelope with no extra fields.
#[derive(Serialize, Debug, Default)]
pub struct Empty {}

#[derive(Serialize, Debug)]
pub struct LinkBody {
    pub link: LinkRecord,
}

#[derive(Serialize, Debug)]
pub struct LinksBody {
    pub links: BTreeMap<String, LinkRecord>,
}

/// `POST` / `DELETE` request body
#[derive(Deserialize, Debug)]
pub struct NameRequest {
    pub name: Option<String>,
}

/// `PUT` / `PATCH` request body; `link` is accepted for `target`
#[derive(Deserialize, Debug)]
pub struct LinkRequest {
    pub name: Option<String>,
    #[serde(alias = "link")]
    pub target: Option<String>,
}

/// Treat missing and empty strings alike.
pub(crate) fn required(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
