//! Admin API 链接 CRUD 操作
//!
//! Every verb works on the `/api/links` collection and names its target
//! link in the JSON body.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tracing::{info, trace};

use crate::services::{AddOutcome, LinkRegistry, UpdateOutcome};

use super::helpers::{
    envelope, error_response, invalid_request, link_not_found, status_response,
};
use super::types::{LinkBody, LinkRequest, LinksBody, NameRequest, required};

/// 获取所有链接
pub async fn list_links(registry: web::Data<Arc<LinkRegistry>>) -> HttpResponse {
    trace!("Admin API: request to list all links");

    match registry.list_all().await {
        Ok(links) => {
            trace!("Admin API: returning {} links", links.len());
            envelope(StatusCode::OK, LinksBody { links })
        }
        Err(e) => error_response("Admin API: failed to list links", &e),
    }
}

/// 按名称查询单个链接
pub async fn get_link(
    registry: web::Data<Arc<LinkRegistry>>,
    body: web::Json<NameRequest>,
) -> HttpResponse {
    let Some(name) = required(body.into_inner().name) else {
        return invalid_request("Admin API: fetch rejected", "'name' is required");
    };

    match registry.get(&name).await {
        Ok(Some(link)) => envelope(StatusCode::OK, LinkBody { link }),
        Ok(None) => link_not_found("Admin API: fetch", &name),
        Err(e) => error_response("Admin API: failed to fetch link", &e),
    }
}

/// 创建链接，已存在时返回 409
pub async fn create_link(
    registry: web::Data<Arc<LinkRegistry>>,
    body: web::Json<LinkRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    let (Some(name), Some(target)) = (required(req.name), required(req.target)) else {
        return invalid_request("Admin API: write rejected", "'name' and 'target' are required");
    };

    match registry.add_if_absent(&name, &target).await {
        Ok(AddOutcome::Created(link)) => {
            info!("Admin API: created link '{}' -> '{}'", link.name, link.target);
            envelope(StatusCode::CREATED, LinkBody { link })
        }
        Ok(AddOutcome::AlreadyExists(existing)) => {
            trace!("Admin API: link '{}' already exists", existing.name);
            status_response(StatusCode::CONFLICT)
        }
        Err(e) => error_response("Admin API: failed to create link", &e),
    }
}

/// 修改链接目标；目标未变化时返回 304
pub async fn update_link(
    registry: web::Data<Arc<LinkRegistry>>,
    body: web::Json<LinkRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    let (Some(name), Some(target)) = (required(req.name), required(req.target)) else {
        return invalid_request("Admin API: write rejected", "'name' and 'target' are required");
    };

    match registry.update_target_if_changed(&name, &target).await {
        Ok(UpdateOutcome::Updated(link)) => {
            info!("Admin API: updated link '{}' -> '{}'", link.name, link.target);
            envelope(StatusCode::OK, LinkBody { link })
        }
        // 304 不允许携带响应体
        Ok(UpdateOutcome::Unchanged(_)) => HttpResponse::NotModified().finish(),
        Ok(UpdateOutcome::NotFound) => link_not_found("Admin API: update", &name),
        Err(e) => error_response("Admin API: failed to update link", &e),
    }
}

/// 删除链接，返回被删除的记录
pub async fn delete_link(
    registry: web::Data<Arc<LinkRegistry>>,
    body: web::Json<NameRequest>,
) -> HttpResponse {
    let Some(name) = required(body.into_inner().name) else {
        return invalid_request("Admin API: delete rejected", "'name' is required");
    };

    match registry.remove(&name).await {
        Ok(Some(link)) => {
            info!("Admin API: deleted link '{}'", link.name);
            envelope(StatusCode::OK, LinkBody { link })
        }
        Ok(None) => link_not_found("Admin API: delete", &name),
        Err(e) => error_response("Admin API: failed to delete link", &e),
    }
}
