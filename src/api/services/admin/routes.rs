//! Admin API 路由配置

use actix_web::web;

use super::link_crud::{create_link, delete_link, get_link, list_links, update_link};

/// 链接管理路由 `/links`
///
/// 包含：
/// - GET /links - 获取所有链接
/// - POST /links - 按名称查询
/// - PUT /links - 创建链接
/// - PATCH /links - 修改目标
/// - DELETE /links - 删除链接
pub fn links_routes() -> actix_web::Resource {
    web::resource("/links")
        .route(web::get().to(list_links))
        .route(web::post().to(get_link))
        .route(web::put().to(create_link))
        .route(web::patch().to(update_link))
        .route(web::delete().to(delete_link))
        .default_service(web::to(super::helpers::not_found))
}
