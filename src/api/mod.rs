//! HTTP surface: redirects at the root, link management under `/api`.

use std::sync::Arc;

use actix_web::web;

use crate::services::Authenticator;

pub mod middleware;
pub mod services;

use middleware::BasicAuth;
use services::admin::{json_config, routes::links_routes};
use services::redirect_routes;

/// 注册全部路由
///
/// The caller supplies the registry as `web::Data<Arc<LinkRegistry>>` and
/// sets [`not_found`](services::admin::not_found) as the app's default service.
pub fn configure(cfg: &mut web::ServiceConfig, authenticator: Arc<dyn Authenticator>) {
    cfg.app_data(json_config())
        .service(
            web::scope("/api")
                .wrap(BasicAuth::new(authenticator))
                .service(links_routes()),
        )
        .service(redirect_routes());
}
