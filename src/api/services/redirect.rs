use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::trace;

use crate::services::LinkRegistry;
use crate::storage::LinkRecord;

use super::admin::{envelope, error_response, link_not_found};

/// Name of the link that replaces the welcome page.
pub const ROOT_LINK_NAME: &str = "/";

/// 根路径的默认响应
#[derive(Serialize, Debug)]
pub struct WelcomeBody {
    #[serde(rename = "Note")]
    pub note: &'static str,
    #[serde(rename = "GitHub")]
    pub github: &'static str,
}

impl Default for WelcomeBody {
    fn default() -> Self {
        Self {
            note: "If you want this page to be redirected to a different URL, create a redirect rule with the name '/'.",
            github: "https://github.com/despenser08/link-shortener",
        }
    }
}

pub struct RedirectService {}

impl RedirectService {
    /// `GET /`: follow the `/` link when one exists, otherwise greet.
    pub async fn handle_root(registry: web::Data<Arc<LinkRegistry>>) -> HttpResponse {
        match registry.resolve_and_touch(ROOT_LINK_NAME).await {
            Ok(Some(link)) => Self::finish_redirect(link),
            Ok(None) => envelope(StatusCode::OK, WelcomeBody::default()),
            Err(e) => error_response("Redirect lookup failed for '/'", &e),
        }
    }

    /// `GET /{name}`: 301 to the stored target, 404 otherwise.
    pub async fn handle_redirect(
        path: web::Path<String>,
        registry: web::Data<Arc<LinkRegistry>>,
    ) -> HttpResponse {
        let name = path.into_inner();

        match registry.resolve_and_touch(&name).await {
            Ok(Some(link)) => Self::finish_redirect(link),
            Ok(None) => link_not_found("Redirect", &name),
            Err(e) => error_response("Redirect lookup failed", &e),
        }
    }

    fn finish_redirect(link: LinkRecord) -> HttpResponse {
        trace!("Redirecting '{}' -> '{}'", link.name, link.target);
        HttpResponse::MovedPermanently()
            .insert_header((LOCATION, link.target))
            .finish()
    }
}

/// `/` and single-segment redirect routes, with or without a trailing slash.
///
/// Register after `/api` so the management scope wins.
pub fn redirect_routes() -> impl actix_web::dev::HttpServiceFactory {
    (
        web::resource("/")
            .route(web::get().to(RedirectService::handle_root))
            .route(web::head().to(RedirectService::handle_root))
            .default_service(web::to(super::admin::not_found)),
        web::resource("/{name}")
            .route(web::get().to(RedirectService::handle_redirect))
            .route(web::head().to(RedirectService::handle_redirect))
            .default_service(web::to(super::admin::not_found)),
        // `/docs/` resolves like `/docs`
        web::resource("/{name}/")
            .route(web::get().to(RedirectService::handle_redirect))
            .route(web::head().to(RedirectService::handle_redirect))
            .default_service(web::to(super::admin::not_found)),
    )
}
