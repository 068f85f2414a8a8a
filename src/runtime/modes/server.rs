//! Server mode
//!
//! Builds the middleware stack and runs the HTTP server until Ctrl+C.

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};
use actix_web::{App, HttpServer, middleware::Compress, middleware::Condition, web};
use anyhow::{Result, anyhow};
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api;
use crate::api::middleware::{AccessLog, security_headers};
use crate::api::services::admin::not_found;
use crate::config::{RateLimitConfig, StaticConfig};
use crate::runtime::lifetime;
use crate::services::Authenticator;

/// 与 express `cors()` 默认行为一致：任意来源、任意方法
fn build_cors_middleware() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// 按客户端 IP 的限流配置
///
/// `requests_per_hour` tokens refill evenly over an hour, with the same
/// number available as an initial burst.
pub fn build_rate_limit_config(
    config: &RateLimitConfig,
) -> Result<GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>> {
    let per_hour = config.requests_per_hour.max(1);
    let interval_ms = (3_600_000 / u64::from(per_hour)).max(1);

    GovernorConfigBuilder::default()
        .period(std::time::Duration::from_millis(interval_ms))
        .burst_size(per_hour)
        .finish()
        .ok_or_else(|| anyhow!("Invalid rate limit configuration: {:?}", config))
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_startup(config)
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let registry = startup.registry.clone();
    let authenticator: Arc<dyn Authenticator> = startup.users.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let rate_limit_enabled = config.rate_limit.enabled;
    let rate_limit = build_rate_limit_config(&config.rate_limit)?;
    if rate_limit_enabled {
        info!(
            "Rate limiting: {} requests per hour per client IP",
            config.rate_limit.requests_per_hour
        );
    } else {
        warn!("Rate limiting disabled");
    }

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Condition::new(rate_limit_enabled, Governor::new(&rate_limit)))
            .wrap(security_headers())
            .wrap(Compress::default())
            .wrap(build_cors_middleware())
            .wrap(AccessLog) // 最外层，记录每个请求
            .app_data(web::Data::new(registry.clone()))
            .app_data(web::PayloadConfig::new(64 * 1024))
            .configure(|cfg| api::configure(cfg, authenticator.clone()))
            .default_service(web::to(not_found))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .shutdown_timeout(lifetime::shutdown::SHUTDOWN_TIMEOUT_SECS)
    .disable_signals()
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let server = server.bind(&bind_address)?.run();
    warn!(
        "link-shortener started at http://{} ({} storage)",
        bind_address,
        startup.store.backend_name()
    );

    let shutdown = tokio::spawn(lifetime::shutdown::listen_for_shutdown(server.handle()));
    server.await?;
    shutdown.abort();

    info!("Graceful shutdown complete");
    Ok(())
}
