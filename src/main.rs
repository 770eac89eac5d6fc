use actix_cors::Cors;
use actix_session::config::PersistentSession;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{time::Duration, Key};
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use anyhow::Result;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recon_console::api::create_api_router;
use recon_console::config::AppConfig;
use recon_console::pages::configure_page_routes;
use recon_console::state::AppState;

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // 初始化日志
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recon_console=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 初始化配置与状态
    let config = AppConfig::from_env()?;
    let state = AppState::new(config.clone()).await?;

    let bind_address = config.bind_address.clone();
    let session_key = Key::from(config.session_secret.as_bytes());
    let session_ttl = Duration::hours(config.session_ttl_hours);

    tracing::info!("Recon console listening on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .session_lifecycle(PersistentSession::default().session_ttl(session_ttl))
                    .build(),
            )
            // JSON API 路由
            .service(create_api_router())
            // 健康检查
            .route("/health", web::get().to(health_check))
            // 页面与扫描触发
            .configure(configure_page_routes)
    })
    .bind(bind_address.as_str())?
    .run()
    .await?;

    Ok(())
}
