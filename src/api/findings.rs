use actix_session::Session;
use actix_web::{web, HttpResponse, Responder};

use crate::session;
use crate::state::AppState;
use crate::store::{self, NewFinding};

pub fn configure_findings_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_findings)) // GET /api/findings
        .route("", web::post().to(create_finding)); // POST /api/findings
}

/// PUBLIC_FINDINGS_API=false 时两个方法都要求已登录
fn api_guard(state: &AppState, session: &Session) -> Option<HttpResponse> {
    if state.config.public_findings_api || session::is_authenticated(session) {
        return None;
    }
    Some(HttpResponse::Unauthorized().json(serde_json::json!({
        "error": "Authentication required"
    })))
}

fn storage_failure(e: sqlx::Error) -> HttpResponse {
    // 驱动细节只进日志，不回给客户端
    tracing::error!("Findings storage failure: {}", e);
    HttpResponse::InternalServerError().json(serde_json::json!({
        "error": "Storage failure"
    }))
}

async fn list_findings(state: web::Data<AppState>, session: Session) -> impl Responder {
    if let Some(denied) = api_guard(&state, &session) {
        return denied;
    }

    match store::list_all(&state.db).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => storage_failure(e),
    }
}

async fn create_finding(
    state: web::Data<AppState>,
    session: Session,
    req: web::Json<NewFinding>,
) -> impl Responder {
    if let Some(denied) = api_guard(&state, &session) {
        return denied;
    }

    if let Err(e) = store::insert(&state.db, &req).await {
        return storage_failure(e);
    }

    // 与原接口一致：写入后返回全量列表
    match store::list_all(&state.db).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => storage_failure(e),
    }
}
