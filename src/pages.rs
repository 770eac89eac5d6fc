use actix_session::Session;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::scan;
use crate::session;
use crate::state::AppState;

const LOGIN_HTML: &str = include_str!("../templates/login.html");
const DASHBOARD_HTML: &str = include_str!("../templates/dashboard.html");

#[derive(Deserialize)]
pub struct LoginForm {
    pub password: String,
}

#[derive(Deserialize)]
pub struct ScanForm {
    #[serde(default)]
    pub domain: Option<String>,
}

pub fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/login", web::get().to(login_form))
        .route("/login", web::post().to(login_submit))
        .route("/logout", web::get().to(logout))
        .route("/scan", web::post().to(trigger_scan));
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header(("Location", location))
        .finish()
}

fn html(body: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

async fn index(session: Session) -> impl Responder {
    if !session::is_authenticated(&session) {
        return redirect("/login");
    }
    html(DASHBOARD_HTML)
}

async fn login_form() -> impl Responder {
    html(LOGIN_HTML)
}

async fn login_submit(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<LoginForm>,
) -> impl Responder {
    if session::login(&session, &form.password, &state.config.admin_password) {
        redirect("/")
    } else {
        tracing::warn!("Failed login attempt");
        HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body("Wrong password")
    }
}

async fn logout(session: Session) -> impl Responder {
    session::logout(&session);
    redirect("/login")
}

async fn trigger_scan(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<ScanForm>,
) -> impl Responder {
    // 参数校验先于会话校验：缺 domain 一律 400
    let domain = match form.domain.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => {
            return HttpResponse::BadRequest()
                .content_type("text/plain; charset=utf-8")
                .body("No domain provided");
        }
    };

    if !session::is_authenticated(&session) {
        return redirect("/login");
    }

    match scan::launch(&state.config, &domain) {
        Ok(()) => redirect("/"),
        Err(e) => {
            tracing::error!("Failed to launch scan for {}: {}", domain, e);
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(format!("Failed to launch scan: {}", e))
        }
    }
}
