use actix_web::{web, Scope};

pub mod findings;

pub fn create_api_router() -> Scope {
    web::scope("/api").service(findings_routes())
}

fn findings_routes() -> Scope {
    web::scope("/findings").configure(findings::configure_findings_routes)
}
