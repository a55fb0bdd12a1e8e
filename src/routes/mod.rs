use actix_web::{http::Method, web};

use crate::middleware::cors;

pub mod health;
pub mod trip_plan;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api").service(
                web::resource("/trips/{code}/plan")
                    .route(web::get().to(trip_plan::get_plan))
                    .route(web::post().to(trip_plan::post_plan))
                    .route(web::method(Method::OPTIONS).to(cors::preflight)),
            ),
        );
}
