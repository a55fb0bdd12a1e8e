use actix_web::{http::header::ContentType, web, HttpRequest, HttpResponse};
use futures::StreamExt;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{envelope::PlanEnvelope, snapshot::SnapshotPayload};
use crate::services::{
    plan_service::generate_trip_plan,
    snapshot_service::{normalize, parse_body, parse_query, PlanBody},
};
use crate::state::AppState;

/*
    GET /api/trips/{code}/plan
*/
pub async fn get_plan(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let query = parse_query(req.query_string());
    let payload = normalize(&query, &PlanBody::new());

    respond(&state, payload).await
}

/*
    POST /api/trips/{code}/plan
*/
pub async fn post_plan(
    req: HttpRequest,
    body: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let bytes = read_body(body, state.config.max_body_bytes).await?;
    let query = parse_query(req.query_string());
    let payload = normalize(&query, &parse_body(&bytes));

    respond(&state, payload).await
}

async fn read_body(mut body: web::Payload, limit: usize) -> Result<web::BytesMut, ApiError> {
    let mut bytes = web::BytesMut::new();
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| ApiError::Payload(e.to_string()))?;
        if bytes.len() + chunk.len() > limit {
            return Err(ApiError::PayloadTooLarge { limit });
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn respond(state: &AppState, payload: SnapshotPayload) -> Result<HttpResponse, ApiError> {
    let request_id = Uuid::new_v4();
    let outcome = generate_trip_plan(state.generator.as_deref(), &payload, request_id).await;
    let body = serde_json::to_vec(&PlanEnvelope::from(outcome))?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}
