mod common;

use actix_web::{http::Method, test};
use serde_json::json;
use std::sync::Arc;

use common::{CannedGenerator, FailingGenerator, TestApp};
use trip_plan_api::{
    config::AppConfig,
    services::plan_service::{NOTE_LLM_FAILED, NOTE_NO_CREDENTIAL},
};

#[actix_rt::test]
async fn test_get_plan_with_delimited_votes() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/trips/ABC123/plan?group=3&votes=a%7C200%7C2h%7CX%3Bb%7C150%7C1h%7CY&dates=2025-03-01,2025-03-02")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["fromLLM"], false);
    assert_eq!(body["note"], NOTE_NO_CREDENTIAL);

    let day_one = &body["data"]["itinerary"][0];
    assert_eq!(day_one["date"], "2025-03-01");
    assert_eq!(day_one["items"][0]["name"], "a");
    assert_eq!(day_one["items"][0]["estCost"], 600);
    assert_eq!(day_one["items"][0]["location"], "X");
    assert_eq!(day_one["items"][2]["name"], "b");
    assert_eq!(day_one["items"][2]["estCost"], 450);
    assert_eq!(body["data"]["participants"], 3);
    assert_eq!(body["data"]["totalBudget"], 30000);
}

#[actix_rt::test]
async fn test_post_scenario_without_credential() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips/ABC123/plan")
        .set_json(json!({
            "group_size": 2,
            "max_budget_per_person": 1000,
            "votes_summary": [
                {"name": "Doi Suthep", "estimated_cost": 100, "duration": "1h", "location": "Chiang Mai"}
            ]
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["fromLLM"], false);
    assert_eq!(body["data"]["totalBudget"], 2000);
    assert_eq!(body["data"]["itinerary"][0]["items"][0]["name"], "Doi Suthep");
    assert_eq!(body["data"]["itinerary"][0]["items"][0]["estCost"], 200);
    assert_eq!(body["data"]["budgetBreakdown"]["accommodation"], 600);
}

#[actix_rt::test]
async fn test_empty_post_uses_defaults() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips/XYZ/plan")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["participants"], 2);
    assert_eq!(body["data"]["totalBudget"], 20000);
    assert_eq!(body["data"]["itinerary"].as_array().unwrap().len(), 2);
    assert!(!body["data"]["tips"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_malformed_body_is_ignored() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips/XYZ/plan?group=4")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"group_size\": ")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["participants"], 4);
    assert_eq!(body["data"]["totalBudget"], 40000);
}

#[actix_rt::test]
async fn test_body_overrides_query() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips/XYZ/plan?group=5&budget=500")
        .set_json(json!({"group_size": 3}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["participants"], 3);
    assert_eq!(body["data"]["totalBudget"], 1500);
}

#[actix_rt::test]
async fn test_repeated_query_key_keeps_other_fields() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/trips/ABC123/plan?group=3&group=4&budget=500&votes=a%7C200")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["participants"], 3);
    assert_eq!(body["data"]["totalBudget"], 1500);
    assert_eq!(body["data"]["itinerary"][0]["items"][0]["name"], "a");
}

#[actix_rt::test]
async fn test_overflowing_budget_uses_default() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/trips/ABC123/plan?group=10&budget=1e308")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["participants"], 10);
    assert_eq!(body["data"]["totalBudget"], 100000);
    assert_ne!(body["data"]["budgetBreakdown"]["accommodation"], 0);
}

#[actix_rt::test]
async fn test_trip_code_does_not_affect_plan() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let first = test::TestRequest::get()
        .uri("/api/trips/ONE/plan?group=2")
        .to_request();
    let second = test::TestRequest::get()
        .uri("/api/trips/TWO/plan?group=2")
        .to_request();

    let first = test::call_and_read_body(&app, first).await;
    let second = test::call_and_read_body(&app, second).await;
    assert_eq!(first, second);
}

#[actix_rt::test]
async fn test_model_failure_falls_back() {
    let test_app = TestApp::with_generator(Arc::new(FailingGenerator));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/trips/ABC123/plan")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["fromLLM"], false);
    assert_eq!(body["note"], NOTE_LLM_FAILED);

    let fallback_app = test::init_service(TestApp::new().create_app()).await;
    let req = test::TestRequest::get()
        .uri("/api/trips/ABC123/plan")
        .to_request();
    let fallback: serde_json::Value = test::call_and_read_body_json(&fallback_app, req).await;
    assert_eq!(body["data"], fallback["data"]);
}

#[actix_rt::test]
async fn test_model_plan_is_returned() {
    let raw = format!("```json\n{}\n```", common::plan_json());
    let test_app = TestApp::with_generator(Arc::new(CannedGenerator(raw)));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips/ABC123/plan")
        .set_json(json!({"group_size": 2, "max_budget_per_person": 1000}))
        .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["fromLLM"], true);
    assert!(body.get("note").is_none());
    assert_eq!(body["data"], common::plan_json());
}

#[actix_rt::test]
async fn test_model_plan_with_unknown_item_type_falls_back() {
    let mut plan = common::plan_json();
    plan["itinerary"][0]["items"][0]["type"] = json!("spa");
    let test_app = TestApp::with_generator(Arc::new(CannedGenerator(plan.to_string())));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/trips/ABC123/plan")
        .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["fromLLM"], false);
    assert_eq!(body["note"], NOTE_LLM_FAILED);
}

#[actix_rt::test]
async fn test_preflight_returns_cors_headers() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/api/trips/ABC123/plan")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    let headers = resp.headers();
    assert_eq!(headers.get("Access-Control-Allow-Origin").unwrap(), "*");
    assert_eq!(
        headers.get("Access-Control-Allow-Methods").unwrap(),
        "GET, POST, OPTIONS"
    );
    assert!(headers.get("Access-Control-Allow-Headers").is_some());

    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}

#[actix_rt::test]
async fn test_configured_cors_origin() {
    let config = AppConfig {
        cors_origin: Some("https://trips.example.com".to_string()),
        ..AppConfig::default()
    };
    let test_app = TestApp::with_config(config);
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/trips/ABC123/plan")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get("Access-Control-Allow-Origin").unwrap(),
        "https://trips.example.com"
    );
}

#[actix_rt::test]
async fn test_oversized_body_returns_error_envelope() {
    let config = AppConfig {
        max_body_bytes: 16,
        ..AppConfig::default()
    };
    let test_app = TestApp::with_config(config);
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips/ABC123/plan")
        .set_json(json!({"votes_summary": [{"name": "A place with a long name"}]}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 413);
    assert_eq!(resp.headers().get("Access-Control-Allow-Origin").unwrap(), "*");

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("16 bytes"));
}
