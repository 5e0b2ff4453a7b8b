use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use meridian_api::state::{AppState, AuthConfig, ExamAppState};
use meridian_api::app;
use meridian_exam::{AccountDirectory, ExamCatalog};
use meridian_store::{MemoryStore, SnapshotStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

fn test_app() -> Router {
    let snapshot: Arc<dyn SnapshotStore> = Arc::new(MemoryStore::new());
    let reservations = meridian_store::seed::sample_reservation_store().unwrap();
    let exam_state = ExamAppState::new(
        AccountDirectory::new(),
        ExamCatalog::from_parts(meridian_store::seed::sample_exams(), Vec::new()),
    );
    let state = AppState::new(
        reservations,
        exam_state,
        snapshot,
        AuthConfig {
            secret: "test-secret".to_string(),
            expiration: 3600,
        },
    );
    app(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed(mut req: Request<Body>, token: &str) -> Request<Body> {
    req.headers_mut().insert(
        "Authorization",
        format!("Bearer {}", token).parse().unwrap(),
    );
    req
}

async fn register(app: &Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/v1/auth/register",
            json!({"name": "Test Student", "email": email, "password": "hunter2"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_booking_and_cancellation_flow() {
    let app = test_app();

    // The demo inventory carries HA101 at $299 with 150 seats.
    let response = app.clone().oneshot(get("/v1/flights")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let flights = body_json(response).await;
    let ha101 = flights
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["flight_number"] == "HA101")
        .unwrap();
    let flight_id = ha101["id"].as_str().unwrap().to_string();
    assert_eq!(ha101["available_seats"], 150);

    let response = app
        .clone()
        .oneshot(post_json(
            "/v1/reservations",
            json!({
                "flight_id": flight_id,
                "passenger": {
                    "name": "Jordan Reyes",
                    "age": 34,
                    "gender": "Male",
                    "phone": "555-0134",
                    "email": "jordan@example.com"
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let confirmation = body_json(response).await;
    let pnr = confirmation["pnr"].as_str().unwrap().to_string();
    assert!(pnr.starts_with("PNR"));
    assert_eq!(confirmation["amount"], 299.0);

    let response = app.clone().oneshot(get("/v1/flights")).await.unwrap();
    let flights = body_json(response).await;
    let ha101 = flights
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["flight_number"] == "HA101")
        .unwrap();
    assert_eq!(ha101["available_seats"], 149);

    // Ticket lookup works while the reservation is Confirmed.
    let response = app
        .clone()
        .oneshot(get(&format!("/v1/tickets/{}", pnr)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let ticket = body_json(response).await;
    assert_eq!(ticket["origin"], "New York");
    assert_eq!(ticket["destination"], "Los Angeles");

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/v1/reservations/{}/cancel", pnr),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await;
    assert_eq!(summary["refund_amount"], 239.20);

    // Double cancellation is rejected.
    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/v1/reservations/{}/cancel", pnr),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Cancelled reservations no longer produce tickets.
    let response = app
        .clone()
        .oneshot(get(&format!("/v1/tickets/{}", pnr)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.clone().oneshot(get("/v1/collections")).await.unwrap();
    let report = body_json(response).await;
    assert_eq!(report["total_revenue"], 299.0);
    assert_eq!(report["total_refunds"], 239.20);
    assert_eq!(report["cancelled_count"], 1);
}

#[tokio::test]
async fn test_unknown_ticket_is_not_found() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(get("/v1/tickets/PNRZZZZZ"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_exam_routes_require_auth() {
    let app = test_app();

    let response = app.clone().oneshot(get("/v1/exams")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = register(&app, "student@example.com").await;
    let response = app
        .clone()
        .oneshot(authed(get("/v1/exams"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let exams = body_json(response).await;
    assert_eq!(exams.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_exam_creation_requires_admin_role() {
    let app = test_app();
    let draft = json!({
        "title": "Rust Basics",
        "description": "Ownership and borrowing",
        "duration_minutes": 20,
        "questions": [{
            "prompt": "Rust has a garbage collector.",
            "options": ["True", "False"],
            "correct_answer": 1,
            "kind": "true-false"
        }]
    });

    let student_token = register(&app, "student@example.com").await;
    let response = app
        .clone()
        .oneshot(authed(post_json("/v1/admin/exams", draft.clone()), &student_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The built-in administrator can author exams.
    let response = app
        .clone()
        .oneshot(post_json(
            "/v1/auth/login",
            json!({"email": "admin@exam.com", "password": "admin123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let admin_token = body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(authed(post_json("/v1/admin/exams", draft), &admin_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_invalid_exam_draft_rejected() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(post_json(
            "/v1/auth/login",
            json!({"email": "admin@exam.com", "password": "admin123"}),
        ))
        .await
        .unwrap();
    let admin_token = body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(authed(
            post_json(
                "/v1/admin/exams",
                json!({
                    "title": "  ",
                    "description": "No title",
                    "duration_minutes": 10,
                    "questions": []
                }),
            ),
            &admin_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_attempt_lifecycle_via_api() {
    let app = test_app();
    let token = register(&app, "student@example.com").await;

    let response = app
        .clone()
        .oneshot(authed(get("/v1/exams"), &token))
        .await
        .unwrap();
    let exams = body_json(response).await;
    let exam = &exams.as_array().unwrap()[0];
    let exam_id = exam["id"].as_str().unwrap().to_string();
    let question = &exam["questions"].as_array().unwrap()[0];
    let question_id = question["id"].as_str().unwrap().to_string();
    let correct = question["correct_answer"].as_u64().unwrap();
    let total_questions = exam["questions"].as_array().unwrap().len() as u64;

    let response = app
        .clone()
        .oneshot(authed(
            post_json(&format!("/v1/exams/{}/attempts", exam_id), json!({})),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let attempt = body_json(response).await;
    let attempt_id = attempt["id"].as_str().unwrap().to_string();
    assert_eq!(attempt["status"], "InProgress");
    assert_eq!(attempt["remaining_seconds"], 30 * 60);

    let answer = Request::builder()
        .method("PUT")
        .uri(format!("/v1/attempts/{}/answer", attempt_id))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"question_id": question_id, "option_index": correct}).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(authed(answer, &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    assert_eq!(view["answered_count"], 1);

    let response = app
        .clone()
        .oneshot(authed(
            post_json(&format!("/v1/attempts/{}/submit", attempt_id), json!({})),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let result = body_json(response).await;
    assert_eq!(result["score"], 1);
    assert_eq!(result["total_questions"], total_questions);

    // Submitted attempts are evicted, so the id no longer resolves.
    let response = app
        .clone()
        .oneshot(authed(
            post_json(&format!("/v1/attempts/{}/submit", attempt_id), json!({})),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(authed(get(&format!("/v1/attempts/{}", attempt_id)), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(authed(get("/v1/results"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let results = body_json(response).await;
    assert_eq!(results["results"].as_array().unwrap().len(), 1);
    assert_eq!(results["average_percentage"], 20);
}

#[tokio::test]
async fn test_unmatched_route_redirects_home() {
    let app = test_app();
    let response = app.clone().oneshot(get("/nonsense")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");
}
