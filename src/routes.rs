mod employees;
mod planning;
mod root;

use crate::{config::AppConfig, state::AppState};
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignore invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    Router::new()
        .merge(root::new())
        .nest("/planning", planning::new())
        .nest("/employees", employees::new())
        .fallback(root::handler_404)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(
            // see https://docs.rs/tower-http/latest/tower_http/cors/index.html
            // for more details
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_origin(origins)
                .allow_headers([CONTENT_TYPE]),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        repositories::memory::MemoryStore,
        structs::{
            employees::Employee,
            planning::{Assignment, WeekRollover},
        },
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::{sync::Arc, time::Duration};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn test_config(rollover: WeekRollover) -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: String::new(),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(1),
            cors_origins: vec!["http://localhost:5173".to_string()],
            request_timeout: Duration::from_secs(5),
            week_rollover: rollover,
        }
    }

    fn test_app(store: Arc<MemoryStore>, rollover: WeekRollover) -> Router {
        let state = AppState::with_backends(store.clone(), store, rollover);
        app(state, &test_config(rollover))
    }

    fn anna(fixed_days: Option<Vec<i32>>) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            name: "Anna".to_string(),
            active: true,
            fixed_days,
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn navigation_rolls_over_years() {
        let app = test_app(Arc::new(MemoryStore::default()), WeekRollover::Fixed52);

        let (status, body) = send(app.clone(), get("/planning/weeks/next?year=2026&week=52")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "year": 2027, "week": 1, "label": "Week 1 (2027)" }));

        let (status, body) = send(app, get("/planning/weeks/previous?year=2026&week=1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["year"], 2025);
        assert_eq!(body["week"], 52);
    }

    #[tokio::test]
    async fn week_outside_the_year_is_rejected() {
        let store = Arc::new(MemoryStore::default());

        let app = test_app(store.clone(), WeekRollover::Fixed52);
        let (status, body) = send(app, get("/planning/week?year=2026&week=53")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "week 53 is not valid for year 2026");

        let app = test_app(store, WeekRollover::Iso);
        let (status, _) = send(app, get("/planning/week?year=2026&week=53")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn navigation_at_extreme_years_is_a_bad_request() {
        let app = test_app(Arc::new(MemoryStore::default()), WeekRollover::Fixed52);

        let (status, body) = send(
            app.clone(),
            get("/planning/weeks/next?year=2147483647&week=52"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "year 2147483647 is outside the supported calendar"
        );

        let (status, body) = send(
            app,
            get("/planning/weeks/previous?year=-2147483648&week=1"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn malformed_requests_get_json_errors() {
        let app = test_app(Arc::new(MemoryStore::default()), WeekRollover::Fixed52);

        let (status, body) = send(app.clone(), get("/planning/week?year=abc&week=5")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = send(app.clone(), get("/planning/date?year=2026&week=5")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = send(
            app.clone(),
            post_json(
                "/planning/shifts",
                json!({ "year": 2026, "week": 5, "day_of_week": 1 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/planning/shifts")
            .body(Body::from("{}"))
            .unwrap();
        let (status, body) = send(app.clone(), request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body["error"].is_string());

        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/planning/shifts/not-a-uuid")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn date_endpoint_exposes_the_calendar() {
        let app = test_app(Arc::new(MemoryStore::default()), WeekRollover::Fixed52);

        let (status, body) = send(
            app.clone(),
            get("/planning/date?year=2026&week=5&day_of_week=1"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "date": "2026-01-26" }));

        let (status, _) = send(app, get("/planning/date?year=2026&week=5&day_of_week=8")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn save_then_view_then_delete() {
        let employee = anna(None);
        let store = Arc::new(MemoryStore::with_employees(vec![employee.clone()]));
        let app = test_app(store.clone(), WeekRollover::Fixed52);

        let (status, saved) = send(
            app.clone(),
            post_json(
                "/planning/shifts",
                json!({
                    "year": 2026,
                    "week": 5,
                    "day_of_week": 3,
                    "employee_id": employee.id,
                    "half_day": true,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(saved["date"], "2026-01-28");

        let (status, view) = send(app.clone(), get("/planning/week?year=2026&week=5")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["label"], "Week 5 (2026)");
        assert_eq!(view["shifts"][0]["employee_name"], "Anna");
        assert_eq!(view["totals"]["days"]["3"], 0.5);
        assert_eq!(view["totals"]["week_total"], 0.5);

        let id = saved["id"].as_str().unwrap();
        let request = Request::builder()
            .method(Method::DELETE)
            .uri(format!("/planning/shifts/{}", id))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(store.shifts().is_empty());
    }

    #[tokio::test]
    async fn duplicate_shift_is_a_conflict() {
        let employee = anna(None);
        let store = Arc::new(MemoryStore::with_employees(vec![employee.clone()]));
        let app = test_app(store, WeekRollover::Fixed52);
        let body = json!({
            "year": 2026,
            "week": 5,
            "day_of_week": 1,
            "employee_id": employee.id,
        });

        let (status, _) = send(app.clone(), post_json("/planning/shifts", body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(app, post_json("/planning/shifts", body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn fixed_days_endpoint_is_idempotent() {
        let employee = anna(Some(vec![1, 3]));
        let store = Arc::new(MemoryStore::with_employees(vec![employee.clone()]));
        store.add_shift(Assignment {
            id: Uuid::new_v4(),
            year: 2026,
            week: 5,
            day_of_week: 1,
            date: NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
            employee_id: employee.id,
            half_day: false,
        });
        let app = test_app(store.clone(), WeekRollover::Fixed52);

        let request = || {
            Request::builder()
                .method(Method::POST)
                .uri("/planning/fixed_days?year=2026&week=5")
                .body(Body::empty())
                .unwrap()
        };

        let (status, report) = send(app.clone(), request()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["inserted"].as_array().unwrap().len(), 1);
        assert_eq!(report["inserted"][0]["day_of_week"], 3);

        let (status, report) = send(app, request()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(report["inserted"].as_array().unwrap().is_empty());
        assert_eq!(store.shifts().len(), 2);
    }

    #[tokio::test]
    async fn store_failure_maps_to_bad_gateway() {
        let store = Arc::new(MemoryStore::with_employees(vec![anna(Some(vec![2]))]));
        store.fail_writes(true);
        let app = test_app(store, WeekRollover::Fixed52);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/planning/fixed_days?year=2026&week=5")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "store unavailable: writes disabled");
    }

    #[tokio::test]
    async fn employees_are_listed_by_name() {
        let mut bram = anna(None);
        bram.name = "Bram".to_string();
        bram.active = false;
        let store = Arc::new(MemoryStore::with_employees(vec![bram, anna(Some(vec![1]))]));
        let app = test_app(store, WeekRollover::Fixed52);

        let (status, body) = send(app.clone(), get("/employees")).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|employee| employee["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Anna", "Bram"]);

        let (_, body) = send(app, get("/employees/active")).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = test_app(Arc::new(MemoryStore::default()), WeekRollover::Fixed52);
        let (status, _) = send(app, get("/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
