#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use booking_service::config::{
    ObservabilitySettings, PaymentSettings, PricingSettings, ServerSettings, Settings,
};
use booking_service::models::ServiceOffering;
use booking_service::services::Clock;
use booking_service::startup::build_router;
use booking_service::AppState;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;

pub fn offering(id: &str, price: i64) -> ServiceOffering {
    ServiceOffering {
        id: id.to_string(),
        vendor_id: "lens-and-light".to_string(),
        name: format!("Service {}", id),
        price,
        description: String::new(),
    }
}

pub fn test_settings(settle_delay_ms: u64) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        pricing: PricingSettings {
            advance_payment_percentage: 30.0,
            platform_fee_percentage: 8.5,
            review_service_fee_percentage: 10.0,
        },
        payment: PaymentSettings {
            settle_delay_ms,
            default_country: "IN".to_string(),
        },
        observability: ObservabilitySettings::default(),
        catalog: vec![
            offering("photo-basic", 50_000),
            offering("photo-premium", 150_000),
            offering("dj-night", 12_000),
        ],
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new(settings: Settings, clock: Arc<dyn Clock>) -> Self {
        let state = AppState::with_clock(settings, clock);
        Self {
            router: build_router(state.clone()),
            state,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send(Method::POST, uri, body).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    /// Open a wizard and fill every step, leaving it on the review step.
    pub async fn completed_booking(&self, service_id: &str) -> String {
        let (status, body) = self.post("/bookings", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_str().unwrap().to_string();
        let uri = format!("/bookings/{}", id);
        let next = format!("/bookings/{}/next", id);

        let updates = [
            vec![serde_json::json!({ "field": "service", "value": service_id })],
            vec![
                serde_json::json!({ "field": "date", "value": "2026-12-12" }),
                serde_json::json!({ "field": "time", "value": "18:30:00" }),
                serde_json::json!({ "field": "duration", "value": 4 }),
            ],
            vec![
                serde_json::json!({ "field": "guest_count", "value": 250 }),
                serde_json::json!({
                    "field": "location",
                    "value": { "address": "12 Lake Road", "city": "Udaipur" }
                }),
            ],
            vec![serde_json::json!({
                "field": "contact",
                "value": { "name": "Asha Rao", "email": "asha@example.com", "phone": "+91 98450 00000" }
            })],
        ];

        for step in updates {
            for update in step {
                let (status, _) = self.patch(&uri, update).await;
                assert_eq!(status, StatusCode::OK);
            }
            let (status, body) = self.post(&next, None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["navigation"]["outcome"], "moved");
        }

        id
    }
}
