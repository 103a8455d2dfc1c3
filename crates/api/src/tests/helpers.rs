// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! An in-process stand-in for the queue service.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::{ClientConfig, HttpQueueApi};

pub const TEST_TOKEN: &str = "test-token";

/// A request as seen by the fake service.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
pub struct Recorder {
    requests: Mutex<Vec<RecordedRequest>>,
}

impl Recorder {
    fn record(
        &self,
        path: &str,
        headers: &HeaderMap,
        query: HashMap<String, String>,
        body: Option<Value>,
    ) {
        let authorization: Option<String> = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        self.requests.lock().unwrap().push(RecordedRequest {
            path: path.to_string(),
            query,
            authorization,
            body,
        });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> RecordedRequest {
        self.requests().pop().expect("no request recorded")
    }
}

type Shared = State<Arc<Recorder>>;

async fn search(
    State(recorder): Shared,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    recorder.record("/timezones/search", &headers, query, None);
    Json(json!([{ "region": "Москва" }, { "region": "Московская область" }]))
}

async fn resolve(
    State(recorder): Shared,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let region: String = query.get("region").cloned().unwrap_or_default();
    recorder.record("/timezones/resolve", &headers, query, None);
    match region.as_str() {
        "Unknown Place" => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Region not found" })),
        )
            .into_response(),
        "Garbage" => Json(json!({ "variants": "not-a-list" })).into_response(),
        "Якутия" => Json(json!({
            "input_region": region,
            "needs_choice": true,
            "variants": [
                { "region": "Республика Саха (Якутия)", "msk_offset_hours": 6, "utc_offset_hours": 9, "fias_code": "1400000000000", "label": "МСК+6 (UTC+9)" },
                { "region": "Республика Саха (Якутия)", "msk_offset_hours": 7, "utc_offset_hours": 10, "fias_code": null, "label": "МСК+7 (UTC+10)" }
            ]
        }))
        .into_response(),
        _ => Json(json!({
            "input_region": region,
            "needs_choice": false,
            "variants": [
                { "region": "Москва", "msk_offset_hours": 0, "utc_offset_hours": 3, "fias_code": "7700000000000", "label": "МСК+0 (UTC+3)" }
            ]
        }))
        .into_response(),
    }
}

async fn join(State(recorder): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let join_code: String = body["join_code"].as_str().unwrap_or_default().to_string();
    recorder.record("/groups/join", &headers, HashMap::new(), Some(body.clone()));
    match join_code.as_str() {
        "BAD" => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Group not found" })),
        )
            .into_response(),
        "PLAIN" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        _ => Json(json!({
            "id": 11,
            "group_id": 5,
            "user_id": 3,
            "display_name": "Иван Петров",
            "region": body.get("region").cloned().unwrap_or(Value::Null),
            "msk_offset_hours": body.get("msk_offset_hours").cloned().unwrap_or(Value::Null),
            "joined_at": "2026-03-01T09:30:00+00:00",
            "position": 14
        }))
        .into_response(),
    }
}

async fn queue(State(recorder): Shared, headers: HeaderMap, Path(group_id): Path<i64>) -> Response {
    recorder.record(&format!("/groups/{group_id}/queue"), &headers, HashMap::new(), None);
    if group_id == 404 {
        return (StatusCode::NOT_FOUND, Json(json!({ "detail": "Group not found" })))
            .into_response();
    }
    Json(json!({
        "queue": [
            { "display_name": "<b>x</b>", "region": "Москва", "msk_offset_hours": 0, "position": 12 },
            { "display_name": "Анна", "region": null, "msk_offset_hours": null, "position": 0 }
        ]
    }))
    .into_response()
}

async fn me(State(recorder): Shared, headers: HeaderMap) -> Response {
    recorder.record("/auth/me", &headers, HashMap::new(), None);
    if headers.get("authorization").is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Not authenticated" })),
        )
            .into_response();
    }
    Json(json!({ "user": { "full_name": "Мария Ивановна", "role": "teacher" } })).into_response()
}

async fn now(
    State(recorder): Shared,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    recorder.record("/timezones/now", &headers, query, None);
    Json(json!({
        "region": "Омская область",
        "fias_code": "5500000000000",
        "msk_offset_hours": 3,
        "utc_offset_hours": 6,
        "label": "МСК+3 (UTC+6)",
        "msk_time": "2026-03-01 12:30:00",
        "local_time": "2026-03-01 15:30:00"
    }))
}

fn router(recorder: Arc<Recorder>) -> Router {
    Router::new()
        .route("/api/v1/timezones/search", get(search))
        .route("/api/v1/timezones/resolve", get(resolve))
        .route("/api/v1/timezones/now", get(now))
        .route("/api/v1/groups/join", post(join))
        .route("/api/v1/groups/{group_id}/queue", get(queue))
        .route("/api/v1/auth/me", get(me))
        .with_state(recorder)
}

/// Starts the fake service on an ephemeral port and returns its API root.
pub async fn spawn_fake_service() -> (String, Arc<Recorder>) {
    let recorder: Arc<Recorder> = Arc::new(Recorder::default());
    let app: Router = router(Arc::clone(&recorder));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api/v1"), recorder)
}

/// Builds a client for the fake service, optionally authenticated.
pub fn create_test_client(api_root: &str, authenticated: bool) -> HttpQueueApi {
    let token: Option<String> = authenticated.then(|| String::from(TEST_TOKEN));
    HttpQueueApi::new(ClientConfig::new(api_root).with_token(token)).unwrap()
}
