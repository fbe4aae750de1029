#![allow(dead_code)]

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use jsonwebtoken::{EncodingKey, Header};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use std::time::{SystemTime, UNIX_EPOCH};
use tasksaathi_client::TaskSaathiClient;
use tasksaathi_client::config::{ApiConfig, ApiProfile};
use tasksaathi_client::domain::session::{Role, Session};
use tasksaathi_client::domain::user::UserProfile;
use tasksaathi_client::storage::{KeyValueStore, MemoryStore};
use uuid::Uuid;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("tasksaathi_client=debug".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().init();
    });
}

/// One request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Value,
}

/// A response served only when a request body field equals `value`.
#[derive(Clone)]
struct BodyRule {
    route: String,
    field: String,
    value: Value,
    status: StatusCode,
    body: Value,
}

#[derive(Clone, Default)]
struct MockState {
    routes: Arc<Mutex<HashMap<String, (StatusCode, Option<Value>)>>>,
    rules: Arc<Mutex<Vec<BodyRule>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// A scripted stand-in for the TaskSaathi backend. Unscripted routes answer
/// `404 {"detail": "Not found."}`.
pub struct MockBackend {
    pub url: String,
    state: MockState,
}

impl MockBackend {
    pub async fn start() -> Self {
        setup_tracing();
        let state = MockState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { url: format!("http://{addr}"), state }
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.script(method, path, status, Some(body));
    }

    /// Answers with `status` and an empty body.
    pub fn respond_empty(&self, method: &str, path: &str, status: u16) {
        self.script(method, path, status, None);
    }

    /// Answers with `body` only for requests whose JSON `field` equals `value`.
    /// Takes precedence over routes scripted with [`Self::respond`].
    pub fn respond_when(&self, method: &str, path: &str, field: &str, value: Value, status: u16, body: Value) {
        self.state.rules.lock().unwrap().push(BodyRule {
            route: format!("{method} {path}"),
            field: field.to_string(),
            value,
            status: StatusCode::from_u16(status).unwrap(),
            body,
        });
    }

    fn script(&self, method: &str, path: &str, status: u16, body: Option<Value>) {
        let status = StatusCode::from_u16(status).unwrap();
        self.state.routes.lock().unwrap().insert(format!("{method} {path}"), (status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request reached the mock backend")
    }

    pub fn client(&self, profile: ApiProfile) -> (TaskSaathiClient, Arc<MemoryStore>) {
        client_for(&self.url, profile)
    }
}

async fn handle(State(state): State<MockState>, method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    let authorization = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()).map(str::to_string);
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let key = format!("{method} {}", uri.path());

    let rule = state
        .rules
        .lock()
        .unwrap()
        .iter()
        .find(|rule| rule.route == key && body.get(&rule.field) == Some(&rule.value))
        .cloned();

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization,
        body,
    });

    if let Some(rule) = rule {
        return (rule.status, Json(rule.body)).into_response();
    }

    let scripted = state.routes.lock().unwrap().get(&key).cloned();
    match scripted {
        Some((status, Some(body))) => (status, Json(body)).into_response(),
        Some((status, None)) => status.into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response(),
    }
}

pub fn client_for(url: &str, profile: ApiProfile) -> (TaskSaathiClient, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let config = ApiConfig { server_url: url.to_string(), profile, request_timeout_secs: 5 };
    let client = TaskSaathiClient::new(&config, Arc::clone(&store) as Arc<dyn KeyValueStore>).unwrap();
    (client, store)
}

/// An address nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[derive(Serialize)]
struct Claims {
    token_type: &'static str,
    exp: u64,
    jti: String,
    user_id: String,
}

/// Mints a signed JWT shaped like the backend's, with a fresh secret per call.
pub fn mint_token(token_type: &'static str, user_id: &str) -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
    let claims = Claims {
        token_type,
        exp: now + 3600,
        jti: Uuid::new_v4().simple().to_string(),
        user_id: user_id.to_string(),
    };
    let secret = Uuid::new_v4().to_string();
    jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

pub fn unique_email() -> String {
    format!("user_{}@example.test", Uuid::new_v4().simple())
}

pub fn user_json(id: &str, role: &str, company: Option<Value>) -> Value {
    json!({
        "id": id,
        "email": unique_email(),
        "firstName": "Asha",
        "lastName": "Karki",
        "userRole": role,
        "phoneNumber": null,
        "company": company,
    })
}

pub fn company_json(id: Uuid) -> Value {
    json!({"id": id.to_string(), "name": "Himal Traders", "isVerified": true})
}

/// A `POST /login/` body with freshly minted tokens.
pub fn login_body(user: &Value) -> Value {
    let user_id = user["id"].as_str().unwrap();
    json!({
        "access": mint_token("access", user_id),
        "refresh": mint_token("refresh", user_id),
        "user": user,
    })
}

pub fn wrapped(data: Value) -> Value {
    json!({"data": data, "error": null, "isSuccess": true})
}

pub fn wrapped_error(message: &str) -> Value {
    json!({"data": null, "error": {"message": message}, "isSuccess": false})
}

pub fn task_json(id: Uuid, title: &str, status: &str) -> Value {
    json!({
        "id": id.to_string(),
        "title": title,
        "description": "Restock the front shelves",
        "status": status,
        "priority": "medium",
        "dueDate": "2026-11-02",
        "assignedTo": Uuid::new_v4().to_string(),
        "assignedToName": "Bikash Thapa",
        "companyName": "Himal Traders",
    })
}

/// Stores a signed-in session directly, returning the access token.
pub async fn seed_session(client: &TaskSaathiClient, role: Role, company: Option<Value>) -> String {
    let user_id = Uuid::new_v4().to_string();
    let user: UserProfile = serde_json::from_value(user_json(&user_id, role.as_str(), company)).unwrap();
    let access = mint_token("access", &user_id);

    let session = Session {
        access_token: access.clone(),
        refresh_token: Some(mint_token("refresh", &user_id)),
        logged_in: true,
        user_id: Some(user_id),
        role: Some(role),
        user: Some(user),
    };
    client.sessions().save(&session).await.unwrap();
    access
}
