//! In-process fake of the fleet backend for adapter tests.
//!
//! Serves the access, composite resource, and prediction endpoints from an
//! in-memory store and records every request it receives.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, web};
use fleet_client::domain::{FieldGroup, ResourceKind};
use reqwest::Url;
use serde_json::{Value, json};

/// One request as the fake received it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct StoredRecord {
    primary: FieldGroup,
    detail: FieldGroup,
}

#[derive(Debug, Clone)]
struct Account {
    email: String,
    password: String,
    role: String,
}

#[derive(Debug)]
struct BackendState {
    records: BTreeMap<&'static str, BTreeMap<i64, StoredRecord>>,
    next_id: i64,
    accounts: Vec<Account>,
    requests: Vec<RecordedRequest>,
    login_delay: Option<Duration>,
    prediction_status: u16,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
            accounts: Vec::new(),
            requests: Vec::new(),
            login_delay: None,
            prediction_status: 200,
        }
    }
}

type SharedState = web::Data<Mutex<BackendState>>;

/// A running fake backend bound to an ephemeral local port.
pub struct FakeBackend {
    base: Url,
    state: SharedState,
    handle: ServerHandle,
}

impl FakeBackend {
    /// Start the server on the current actix runtime.
    pub fn start() -> Self {
        let state: SharedState = web::Data::from(Arc::new(Mutex::new(BackendState::default())));
        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .configure(routes)
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind fake backend");
        let addr = *server.addrs().first().expect("bound address");
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);
        let base = Url::parse(&format!("http://{addr}/")).expect("fake backend url");
        Self {
            base,
            state,
            handle,
        }
    }

    /// Base URL of the fake.
    pub fn base(&self) -> Url {
        self.base.clone()
    }

    /// Store a record directly and return its id.
    pub fn seed(&self, kind: ResourceKind, primary: Value, detail: Value) -> i64 {
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;
        let record = StoredRecord {
            primary: into_group(primary),
            detail: into_group(detail),
        };
        state
            .records
            .entry(kind.descriptor().base_path())
            .or_default()
            .insert(id, record);
        id
    }

    /// Register an account that can log in.
    pub fn seed_account(&self, email: &str, password: &str, role: &str) {
        self.lock().accounts.push(Account {
            email: email.to_owned(),
            password: password.to_owned(),
            role: role.to_owned(),
        });
    }

    /// Delay every login response.
    pub fn delay_login(&self, delay: Duration) {
        self.lock().login_delay = Some(delay);
    }

    /// Status the prediction endpoint answers with.
    pub fn set_prediction_status(&self, status: u16) {
        self.lock().prediction_status = status;
    }

    /// Number of stored records for a resource.
    pub fn record_count(&self, kind: ResourceKind) -> usize {
        self.lock()
            .records
            .get(kind.descriptor().base_path())
            .map_or(0, BTreeMap::len)
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Stop the server.
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().expect("fake backend state")
    }
}

fn into_group(value: Value) -> FieldGroup {
    match value {
        Value::Object(group) => group,
        other => panic!("seeded group must be an object, got {other}"),
    }
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/access/login", web::post().to(login))
        .route("/access/registration/{role}", web::post().to(register))
        .route("/ml/predict", web::get().to(predict))
        .route("/{resource}/get_all", web::get().to(list))
        .route("/{resource}/get_by_id/{id}", web::get().to(get_by_id))
        .route("/{resource}/add", web::post().to(add))
        .route("/{resource}/update/{id}", web::put().to(update))
        .route("/{resource}/update", web::put().to(update_profile))
        .route("/{resource}/delete/{id}", web::delete().to(remove));
}

fn detail(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "detail": message }))
}

fn resource_kind(raw: &str) -> Option<ResourceKind> {
    ResourceKind::from_base_path(raw)
}

fn not_found(kind: ResourceKind) -> HttpResponse {
    let noun = match kind {
        ResourceKind::Rides => "Ride",
        ResourceKind::Drivers => "Driver",
        ResourceKind::Mechanics => "Mechanic",
    };
    detail(StatusCode::NOT_FOUND, &format!("{noun} not found"))
}

/// Copy of `group` carrying the resource's identifier field (`ride_id` for
/// rides, `id` for accounts).
fn with_id(kind: ResourceKind, group: &FieldGroup, id: i64) -> Value {
    let mut group = group.clone();
    group.insert(kind.descriptor().id_field().to_owned(), json!(id));
    Value::Object(group)
}

fn record(state: &mut BackendState, method: &'static str, path: String, body: Option<Value>) {
    state.requests.push(RecordedRequest { method, path, body });
}

async fn login(state: SharedState, body: web::Json<Value>) -> HttpResponse {
    let body = body.into_inner();
    let delay = {
        let mut guard = state.lock().expect("state");
        record(&mut guard, "POST", "/access/login".to_owned(), Some(body.clone()));
        guard.login_delay
    };
    if let Some(delay) = delay {
        actix_rt::time::sleep(delay).await;
    }
    let guard = state.lock().expect("state");
    let account = guard.accounts.iter().find(|account| {
        body["email"] == json!(account.email) && body["password"] == json!(account.password)
    });
    match account {
        Some(account) => HttpResponse::Ok().json(json!({
            "message": "Login successful",
            "role": account.role,
        })),
        None => detail(StatusCode::UNAUTHORIZED, "Invalid email or password"),
    }
}

async fn register(
    state: SharedState,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let role = path.into_inner();
    let body = body.into_inner();
    let mut guard = state.lock().expect("state");
    record(
        &mut guard,
        "POST",
        format!("/access/registration/{role}"),
        Some(body.clone()),
    );
    let account_fields = if role == "admin" {
        &body
    } else {
        &body["user_data"]
    };
    let Some(email) = account_fields["email"].as_str() else {
        return HttpResponse::UnprocessableEntity()
            .json(json!({ "detail": [{ "loc": ["body", "email"], "msg": "field required" }] }));
    };
    if guard.accounts.iter().any(|account| account.email == email) {
        return detail(StatusCode::CONFLICT, "User with this email already exists");
    }
    let password = account_fields["password_hash"]
        .as_str()
        .unwrap_or_default()
        .to_owned();
    guard.accounts.push(Account {
        email: email.to_owned(),
        password,
        role,
    });
    HttpResponse::Ok().json(json!({ "message": "User registered" }))
}

async fn predict(state: SharedState) -> HttpResponse {
    let mut guard = state.lock().expect("state");
    record(&mut guard, "GET", "/ml/predict".to_owned(), None);
    let status = StatusCode::from_u16(guard.prediction_status).expect("valid status");
    HttpResponse::build(status).json(json!({ "status": status.as_u16() }))
}

async fn list(state: SharedState, path: web::Path<String>) -> HttpResponse {
    let resource = path.into_inner();
    let mut guard = state.lock().expect("state");
    record(&mut guard, "GET", format!("/{resource}/get_all"), None);
    let Some(kind) = resource_kind(&resource) else {
        return detail(StatusCode::NOT_FOUND, "Not Found");
    };
    let items: Vec<Value> = guard
        .records
        .get(kind.descriptor().base_path())
        .map(|records| {
            records
                .iter()
                .map(|(id, stored)| with_id(kind, &stored.primary, *id))
                .collect()
        })
        .unwrap_or_default();
    HttpResponse::Ok().json(items)
}

async fn get_by_id(state: SharedState, path: web::Path<(String, i64)>) -> HttpResponse {
    let (resource, id) = path.into_inner();
    let mut guard = state.lock().expect("state");
    record(&mut guard, "GET", format!("/{resource}/get_by_id/{id}"), None);
    let Some(kind) = resource_kind(&resource) else {
        return detail(StatusCode::NOT_FOUND, "Not Found");
    };
    let descriptor = kind.descriptor();
    match guard
        .records
        .get(descriptor.base_path())
        .and_then(|records| records.get(&id))
    {
        // Rides come back as one flat record, accounts as the two groups.
        Some(stored) if kind == ResourceKind::Rides => {
            let mut body = stored.primary.clone();
            body.extend(stored.detail.clone());
            body.insert(descriptor.id_field().to_owned(), json!(id));
            HttpResponse::Ok().json(Value::Object(body))
        }
        Some(stored) => {
            let mut body = FieldGroup::new();
            body.insert(
                descriptor.primary_key().to_owned(),
                with_id(kind, &stored.primary, id),
            );
            body.insert(
                descriptor.detail_key().to_owned(),
                with_id(kind, &stored.detail, id),
            );
            HttpResponse::Ok().json(Value::Object(body))
        }
        None => not_found(kind),
    }
}

fn split_body(kind: ResourceKind, body: &Value) -> Option<(FieldGroup, FieldGroup)> {
    let descriptor = kind.descriptor();
    let primary = body.get(descriptor.primary_key())?.as_object()?.clone();
    let detail = body.get(descriptor.detail_key())?.as_object()?.clone();
    Some((primary, detail))
}

fn missing_group() -> HttpResponse {
    HttpResponse::UnprocessableEntity()
        .json(json!({ "detail": [{ "loc": ["body"], "msg": "field required" }] }))
}

fn is_duplicate(existing: &FieldGroup, candidate: &FieldGroup) -> bool {
    match (existing.get("email"), candidate.get("email")) {
        (Some(left), Some(right)) => left == right,
        _ => existing == candidate,
    }
}

async fn add(state: SharedState, path: web::Path<String>, body: web::Json<Value>) -> HttpResponse {
    let resource = path.into_inner();
    let body = body.into_inner();
    let mut guard = state.lock().expect("state");
    record(&mut guard, "POST", format!("/{resource}/add"), Some(body.clone()));
    let Some(kind) = resource_kind(&resource) else {
        return detail(StatusCode::NOT_FOUND, "Not Found");
    };
    let Some((primary, detail_group)) = split_body(kind, &body) else {
        return missing_group();
    };
    let records = guard.records.entry(kind.descriptor().base_path()).or_default();
    if records
        .values()
        .any(|stored| is_duplicate(&stored.primary, &primary))
    {
        return detail(StatusCode::CONFLICT, "Record already exists");
    }
    let id = guard.next_id;
    guard.next_id += 1;
    guard
        .records
        .entry(kind.descriptor().base_path())
        .or_default()
        .insert(
            id,
            StoredRecord {
                primary,
                detail: detail_group,
            },
        );
    let mut body = FieldGroup::new();
    body.insert(kind.descriptor().id_field().to_owned(), json!(id));
    HttpResponse::Ok().json(Value::Object(body))
}

async fn update(
    state: SharedState,
    path: web::Path<(String, i64)>,
    body: web::Json<Value>,
) -> HttpResponse {
    let (resource, id) = path.into_inner();
    let body = body.into_inner();
    let mut guard = state.lock().expect("state");
    record(
        &mut guard,
        "PUT",
        format!("/{resource}/update/{id}"),
        Some(body.clone()),
    );
    let Some(kind) = resource_kind(&resource) else {
        return detail(StatusCode::NOT_FOUND, "Not Found");
    };
    let Some((primary, detail_group)) = split_body(kind, &body) else {
        return missing_group();
    };
    let Some(stored) = guard
        .records
        .get_mut(kind.descriptor().base_path())
        .and_then(|records| records.get_mut(&id))
    else {
        return not_found(kind);
    };
    stored.primary.extend(primary);
    stored.detail.extend(detail_group);
    HttpResponse::Ok().json(json!({ "message": "updated" }))
}

async fn update_profile(
    state: SharedState,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let resource = path.into_inner();
    let body = body.into_inner();
    let mut guard = state.lock().expect("state");
    record(&mut guard, "PUT", format!("/{resource}/update"), Some(body.clone()));
    match resource_kind(&resource) {
        Some(ResourceKind::Drivers | ResourceKind::Mechanics) => {}
        _ => return detail(StatusCode::NOT_FOUND, "Not Found"),
    }
    HttpResponse::Ok().json(json!({ "message": "profile updated" }))
}

async fn remove(state: SharedState, path: web::Path<(String, i64)>) -> HttpResponse {
    let (resource, id) = path.into_inner();
    let mut guard = state.lock().expect("state");
    record(&mut guard, "DELETE", format!("/{resource}/delete/{id}"), None);
    let Some(kind) = resource_kind(&resource) else {
        return detail(StatusCode::NOT_FOUND, "Not Found");
    };
    let removed = guard
        .records
        .get_mut(kind.descriptor().base_path())
        .and_then(|records| records.remove(&id));
    match removed {
        Some(_) => HttpResponse::Ok().json(json!({ "message": "deleted" })),
        None => not_found(kind),
    }
}
