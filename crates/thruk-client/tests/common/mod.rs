//! In-process fake of the Thruk configuration API
//!
//! Models staged vs saved configuration, enforces basic auth, counts
//! requests and resolves `check_command` references on check/reload.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use base64::Engine;
use serde_json::json;
use thruk_client::{ClientConfig, ConfigObject, ThrukClient};
use tokio::task::JoinHandle;

pub const SITE: &str = "demo";
pub const USERNAME: &str = "omdadmin";
pub const PASSWORD: &str = "omdadmin";
pub const PEER_KEY: &str = "48f1c";

const KNOWN_TYPES: &[&str] = &[
    "host",
    "hostgroup",
    "service",
    "servicegroup",
    "command",
    "contact",
    "contactgroup",
    "timeperiod",
];

#[derive(Debug, Default)]
struct Store {
    staged: BTreeMap<String, ConfigObject>,
    saved: BTreeMap<String, ConfigObject>,
    next_id: u32,
    requests: usize,
    reject_writes: bool,
}

impl Store {
    fn assign_id(&mut self) -> String {
        self.next_id += 1;
        format!("{:05x}", 0x7121a + self.next_id)
    }

    /// Errors for objects whose check command is not defined
    fn check_errors(&self) -> Vec<String> {
        let commands: BTreeSet<&str> = self
            .saved
            .values()
            .filter(|o| o.object_type == "command")
            .filter_map(|o| o.command_name.as_deref())
            .collect();

        self.saved
            .values()
            .filter_map(|o| {
                let check = o.check_command.as_deref()?;
                let name = check.split('!').next().unwrap_or_default();
                if name.is_empty() || commands.contains(name) {
                    return None;
                }
                Some(format!(
                    "Error: {} check command '{}' specified in {} not defined anywhere!",
                    o.object_type, name, o.file
                ))
            })
            .collect()
    }
}

type Shared = Arc<Mutex<Store>>;

/// Running fake server bound to an ephemeral local port
pub struct FakeThruk {
    pub url: String,
    store: Shared,
    handle: JoinHandle<()>,
}

impl std::fmt::Debug for FakeThruk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeThruk").field("url", &self.url).finish()
    }
}

impl Drop for FakeThruk {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl FakeThruk {
    pub async fn start() -> Self {
        let store: Shared = Arc::default();
        let prefix = format!("/{}/thruk/r/config", SITE);

        let router = Router::new()
            .route(&format!("{prefix}/objects"), get(list_objects))
            .route(&format!("{prefix}/objects/"), post(create_object))
            .route(&format!("{prefix}/objects/{{id}}"), delete(delete_object))
            .route(&format!("{prefix}/discard"), post(discard))
            .route(&format!("{prefix}/save"), post(save))
            .route(&format!("{prefix}/check"), post(check))
            .route(&format!("{prefix}/reload"), post(reload))
            .with_state(Arc::clone(&store));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        Self {
            url: format!("http://{}", addr),
            store,
            handle,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.url, SITE, USERNAME, PASSWORD)
    }

    pub fn client(&self) -> ThrukClient {
        ThrukClient::new(&self.config()).unwrap()
    }

    /// Number of requests that reached the server, authorized or not
    pub fn request_count(&self) -> usize {
        self.store.lock().unwrap().requests
    }

    /// Insert an already saved object and return its id
    pub fn seed(&self, mut object: ConfigObject) -> String {
        let mut store = self.store.lock().unwrap();
        let id = match object.id.clone() {
            Some(id) => id,
            None => store.assign_id(),
        };
        object.id = Some(id.clone());
        object.peer_key.get_or_insert_with(|| PEER_KEY.to_string());
        store.staged.insert(id.clone(), object.clone());
        store.saved.insert(id.clone(), object);
        id
    }

    /// Make every create request fail with 500
    pub fn reject_writes(&self) {
        self.store.lock().unwrap().reject_writes = true;
    }

    pub fn staged_count(&self) -> usize {
        self.store.lock().unwrap().staged.len()
    }
}

fn authorize(store: &Shared, headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(format!("{USERNAME}:{PASSWORD}"))
    );
    store.lock().unwrap().requests += 1;

    match headers.get(header::AUTHORIZATION) {
        Some(value) if value.as_bytes() == expected.as_bytes() => Ok(()),
        _ => Err((StatusCode::UNAUTHORIZED, "authentication required").into_response()),
    }
}

async fn list_objects(
    State(store): State<Shared>,
    headers: HeaderMap,
    Query(filter): Query<HashMap<String, String>>,
) -> Response {
    if let Err(denied) = authorize(&store, &headers) {
        return denied;
    }
    let store = store.lock().unwrap();
    let objects: Vec<ConfigObject> = store
        .staged
        .values()
        .filter(|o| filter.get(":TYPE").is_none_or(|t| &o.object_type == t))
        .filter(|o| filter.get(":ID").is_none_or(|id| o.id.as_ref() == Some(id)))
        .cloned()
        .collect();
    Json(objects).into_response()
}

async fn create_object(
    State(store): State<Shared>,
    headers: HeaderMap,
    Json(mut object): Json<ConfigObject>,
) -> Response {
    if let Err(denied) = authorize(&store, &headers) {
        return denied;
    }
    let mut store = store.lock().unwrap();
    if store.reject_writes {
        return (StatusCode::INTERNAL_SERVER_ERROR, "write rejected").into_response();
    }
    if object.file.is_empty() {
        return (StatusCode::BAD_REQUEST, "missing :FILE").into_response();
    }
    if !KNOWN_TYPES.contains(&object.object_type.as_str()) {
        return Json(json!({
            "count": 0,
            "message": format!("unknown type {}", object.object_type),
            "objects": []
        }))
        .into_response();
    }

    let id = store.assign_id();
    object.id = Some(id.clone());
    object.peer_key = Some(PEER_KEY.to_string());
    object.readonly = Some(0);
    object.file = format!("/omd/sites/{}/etc/naemon/conf.d/{}:0", SITE, object.file);
    store.staged.insert(id, object.clone());

    Json(json!({
        "count": 1,
        "message": "1 objects successfully created",
        "objects": [object]
    }))
    .into_response()
}

async fn delete_object(
    State(store): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(denied) = authorize(&store, &headers) {
        return denied;
    }
    match store.lock().unwrap().staged.remove(&id) {
        Some(_) => Json(json!({"count": 1, "message": "removed 1 objects"})).into_response(),
        None => (StatusCode::NOT_FOUND, "no such object").into_response(),
    }
}

async fn discard(State(store): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&store, &headers) {
        return denied;
    }
    let mut store = store.lock().unwrap();
    store.staged = store.saved.clone();
    Json(json!({"message": "successfully discarded changes"})).into_response()
}

async fn save(State(store): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&store, &headers) {
        return denied;
    }
    let mut store = store.lock().unwrap();
    store.saved = store.staged.clone();
    Json(json!({"message": "successfully saved changes"})).into_response()
}

async fn check(State(store): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&store, &headers) {
        return denied;
    }
    let errors = store.lock().unwrap().check_errors();
    let output = if errors.is_empty() {
        "Things look okay - No serious problems were detected".to_string()
    } else {
        errors.join("\n")
    };
    Json(json!([{"failed": !errors.is_empty(), "output": output}])).into_response()
}

async fn reload(State(store): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&store, &headers) {
        return denied;
    }
    let errors = store.lock().unwrap().check_errors();
    let output = if errors.is_empty() {
        "reloaded".to_string()
    } else {
        format!("reload failed\n{}", errors.join("\n"))
    };
    Json(json!([{
        "failed": !errors.is_empty(),
        "output": output,
        "peer_key": PEER_KEY
    }]))
    .into_response()
}

/// Saved host template matching the demo site's `histou.cfg`
pub fn host_perf_template() -> ConfigObject {
    let mut object = ConfigObject::new("host", "/omd/sites/demo/etc/naemon/conf.d/histou.cfg:5");
    object.id = Some("8e4f0".to_string());
    object.readonly = Some(0);
    object.name = Some("host-perf".to_string());
    object.action_url = Some(
        "/demo/grafana/dashboard/script/histou.js?host=$HOSTNAME$&theme=light&annotations=true"
            .to_string(),
    );
    object.process_perf_data = Some("1".to_string());
    object.register = Some("0".to_string());
    object
}
