use std::{collections::BTreeMap, collections::HashMap, sync::Arc};

use axum::{
    body::{to_bytes, Bytes},
    extract::{FromRequest, Multipart, Query, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

/// Template document served when no `PAYLOADS_FILE` is configured.
pub const DEFAULT_PAYLOADS: &str = include_str!("../static/apiPayloads.json");

/// One accepted `/uploadPorterData` submission.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadRecord {
    pub order_file: String,
    pub order_bytes: usize,
    pub driver_file: String,
    pub driver_bytes: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EchoFile {
    pub field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: usize,
}

/// What `/echo` saw. Multipart bodies are reported as `fields`/`files`,
/// anything else as the raw `body` text.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
    pub fields: Vec<(String, String)>,
    pub files: Vec<EchoFile>,
}

pub type Uploads = Arc<RwLock<Vec<UploadRecord>>>;

#[derive(Clone)]
pub struct AppState {
    payloads: Arc<Value>,
    uploads: Uploads,
}

impl AppState {
    pub fn uploads(&self) -> Uploads {
        self.uploads.clone()
    }
}

pub fn app() -> Router {
    // Checked by `default_payloads_parse`.
    let payloads = serde_json::from_str(DEFAULT_PAYLOADS).unwrap_or(Value::Null);
    app_with_payloads(payloads).0
}

/// Router serving `payloads`, plus a handle on the recorded uploads.
pub fn app_with_payloads(payloads: Value) -> (Router, AppState) {
    let state = AppState {
        payloads: Arc::new(payloads),
        uploads: Arc::new(RwLock::new(Vec::new())),
    };
    let router = Router::new()
        .route("/static/apiPayloads.json", get(api_payloads))
        .route("/uploadPorterData", post(upload_porter_data))
        .route("/echo", any(echo))
        .route("/echo/{*rest}", any(echo))
        .with_state(state.clone());
    (router, state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn api_payloads(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    if state.payloads.is_object() {
        Ok(Json(state.payloads.as_ref().clone()))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

fn rejected(message: String) -> (StatusCode, Json<Value>) {
    warn!(%message, "upload rejected");
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

async fn upload_porter_data(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let mut files: HashMap<String, (String, Bytes)> = HashMap::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return rejected(format!("malformed multipart body: {err}")),
        };
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        match field.bytes().await {
            Ok(bytes) => {
                files.insert(name, (file_name, bytes));
            }
            Err(err) => return rejected(format!("could not read {name}: {err}")),
        }
    }

    let mut take = |field: &str| match files.remove(field) {
        Some((_, bytes)) if bytes.is_empty() => Err(format!("{field} is empty")),
        Some((file_name, bytes)) => Ok((file_name, bytes.len())),
        None => Err(format!("{field} is required")),
    };
    let (order_file, order_bytes) = match take("order_data") {
        Ok(file) => file,
        Err(message) => return rejected(message),
    };
    let (driver_file, driver_bytes) = match take("driver_data") {
        Ok(file) => file,
        Err(message) => return rejected(message),
    };

    info!(%order_file, order_bytes, %driver_file, driver_bytes, "porter data uploaded");
    state.uploads.write().await.push(UploadRecord {
        order_file,
        order_bytes,
        driver_file,
        driver_bytes,
    });
    (StatusCode::OK, Json(json!({ "Success": "YES" })))
}

/// Reflect the request back as JSON. `?status=NNN` sets the response status.
async fn echo(request: Request) -> Result<(StatusCode, Json<Echo>), StatusCode> {
    let status = Query::<HashMap<String, String>>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(params)| params.get("status").and_then(|s| s.parse::<u16>().ok()))
        .map(StatusCode::from_u16)
        .transpose()
        .map_err(|_| StatusCode::BAD_REQUEST)?
        .unwrap_or(StatusCode::OK);

    let mut echo = Echo {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        headers: request
            .headers()
            .iter()
            .map(|(name, value)| {
                (name.to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned())
            })
            .collect(),
        ..Echo::default()
    };

    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    if is_multipart {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;
        while let Some(field) = multipart.next_field().await.map_err(|e| e.status())? {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let size = field.bytes().await.map_err(|e| e.status())?.len();
                    echo.files.push(EchoFile {
                        field: name,
                        file_name,
                        content_type,
                        size,
                    });
                }
                None => {
                    let value = field.text().await.map_err(|e| e.status())?;
                    echo.fields.push((name, value));
                }
            }
        }
    } else {
        let bytes = to_bytes(request.into_body(), usize::MAX)
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;
        if !bytes.is_empty() {
            echo.body = Some(String::from_utf8_lossy(&bytes).into_owned());
        }
    }

    Ok((status, Json(echo)))
}
