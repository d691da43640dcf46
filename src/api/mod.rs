use axum::{
    routing::{delete, get, post},
    Router,
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{CorsLayer, Any};
use uuid::Uuid;
use validator::Validate;

use crate::food::analysis::nutrition::NutritionClient;
use crate::food::macros::MacroShare;
use crate::food::models::{DailyTotals, LogEntry, NutritionEstimate};
use crate::shell::{AppShell, RequestStatus};

#[derive(Clone)]
pub struct AppState {
    shell: Arc<RwLock<AppShell>>,
    client: Arc<NutritionClient>,
}

impl AppState {
    pub fn new(client: NutritionClient) -> Self {
        Self {
            shell: Arc::new(RwLock::new(AppShell::new())),
            client: Arc::new(client),
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1))]
    query: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse {
    status: String,
}

/// Everything a page needs to render the current session.
#[derive(Serialize, Debug)]
pub struct ShellView {
    query: String,
    status: RequestStatus,
    can_submit: bool,
    result: Option<NutritionEstimate>,
    macros: Vec<MacroShare>,
    error: Option<String>,
    log: Vec<LogEntry>,
    totals: DailyTotals,
}

impl From<&AppShell> for ShellView {
    fn from(shell: &AppShell) -> Self {
        Self {
            query: shell.query().to_string(),
            status: shell.status(),
            can_submit: shell.can_submit(),
            result: shell.current().cloned(),
            macros: shell.macro_breakdown(),
            error: shell.error_message().map(String::from),
            log: shell.log().newest_first().cloned().collect(),
            totals: shell.totals(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct LogView {
    entries: Vec<LogEntry>,
    totals: DailyTotals,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiResponse>)>;

fn api_error(code: StatusCode, status: impl Into<String>) -> (StatusCode, Json<ApiResponse>) {
    (code, Json(ApiResponse { status: status.into() }))
}

/// Create and configure the API router
pub fn create_api(client: NutritionClient) -> Router {
    create_router(AppState::new(client))
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health_check))
        .route("/state", get(state_handler))
        .route("/search", post(search_handler))
        .route("/log", get(log_handler).post(add_handler))
        .route("/log/:id", delete(remove_handler))
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<ApiResponse> {
    Json(ApiResponse { status: "ok".to_string() })
}

async fn state_handler(State(state): State<AppState>) -> Json<ShellView> {
    let shell = state.shell.read().await;
    Json(ShellView::from(&*shell))
}

async fn search_handler(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<ShellView> {
    if let Err(e) = request.validate() {
        return Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, format!("Invalid query: {}", e)));
    }
    if request.query.trim().is_empty() {
        return Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, "Please describe a food to analyze."));
    }

    // The lock is released while the estimation call is in flight; the
    // Loading status keeps any other submission out.
    let (query, generation) = {
        let mut shell = state.shell.write().await;
        if shell.status() == RequestStatus::Loading {
            return Err(api_error(StatusCode::CONFLICT, "A request is already in flight"));
        }
        shell.set_query(request.query);
        let query = shell.begin_search().ok_or_else(|| {
            api_error(StatusCode::UNPROCESSABLE_ENTITY, "Please describe a food to analyze.")
        })?;
        (query, shell.search_generation())
    };

    let mut pending = PendingSearch::new(state.shell.clone(), generation);
    let outcome = state.client.estimate(&query).await;

    let mut shell = state.shell.write().await;
    shell.finish_search(outcome);
    pending.settle();
    Ok(Json(ShellView::from(&*shell)))
}

/// Takes the shell out of Loading if the search handler is dropped (client
/// disconnect) before it could apply the outcome.
struct PendingSearch {
    shell: Arc<RwLock<AppShell>>,
    generation: u64,
    settled: bool,
}

impl PendingSearch {
    fn new(shell: Arc<RwLock<AppShell>>, generation: u64) -> Self {
        Self { shell, generation, settled: false }
    }

    fn settle(&mut self) {
        self.settled = true;
    }
}

impl Drop for PendingSearch {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        let shell = self.shell.clone();
        let generation = self.generation;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    shell.write().await.abandon_search(generation);
                });
            }
            Err(_) => {
                if let Ok(mut shell) = shell.try_write() {
                    shell.abandon_search(generation);
                }
            }
        }
    }
}

async fn add_handler(State(state): State<AppState>) -> ApiResult<ShellView> {
    let mut shell = state.shell.write().await;
    if shell.add_to_log().is_none() {
        return Err(api_error(StatusCode::CONFLICT, "No result to add"));
    }
    Ok(Json(ShellView::from(&*shell)))
}

async fn remove_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ShellView> {
    let mut shell = state.shell.write().await;
    // An id that is not a UUID cannot match any entry
    if let Ok(id) = Uuid::parse_str(&id) {
        shell.remove_from_log(id);
    }
    Json(ShellView::from(&*shell))
}

async fn log_handler(State(state): State<AppState>) -> Json<LogView> {
    let shell = state.shell.read().await;
    Json(LogView {
        entries: shell.log().newest_first().cloned().collect(),
        totals: shell.totals(),
    })
}
