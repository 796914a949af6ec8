use crate::application::parameter_store::ParameterStore;
use crate::application::use_cases::risk_analysis::RiskAnalysisUseCase;
use crate::application::use_cases::risk_flags::risk_flags;
use crate::application::use_cases::tab_export::{export, EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};
use crate::application::use_cases::tabular_import::import_bytes;
use crate::domain::error::{AppError, ImportError};
use crate::domain::field_schema::{fields, FieldKey};
use crate::domain::llm_config::LLMConfig;
use crate::domain::prediction::AnalysisRecord;
use crate::infrastructure::config::ServerConfig;
use actix_cors::Cors;
use actix_web::{
    dev::Server, get, patch, post, web, App, HttpResponse, HttpServer, Responder, Scope,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::{error, info, warn};

const MAX_LOG_ENTRIES: usize = 100;
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

/// Everything the routes share. The form state has one owner; the mutexes
/// are only held for synchronous reads and writes, never across an await.
pub struct HttpState {
    pub llm_config: LLMConfig,
    pub risk_analysis: RiskAnalysisUseCase,
    pub store: Mutex<ParameterStore>,
    pub last_result: Mutex<Option<AnalysisRecord>>,
    pub analysis_in_flight: AtomicBool,
    pub logs: Mutex<Vec<LogEntry>>,
}

impl HttpState {
    pub fn new(llm_config: LLMConfig, risk_analysis: RiskAnalysisUseCase) -> Self {
        Self {
            llm_config,
            risk_analysis,
            store: Mutex::new(ParameterStore::new()),
            last_result: Mutex::new(None),
            analysis_in_flight: AtomicBool::new(false),
            logs: Mutex::new(Vec::new()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Number(f64),
}

#[derive(Deserialize)]
struct FieldEdit {
    value: RawValue,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Resets the in-flight flag when the analysis request finishes.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn error_kind(err: &AppError) -> &'static str {
    match err {
        AppError::Internal(_) => "Internal",
        AppError::NotFound(_) => "NotFound",
        AppError::ValidationError(_) => "ValidationError",
        AppError::ParseError(_) => "ParseError",
        AppError::Import(ImportError::NoDataRowFound) => "NoDataRowFound",
        AppError::Import(ImportError::IncompleteRow { .. }) => "IncompleteRow",
        AppError::LLMError(_) | AppError::AnalysisUnavailable(_) => "AnalysisUnavailable",
        AppError::ConfigError(_) => "ConfigError",
        AppError::IoError(_) => "IoError",
    }
}

fn error_response(err: &AppError) -> HttpResponse {
    let body = ErrorBody {
        error: error_kind(err).to_string(),
        message: err.user_message(),
    };
    match err {
        AppError::NotFound(_) => HttpResponse::NotFound().json(body),
        AppError::ValidationError(_) | AppError::ParseError(_) => {
            HttpResponse::BadRequest().json(body)
        }
        AppError::Import(_) => HttpResponse::UnprocessableEntity().json(body),
        AppError::LLMError(_) | AppError::AnalysisUnavailable(_) => {
            HttpResponse::BadGateway().json(body)
        }
        _ => HttpResponse::InternalServerError().json(body),
    }
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

#[get("/schema")]
async fn get_schema() -> impl Responder {
    HttpResponse::Ok().json(fields())
}

#[get("/parameters")]
async fn get_parameters(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(lock(&data.store).snapshot())
}

#[patch("/parameters/{key}")]
async fn edit_parameter(
    data: web::Data<HttpState>,
    path: web::Path<String>,
    req: web::Json<FieldEdit>,
) -> impl Responder {
    let key = match path.parse::<FieldKey>() {
        Ok(key) => key,
        Err(e) => return error_response(&e),
    };
    let raw = match &req.value {
        RawValue::Text(text) => text.clone(),
        RawValue::Number(number) => number.to_string(),
    };

    let snapshot = {
        let mut store = lock(&data.store);
        store.set_field(key, &raw);
        store.snapshot()
    };
    HttpResponse::Ok().json(snapshot)
}

#[post("/import")]
async fn import_file(data: web::Data<HttpState>, body: web::Bytes) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "Import",
        &format!("Importing uploaded file ({} bytes)", body.len()),
    );

    match import_bytes(&body) {
        Ok(set) => {
            let snapshot = {
                let mut store = lock(&data.store);
                store.replace_all(set);
                store.snapshot()
            };
            info!("Form autofilled from uploaded file");
            HttpResponse::Ok().json(snapshot)
        }
        Err(e) => {
            let err = AppError::from(e);
            warn!(error = %err, "Import rejected");
            add_log(&data.logs, "WARN", "Import", &err.to_string());
            error_response(&err)
        }
    }
}

#[get("/export")]
async fn export_file(data: web::Data<HttpState>) -> impl Responder {
    let snapshot = lock(&data.store).snapshot();
    match export(&snapshot) {
        Ok(text) => HttpResponse::Ok()
            .content_type(EXPORT_CONTENT_TYPE)
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ))
            .body(text),
        Err(e) => {
            error!(error = %e, "Export failed");
            error_response(&e)
        }
    }
}

#[get("/flags")]
async fn get_flags(data: web::Data<HttpState>) -> impl Responder {
    let snapshot = lock(&data.store).snapshot();
    HttpResponse::Ok().json(risk_flags(&snapshot))
}

#[post("/analyze")]
async fn analyze(data: web::Data<HttpState>) -> impl Responder {
    let Some(_guard) = InFlightGuard::acquire(&data.analysis_in_flight) else {
        return HttpResponse::Conflict().json(ErrorBody {
            error: "AnalysisInProgress".to_string(),
            message: "An analysis is already running.".to_string(),
        });
    };

    let snapshot = lock(&data.store).snapshot();
    add_log(
        &data.logs,
        "INFO",
        "Analysis",
        &format!("Submitting parameters (model={})", data.llm_config.model),
    );

    match data.risk_analysis.execute(&data.llm_config, snapshot).await {
        Ok(record) => {
            *lock(&data.last_result) = Some(record.clone());
            add_log(
                &data.logs,
                "INFO",
                "Analysis",
                &format!(
                    "Analysis {} finished: {:?} ({})",
                    record.id, record.result.risk_level, record.result.risk_score
                ),
            );
            HttpResponse::Ok().json(record)
        }
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Analysis",
                &format!("Analysis failed: {}", e),
            );
            error_response(&e)
        }
    }
}

#[get("/result")]
async fn get_result(data: web::Data<HttpState>) -> impl Responder {
    match lock(&data.last_result).clone() {
        Some(record) => HttpResponse::Ok().json(record),
        None => error_response(&AppError::NotFound("No analysis yet".to_string())),
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = lock(&data.logs);
    HttpResponse::Ok().json(&*logs)
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = lock(logs);
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
        .service(health)
        .service(get_schema)
        .service(get_parameters)
        .service(edit_parameter)
        .service(import_file)
        .service(export_file)
        .service(get_flags)
        .service(analyze)
        .service(get_result)
        .service(get_logs)
}

pub fn start_server(
    state: web::Data<HttpState>,
    server_config: &ServerConfig,
) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Browser front end may be served from another origin

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(api_scope())
    })
    .bind((server_config.host.as_str(), server_config.port))?
    .run();

    Ok(server)
}
