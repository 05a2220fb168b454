use actix_cors::Cors;
use actix_web::dev::ServerHandle;
use actix_web::{post, web, App, HttpResponse, HttpServer, Responder};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::domain::error::{AppError, Result};

/// Only pages under this host are graded.
const SUPPORTED_HOST_MARKER: &str = "huggingface.co";

static SCORE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)overall\s*score[^0-9]*([0-9]{1,3})").unwrap());

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
    pub delay_ms: Option<u64>,
}

impl CannedResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay_ms: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ReportSource {
    Canned(CannedResponse),
    /// A filled review whose overall score is extracted on every request.
    Markdown(PathBuf),
}

#[derive(Debug, Clone)]
pub struct DevBackendConfig {
    pub port: u16,
    pub source: ReportSource,
}

impl DevBackendConfig {
    pub fn canned(port: u16, response: CannedResponse) -> Self {
        Self {
            port,
            source: ReportSource::Canned(response),
        }
    }

    pub fn markdown(port: u16, path: PathBuf) -> Self {
        Self {
            port,
            source: ReportSource::Markdown(path),
        }
    }
}

pub struct RunningDevBackend {
    pub addr: SocketAddr,
    pub handle: ServerHandle,
}

impl RunningDevBackend {
    pub fn grade_endpoint(&self) -> String {
        format!("http://{}/grade", self.addr)
    }
}

#[derive(Deserialize)]
pub struct GradeRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct GradeResponse {
    pub score: Option<f64>,
    pub label: Option<String>,
    pub details: Option<String>,
    pub filled_markdown: Option<String>,
}

/// Pulls the overall score out of a filled review, clamped to 0-100.
pub fn extract_score(filled_md: &str) -> Option<f64> {
    let captures = SCORE_PATTERN.captures(filled_md)?;
    let score: f64 = captures.get(1)?.as_str().parse().ok()?;
    Some(score.clamp(0.0, 100.0))
}

pub fn score_label(score: Option<f64>) -> Option<&'static str> {
    let score = score?;
    Some(if score >= 85.0 {
        "Excellent"
    } else if score >= 70.0 {
        "Good"
    } else if score >= 50.0 {
        "Fair"
    } else {
        "Poor"
    })
}

pub fn report_from_markdown(filled_md: String) -> GradeResponse {
    let score = extract_score(&filled_md);
    let details = if score.is_some() {
        "Score parsed from evaluation template."
    } else {
        "Could not parse score."
    };
    GradeResponse {
        score,
        label: score_label(score).map(str::to_string),
        details: Some(details.to_string()),
        filled_markdown: Some(filled_md),
    }
}

#[post("/grade")]
async fn grade(data: web::Data<DevBackendConfig>, req: web::Json<GradeRequest>) -> impl Responder {
    info!(url = %req.url, "Dev backend received grade request");

    if !req.url.contains(SUPPORTED_HOST_MARKER) {
        return HttpResponse::BadRequest().body("Only Hugging Face URLs are supported");
    }

    match &data.source {
        ReportSource::Canned(canned) => {
            if let Some(delay_ms) = canned.delay_ms.filter(|ms| *ms > 0) {
                sleep(Duration::from_millis(delay_ms)).await;
            }
            let status = actix_web::http::StatusCode::from_u16(canned.status)
                .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
            HttpResponse::build(status)
                .content_type("application/json")
                .body(canned.body.clone())
        }
        ReportSource::Markdown(path) => match tokio::fs::read_to_string(path).await {
            Ok(filled_md) => HttpResponse::Ok().json(report_from_markdown(filled_md)),
            Err(err) => {
                warn!(error = %err, path = %path.display(), "Failed to read review markdown");
                HttpResponse::InternalServerError()
                    .body(format!("Failed to evaluate model card: {}", err))
            }
        },
    }
}

/// Binds the backend and spawns it on the current runtime.
/// Port 0 picks a free port; the bound address is returned.
pub async fn start_dev_backend(config: DevBackendConfig) -> Result<RunningDevBackend> {
    let port = config.port;
    let data = web::Data::new(config);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(data.clone())
            .service(grade)
    })
    .workers(1)
    .bind(("127.0.0.1", port))
    .map_err(|err| AppError::Internal(format!("Failed to bind dev backend: {}", err)))?;

    let addr = server
        .addrs()
        .first()
        .copied()
        .ok_or_else(|| AppError::Internal("Dev backend bound no address".to_string()))?;

    let server = server.run();
    let handle = server.handle();
    tokio::spawn(server);

    info!(addr = %addr, "Dev backend started on http://{}", addr);
    Ok(RunningDevBackend { addr, handle })
}
