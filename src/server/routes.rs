use crate::catalog::{CatalogStore, Refresher};
use crate::config::AppConfig;
use crate::matcher::{Matcher, ScoringMatcher};
use crate::parser::{DescriptionParser, Parser};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<CatalogStore>,
    pub refresher: Arc<Refresher>,
    pub parser: DescriptionParser,
    pub matcher: ScoringMatcher,
}

#[derive(Deserialize)]
struct MatchRequest {
    description: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchResponse {
    input: String,
    vehicle_id: String,
    confidence: u8,
}

pub struct HttpApi;

impl HttpApi {
    pub async fn start(state: Arc<AppState>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state.clone()))
                .route("/status", web::get().to(status))
                .route("/match", web::post().to(match_description))
                .route("/admin/cache/reload", web::post().to(reload_cache))
                .default_service(web::route().to(not_found))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

async fn status(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    let snapshot = state.store.current().await;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "vehicles": snapshot.vehicle_count(),
        "snapshotLoadedAt": snapshot.loaded_at,
    })))
}

async fn match_description(
    state: web::Data<Arc<AppState>>,
    body: web::Json<MatchRequest>,
) -> ActixResult<HttpResponse> {
    let started = Instant::now();

    let description = match body.description.as_deref() {
        Some(d) if !d.trim().is_empty() => d,
        _ => {
            warn!("Bad match request, missing description");
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": "description (string) is required"
            })));
        }
    };

    info!("Match request: \"{}\"", description);
    let attrs = state.parser.parse(description);
    debug!("Parsed attributes: {:?}", attrs);

    let snapshot = state.store.current().await;
    let result = state.matcher.find_best_match(&attrs, &snapshot);
    debug!("Match result: {:?}", result);

    match result.vehicle_id {
        None => {
            warn!("No vehicle matched");
            Ok(HttpResponse::NotFound().json(serde_json::json!({
                "input": description,
                "error": "No match",
                "confidence": 0,
            })))
        }
        Some(vehicle_id) => {
            info!(
                "Matched vehicle={} confidence={} in {}ms",
                vehicle_id,
                result.confidence,
                started.elapsed().as_millis()
            );
            Ok(HttpResponse::Ok().json(MatchResponse {
                input: description.to_string(),
                vehicle_id,
                confidence: result.confidence,
            }))
        }
    }
}

async fn reload_cache(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
) -> ActixResult<HttpResponse> {
    let token = req
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok());

    if state.config.admin_token.is_empty() || token != Some(state.config.admin_token.as_str()) {
        warn!("Rejected cache reload: bad or missing admin token");
        return Ok(HttpResponse::Forbidden().json(serde_json::json!({ "error": "Forbidden" })));
    }

    match state.refresher.refresh().await {
        Ok(summary) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "status": "cache reloaded",
            "vehicles": summary.vehicles,
            "countedVehicles": summary.counted_vehicles,
        }))),
        Err(e) => {
            error!("Manual cache reload failed: {e}");
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Reload failed",
                "details": e.to_string(),
            })))
        }
    }
}

async fn not_found() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::NotFound().json(serde_json::json!({ "error": "Route not found" })))
}
