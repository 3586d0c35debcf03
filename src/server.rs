//! HTTP surface over the palette service

use std::sync::Arc;
use axum::{
  extract::{rejection::JsonRejection, State},
  http::{header, Method, StatusCode},
  response::{IntoResponse, Response},
  routing::{get, post},
  Json, Router,
};
use log::{debug, warn};
use tower_http::cors::{Any, CorsLayer};
use crate::failover::PaletteService;
use crate::request::{ErrorResponse, HealthResponse, PaletteRequest};

pub type AppState = Arc<PaletteService>;

/// Routes are served both at the root and under `/api`
pub fn router(service: PaletteService) -> Router
{   let cors = CorsLayer::new()
      .allow_origin(Any)
      .allow_methods([
        Method::GET, Method::POST, Method::PUT,
        Method::DELETE, Method::OPTIONS,
      ])
      .allow_headers([
        header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION,
      ]);

    let routes = Router::new()
      .route("/health", get(health_check))
      .route("/generate-palette", post(generate_palette));

    Router::new()
      .merge(routes.clone())
      .nest("/api", routes)
      .layer(cors)
      .with_state(Arc::new(service))
}

pub async fn health_check() -> Json<HealthResponse>
{   Json(HealthResponse::default())
}

pub async fn generate_palette(
  State(service): State<AppState>
, payload: Result<Json<PaletteRequest>, JsonRejection>
) -> Response
{   let Json(request) = match payload
    {   Ok(body) => body
      , Err(rejection) => {
          warn!("Rejected palette request: {}", rejection.body_text());
          return bad_request(rejection.body_text());
        }
    };

    match service.handle(&request).await
    {   Ok(response) => {
          debug!("Returning {} colors", response.colors.len());
          (StatusCode::OK, Json(response)).into_response()
        }
      , Err(e) => {
          warn!("Rejected palette request: {}", e);
          bad_request(e.to_string())
        }
    }
}

fn bad_request(message: String) -> Response
{   (
      StatusCode::BAD_REQUEST,
      Json(ErrorResponse { error: message }),
    ).into_response()
}
