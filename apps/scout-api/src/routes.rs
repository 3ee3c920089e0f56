use axum::{
	Json, Router,
	extract::{Query, Request, State, rejection::JsonRejection},
	http::{HeaderMap, StatusCode, header::AUTHORIZATION},
	middleware::{self, Next},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use scout_service::{Error as ServiceError, SearchRequest, SearchResponse, SearchUser};

use crate::state::AppState;

pub const HEADER_USER_ID: &str = "x-scout-user-id";
pub const HEADER_USER_NAME: &str = "x-scout-user-name";

#[derive(Debug, Deserialize)]
struct SearchParams {
	#[serde(default)]
	query: Option<String>,
	#[serde(rename = "type", default)]
	search_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message),
			err if err.is_upstream() => {
				tracing::warn!(error = %err, "Search failed upstream.");

				Self::new(StatusCode::SERVICE_UNAVAILABLE, "UPSTREAM_UNAVAILABLE", err.to_string())
			},
			ServiceError::Configuration { message } => {
				tracing::error!(message = message.as_str(), "Search is misconfigured.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR", message)
			},
			err => {
				tracing::error!(error = %err, "Search failed.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", err.to_string())
			},
		}
	}
}
impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", rejection.body_text())
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/v1/search", get(search_query).post(search_body))
		.route_layer(middleware::from_fn_with_state(state.clone(), api_auth_middleware))
		.route("/health", get(health))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new().route("/v1/admin/cache/clear", post(clear_cache)).with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search_body(
	State(state): State<AppState>,
	headers: HeaderMap,
	payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
	let Json(mut payload) = payload?;
	payload.user = read_user(&headers);
	let response = state.service.search(payload).await?;

	Ok(Json(response))
}

async fn search_query(
	State(state): State<AppState>,
	headers: HeaderMap,
	Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
	let payload = SearchRequest {
		query: params.query.unwrap_or_default(),
		search_type: params.search_type,
		user: read_user(&headers),
	};
	let response = state.service.search(payload).await?;

	Ok(Json(response))
}

async fn clear_cache(State(state): State<AppState>) -> StatusCode {
	state.service.clear_cache();

	StatusCode::NO_CONTENT
}

async fn api_auth_middleware(State(state): State<AppState>, req: Request, next: Next) -> Response {
	if let Some(expected) = state.api_auth_token.as_deref()
		&& read_bearer_token(req.headers()) != Some(expected)
	{
		return ApiError::new(
			StatusCode::UNAUTHORIZED,
			"UNAUTHORIZED",
			"Authentication required with a Bearer token.",
		)
		.into_response();
	}

	next.run(req).await
}

fn read_bearer_token(headers: &HeaderMap) -> Option<&str> {
	let raw = headers.get(AUTHORIZATION)?;
	let value = raw.to_str().ok()?.trim();
	let token = value.strip_prefix("Bearer ")?.trim();
	if token.is_empty() { None } else { Some(token) }
}

fn read_header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
	headers
		.get(name)
		.and_then(|value| value.to_str().ok())
		.map(str::trim)
		.filter(|value| !value.is_empty())
}

/// Identity forwarded by the fronting authentication layer, if any.
fn read_user(headers: &HeaderMap) -> Option<SearchUser> {
	let id = read_header(headers, HEADER_USER_ID)?;

	Some(SearchUser {
		id: id.to_string(),
		name: read_header(headers, HEADER_USER_NAME).map(str::to_string),
	})
}
