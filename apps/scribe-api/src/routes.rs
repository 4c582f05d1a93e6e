use axum::{
	Json, Router,
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::{Deserialize, Serialize};

use scribe_content::PostMeta;
use scribe_search::{
	Error, FullTextRequest, FullTextResponse, MetadataHit, SearchOptions, TagCount,
};

use crate::state::AppState;

pub const UNAVAILABLE_MESSAGE: &str = "Search service is temporarily unavailable.";

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
	#[serde(default)]
	pub q: String,
	pub limit: Option<String>,
	pub tags: Option<String>,
	pub author: Option<String>,
}
impl SearchParams {
	fn tags(&self) -> Vec<String> {
		self.tags.as_deref().map(split_tags).unwrap_or_default()
	}

	/// Unparseable limits fall back to the default instead of failing the
	/// request.
	fn limit(&self) -> Option<usize> {
		self.limit.as_deref().and_then(|raw| raw.trim().parse().ok())
	}

	fn author(&self) -> Option<String> {
		self.author.clone().filter(|author| !author.is_empty())
	}
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
	#[serde(default)]
	pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct PostsParams {
	pub tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuickResponse {
	pub results: Vec<MetadataHit>,
	pub total: usize,
	pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
	pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, message: impl Into<String>) -> Self {
		Self { status, message: message.into() }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		tracing::error!(error = %err, "Search request failed.");

		Self::new(StatusCode::INTERNAL_SERVER_ERROR, UNAVAILABLE_MESSAGE)
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(ErrorBody { error: self.message })).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/search", get(search))
		.route("/api/search/quick", get(quick))
		.route("/api/search/suggest", get(suggest))
		.route("/api/posts", get(posts))
		.route("/api/tags/popular", get(popular_tags))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	Query(params): Query<SearchParams>,
) -> Result<Json<FullTextResponse>, ApiError> {
	let req = FullTextRequest {
		limit: params.limit(),
		tags: params.tags(),
		author: params.author(),
		q: params.q,
	};
	let response = state.service.full_text(&req).await?;

	Ok(Json(response))
}

async fn quick(
	State(state): State<AppState>,
	Query(params): Query<SearchParams>,
) -> Result<Json<QuickResponse>, ApiError> {
	let options =
		SearchOptions { tags: params.tags(), author: params.author(), limit: params.limit() };
	let results = state.service.quick(&params.q, &options).await?;

	Ok(Json(QuickResponse { total: results.len(), results, query: params.q }))
}

async fn suggest(
	State(state): State<AppState>,
	Query(params): Query<SuggestParams>,
) -> Result<Json<SuggestResponse>, ApiError> {
	let suggestions = state.service.suggest(&params.q).await?;

	Ok(Json(SuggestResponse { suggestions }))
}

async fn posts(
	State(state): State<AppState>,
	Query(params): Query<PostsParams>,
) -> Result<Json<Vec<PostMeta>>, ApiError> {
	let tag = params.tag.as_deref().filter(|tag| !tag.is_empty());
	let posts = state.service.posts(tag).await?;

	Ok(Json(posts))
}

async fn popular_tags(State(state): State<AppState>) -> Result<Json<Vec<TagCount>>, ApiError> {
	let tags = state.service.popular_tags().await?;

	Ok(Json(tags))
}

/// Splits a comma-separated tag list, dropping blank entries.
pub fn split_tags(raw: &str) -> Vec<String> {
	raw.split(',').map(str::trim).filter(|tag| !tag.is_empty()).map(str::to_string).collect()
}
