use std::sync::Arc;

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt;

use scribe_api::{
	routes::{self, UNAVAILABLE_MESSAGE},
	state::AppState,
};
use scribe_config::{Config, Content, Search, Service};
use scribe_content::PostMeta;
use scribe_search::{BoxFuture, ContentSource, Error, Result, SearchService};
use scribe_testkit::{EXTENSION, PostFixture, TestContent};

struct FailingSource;
impl ContentSource for FailingSource {
	fn list_posts<'a>(&'a self) -> BoxFuture<'a, Result<Vec<PostMeta>>> {
		Box::pin(async { Err(Error::Listing { message: "/secret/path is gone".to_string() }) })
	}

	fn fetch_body<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move { Err(Error::Fetch { id: id.to_string(), message: "gone".to_string() }) })
	}
}

fn test_config(content: &TestContent) -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		content: Content { root: content.root().to_path_buf(), extension: EXTENSION.to_string() },
		search: Search::default(),
	}
}

fn blog() -> TestContent {
	TestContent::with_posts(&[
		PostFixture::new("rust-ownership")
			.title("Rust Ownership")
			.excerpt("explains borrowing")
			.date("2024-03-01")
			.tags(&["rust", "systems"])
			.body("Ownership is how rust manages memory without a collector."),
		PostFixture::new("async-rust")
			.title("Async Rust")
			.date("2024-05-01")
			.author("guest")
			.tags(&["rust", "async"])
			.body("Futures are lazy until polled by an executor."),
		PostFixture::new("tomatoes")
			.title("Growing Tomatoes")
			.date("2023-08-01")
			.tags(&["garden"])
			.body("Water them daily in summer."),
	])
	.expect("Failed to build content.")
}

async fn app(content: &TestContent) -> Router {
	let state = AppState::new(&test_config(content)).await.expect("Failed to initialize app state.");

	routes::router(state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
	let response = app
		.oneshot(Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request."))
		.await
		.expect("Failed to call router.");
	let status = response.status();
	let body = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");

	if body.is_empty() {
		return (status, Value::Null);
	}

	let json = serde_json::from_slice(&body).expect("Failed to parse response.");

	(status, json)
}

#[tokio::test]
async fn health_ok() {
	let content = blog();
	let (status, _) = get(app(&content).await, "/health").await;

	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn full_text_search_ranks_posts() {
	let content = blog();
	let (status, json) = get(app(&content).await, "/api/search?q=rust").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["total"], 2);
	assert_eq!(json["query"], "rust");
	assert_eq!(json["message"], "Found 2 results.");
	// Title + tag + one content sentence beats title + tag.
	assert_eq!(json["results"][0]["slug"], "rust-ownership");
	assert_eq!(json["results"][0]["relevanceScore"], 20 + 10 + 8);
	assert_eq!(json["results"][0]["matchedFields"], serde_json::json!(["title", "tags", "content"]));
	assert_eq!(json["results"][1]["slug"], "async-rust");
}

#[tokio::test]
async fn full_text_search_applies_filters_and_limit() {
	let content = blog();
	let (_, by_author) = get(app(&content).await, "/api/search?q=rust&author=guest").await;
	let (_, by_tag) = get(app(&content).await, "/api/search?q=rust&tags=python,async").await;
	let (_, limited) = get(app(&content).await, "/api/search?q=rust&limit=1").await;

	assert_eq!(by_author["total"], 1);
	assert_eq!(by_author["results"][0]["slug"], "async-rust");
	assert_eq!(by_tag["total"], 1);
	assert_eq!(by_tag["results"][0]["slug"], "async-rust");
	assert_eq!(limited["total"], 2);
	assert_eq!(limited["results"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn short_query_is_not_an_error() {
	let content = blog();
	let (status, json) = get(app(&content).await, "/api/search?q=r").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["total"], 0);
	assert_eq!(json["message"], "Search query must be at least 2 characters.");
	assert_eq!(json["results"], serde_json::json!([]));
}

#[tokio::test]
async fn missing_query_is_treated_as_short() {
	let content = blog();
	let (status, json) = get(app(&content).await, "/api/search").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["query"], "");
	assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn quick_search_highlights_titles() {
	let content = blog();
	let (status, json) = get(app(&content).await, "/api/search/quick?q=tomato").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["total"], 1);
	assert_eq!(
		json["results"][0]["highlightedTitle"],
		"Growing <mark class=\"bg-yellow-200 dark:bg-yellow-800\">Tomato</mark>es"
	);
}

#[tokio::test]
async fn suggest_returns_completions() {
	let content = blog();
	let (status, json) = get(app(&content).await, "/api/search/suggest?q=own").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["suggestions"], serde_json::json!(["ownership"]));
}

#[tokio::test]
async fn posts_listing_is_newest_first_and_filterable() {
	let content = blog();
	let (_, all) = get(app(&content).await, "/api/posts").await;
	let (_, garden) = get(app(&content).await, "/api/posts?tag=garden").await;
	let slugs = all
		.as_array()
		.map(|posts| posts.iter().filter_map(|post| post["slug"].as_str()).collect::<Vec<_>>())
		.unwrap_or_default();

	assert_eq!(slugs, ["async-rust", "rust-ownership", "tomatoes"]);
	assert_eq!(garden.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn popular_tags_are_counted() {
	let content = blog();
	let (status, json) = get(app(&content).await, "/api/tags/popular").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json[0], serde_json::json!({ "tag": "rust", "count": 2 }));
	assert_eq!(json.as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn service_failure_hides_details() {
	let service = SearchService::new(Search::default(), Arc::new(FailingSource));
	let app = routes::router(AppState::from_service(service));
	let (status, json) = get(app, "/api/search?q=rust").await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(json, serde_json::json!({ "error": UNAVAILABLE_MESSAGE }));
}

#[tokio::test]
async fn missing_content_root_fails_startup() {
	let content = blog();
	let mut config = test_config(&content);

	config.content.root = content.root().join("missing");

	assert!(AppState::new(&config).await.is_err());
}
