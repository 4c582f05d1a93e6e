use std::panic::AssertUnwindSafe;

use futures::{FutureExt, future};
use serde::{Deserialize, Serialize};

use scribe_content::PostMeta;

use crate::{
	ContentSource, Result, SearchService,
	scoring::{self, FULL_TEXT_WEIGHTS, Filters, MatchedField},
	snippet, text,
};

/// Shortest accepted query, in chars after trimming.
pub const MIN_QUERY_CHARS: usize = 2;
/// Snippets returned per hit.
pub const MAX_SNIPPETS: usize = 3;

pub const SHORT_QUERY_MESSAGE: &str = "Search query must be at least 2 characters.";
pub const NO_RESULTS_MESSAGE: &str = "No results found.";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FullTextRequest {
	pub q: String,
	pub limit: Option<usize>,
	#[serde(default)]
	pub tags: Vec<String>,
	pub author: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullTextHit {
	#[serde(flatten)]
	pub post: PostMeta,
	pub relevance_score: u32,
	pub matched_fields: Vec<MatchedField>,
	pub content_snippets: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FullTextResponse {
	pub results: Vec<FullTextHit>,
	pub total: usize,
	pub query: String,
	pub message: String,
}
impl FullTextResponse {
	fn rejected(query: &str) -> Self {
		Self {
			results: Vec::new(),
			total: 0,
			query: query.to_string(),
			message: SHORT_QUERY_MESSAGE.to_string(),
		}
	}
}

/// Full-text search over one content source.
///
/// Every post is evaluated as an independent unit; a unit that fails to load
/// its body is logged and contributes nothing.
pub struct FullTextSearch<'a> {
	source: &'a dyn ContentSource,
	default_limit: usize,
}
impl<'a> FullTextSearch<'a> {
	pub fn new(source: &'a dyn ContentSource, default_limit: usize) -> Self {
		Self { source, default_limit }
	}

	pub async fn search(&self, req: &FullTextRequest) -> Result<FullTextResponse> {
		let query = req.q.trim();

		if query.chars().count() < MIN_QUERY_CHARS {
			return Ok(FullTextResponse::rejected(&req.q));
		}

		let folded = text::fold(query);
		let filters = Filters::new(&req.tags, req.author.as_deref());
		let posts = self.source.list_posts().await?;
		let units = posts.iter().map(|post| self.evaluate_unit(post, &folded, &filters));
		let mut hits = future::join_all(units).await.into_iter().flatten().collect::<Vec<_>>();

		hits.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));

		let total = hits.len();

		hits.truncate(req.limit.unwrap_or(self.default_limit));

		let message = if hits.is_empty() {
			NO_RESULTS_MESSAGE.to_string()
		} else {
			format!("Found {total} results.")
		};

		tracing::info!(query, posts = posts.len(), total, "Full-text search finished.");

		Ok(FullTextResponse { results: hits, total, query: req.q.clone(), message })
	}

	async fn evaluate_unit(
		&self,
		post: &PostMeta,
		folded_query: &str,
		filters: &Filters<'_>,
	) -> Option<FullTextHit> {
		match AssertUnwindSafe(self.evaluate(post, folded_query, filters)).catch_unwind().await {
			Ok(Ok(hit)) => hit,
			Ok(Err(err)) => {
				tracing::warn!(slug = %post.slug, error = %err, "Skipping post in full-text search.");

				None
			},
			Err(_) => {
				tracing::error!(slug = %post.slug, "Full-text evaluation panicked; skipping post.");

				None
			},
		}
	}

	async fn evaluate(
		&self,
		post: &PostMeta,
		folded_query: &str,
		filters: &Filters<'_>,
	) -> Result<Option<FullTextHit>> {
		let body = self.source.fetch_body(&post.id).await?;
		let mut snippets = snippet::content_matches(&body, folded_query);
		let score =
			scoring::score_post(post, folded_query, &FULL_TEXT_WEIGHTS, snippets.len(), filters);

		if !score.is_match() {
			return Ok(None);
		}

		snippets.truncate(MAX_SNIPPETS);

		Ok(Some(FullTextHit {
			post: post.clone(),
			relevance_score: score.value,
			matched_fields: score.matched_fields,
			content_snippets: snippets,
		}))
	}
}

impl SearchService {
	pub async fn full_text(&self, req: &FullTextRequest) -> Result<FullTextResponse> {
		FullTextSearch::new(self.source.as_ref(), self.cfg.default_limit).search(req).await
	}
}
