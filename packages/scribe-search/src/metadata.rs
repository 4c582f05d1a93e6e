use serde::{Deserialize, Serialize};

use scribe_content::PostMeta;

use crate::{
	Highlighter, Result, SearchService,
	scoring::{self, Filters, METADATA_WEIGHTS, MatchedField},
	text,
};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchOptions {
	#[serde(default)]
	pub tags: Vec<String>,
	pub author: Option<String>,
	/// Absent means every hit is returned.
	pub limit: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataHit {
	#[serde(flatten)]
	pub post: PostMeta,
	pub relevance_score: u32,
	pub matched_fields: Vec<MatchedField>,
	pub highlighted_title: String,
	pub highlighted_excerpt: String,
}

impl SearchService {
	/// Metadata search over the current listing.
	pub async fn quick(&self, query: &str, options: &SearchOptions) -> Result<Vec<MetadataHit>> {
		let posts = self.source.list_posts().await?;

		Ok(search_metadata(&posts, query, options, &self.highlighter))
	}
}

/// Scores titles, excerpts, tags and authors without touching post bodies.
pub fn search_metadata(
	posts: &[PostMeta],
	query: &str,
	options: &SearchOptions,
	highlighter: &Highlighter,
) -> Vec<MetadataHit> {
	let query = query.trim();

	if query.is_empty() {
		return Vec::new();
	}

	let folded = text::fold(query);
	let filters = Filters::new(&options.tags, options.author.as_deref());
	let highlight = highlighter.compile(query);
	let mut hits = Vec::new();

	for post in posts {
		let score = scoring::score_post(post, &folded, &METADATA_WEIGHTS, 0, &filters);

		if !score.is_match() {
			continue;
		}

		let highlighted_title = if score.matched(MatchedField::Title) {
			highlight.apply(&post.title)
		} else {
			post.title.clone()
		};
		let highlighted_excerpt = if score.matched(MatchedField::Excerpt) {
			highlight.apply(&post.excerpt)
		} else {
			post.excerpt.clone()
		};

		hits.push(MetadataHit {
			post: post.clone(),
			relevance_score: score.value,
			matched_fields: score.matched_fields,
			highlighted_title,
			highlighted_excerpt,
		});
	}

	// `sort_by` is stable, so equal scores keep listing order.
	hits.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));

	if let Some(limit) = options.limit {
		hits.truncate(limit);
	}

	tracing::debug!(query, hits = hits.len(), "Metadata search finished.");

	hits
}

#[cfg(test)]
mod tests {
	use super::*;

	fn post(slug: &str, title: &str, excerpt: &str, tags: &[&str]) -> PostMeta {
		PostMeta {
			id: slug.into(),
			title: title.into(),
			excerpt: excerpt.into(),
			author: "ndzy".into(),
			tags: tags.iter().map(|tag| tag.to_string()).collect(),
			slug: slug.into(),
			..Default::default()
		}
	}

	#[test]
	fn highlights_only_matched_fields() {
		let posts = [post("a", "Rust Ownership", "explains borrowing", &["rust"])];
		let hits = search_metadata(&posts, "RUST", &SearchOptions::default(), &Highlighter::new("m"));

		assert_eq!(hits.len(), 1);
		assert_eq!(hits[0].highlighted_title, "<mark class=\"m\">Rust</mark> Ownership");
		assert_eq!(hits[0].highlighted_excerpt, "explains borrowing");
	}

	#[test]
	fn single_character_query_is_accepted() {
		let posts = [post("a", "Rust", "", &[])];
		let hits = search_metadata(&posts, " r ", &SearchOptions::default(), &Highlighter::default());

		assert_eq!(hits.len(), 1);
	}

	#[test]
	fn blank_query_returns_nothing() {
		let posts = [post("a", "Rust", "", &[])];

		assert!(search_metadata(&posts, "   ", &SearchOptions::default(), &Highlighter::default()).is_empty());
	}

	#[test]
	fn equal_scores_keep_listing_order_and_limit_applies() {
		let posts = [
			post("first", "rust one", "", &[]),
			post("second", "rust two", "", &[]),
			post("best", "rust three", "rust", &[]),
		];
		let options = SearchOptions { limit: Some(2), ..Default::default() };
		let hits = search_metadata(&posts, "rust", &options, &Highlighter::default());
		let slugs = hits.iter().map(|hit| hit.post.slug.as_str()).collect::<Vec<_>>();

		assert_eq!(slugs, ["best", "first"]);
	}
}
