//! Field-weighted relevance scoring.

use serde::Serialize;

use scribe_content::PostMeta;

use crate::text;

/// Points awarded per field hit. Tag and content weights apply per matching
/// tag and per content match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldWeights {
	pub title: u32,
	pub excerpt: u32,
	pub tag: u32,
	pub author: u32,
	pub content: u32,
}

pub const METADATA_WEIGHTS: FieldWeights =
	FieldWeights { title: 10, excerpt: 5, tag: 3, author: 2, content: 0 };
pub const FULL_TEXT_WEIGHTS: FieldWeights =
	FieldWeights { title: 20, excerpt: 15, tag: 10, author: 5, content: 8 };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchedField {
	Title,
	Excerpt,
	Tags,
	Author,
	Content,
}

/// Tag and author constraints. An empty tag list or a missing or empty author
/// imposes nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Filters<'a> {
	tags: &'a [String],
	author: Option<&'a str>,
}
impl<'a> Filters<'a> {
	pub fn new(tags: &'a [String], author: Option<&'a str>) -> Self {
		Self { tags, author: author.filter(|author| !author.is_empty()) }
	}

	/// The post must carry at least one requested tag, compared exactly.
	pub fn admits_tags(&self, post: &PostMeta) -> bool {
		self.tags.is_empty() || self.tags.iter().any(|tag| post.tags.contains(tag))
	}

	pub fn admits_author(&self, post: &PostMeta) -> bool {
		self.author.is_none_or(|author| post.author == author)
	}

	pub fn admits(&self, post: &PostMeta) -> bool {
		self.admits_tags(post) && self.admits_author(post)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Score {
	/// Points before filters were applied.
	pub accumulated: u32,
	/// Points after filters; zero when a filter rejected the post.
	pub value: u32,
	/// Fields that matched, in evaluation order, regardless of filters.
	pub matched_fields: Vec<MatchedField>,
}
impl Score {
	pub fn is_match(&self) -> bool {
		self.value > 0
	}

	pub fn matched(&self, field: MatchedField) -> bool {
		self.matched_fields.contains(&field)
	}
}

/// Scores one post against an already folded, non-empty query.
///
/// `content_matches` is the number of distinct content snippets found in the
/// post body; metadata scoring passes zero.
pub fn score_post(
	post: &PostMeta,
	folded_query: &str,
	weights: &FieldWeights,
	content_matches: usize,
	filters: &Filters<'_>,
) -> Score {
	let mut accumulated = 0_u32;
	let mut matched_fields = Vec::new();

	if text::contains_folded(&post.title, folded_query) {
		accumulated += weights.title;

		matched_fields.push(MatchedField::Title);
	}
	if text::contains_folded(&post.excerpt, folded_query) {
		accumulated += weights.excerpt;

		matched_fields.push(MatchedField::Excerpt);
	}

	let tag_hits = post.tags.iter().filter(|tag| text::contains_folded(tag, folded_query)).count();

	if tag_hits > 0 {
		accumulated += weights.tag.saturating_mul(count_points(tag_hits));

		matched_fields.push(MatchedField::Tags);
	}
	if text::contains_folded(&post.author, folded_query) {
		accumulated += weights.author;

		matched_fields.push(MatchedField::Author);
	}
	if content_matches > 0 && weights.content > 0 {
		accumulated += weights.content.saturating_mul(count_points(content_matches));

		matched_fields.push(MatchedField::Content);
	}

	let value = if filters.admits(post) { accumulated } else { 0 };

	Score { accumulated, value, matched_fields }
}

fn count_points(count: usize) -> u32 {
	u32::try_from(count).unwrap_or(u32::MAX)
}
