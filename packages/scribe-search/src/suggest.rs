use std::collections::HashSet;

use scribe_content::PostMeta;

use crate::{Result, SearchService, text};

pub const MAX_SUGGESTIONS: usize = 5;

impl SearchService {
	pub async fn suggest(&self, query: &str) -> Result<Vec<String>> {
		let posts = self.source.list_posts().await?;

		Ok(suggest(&posts, query))
	}
}

/// Completions drawn from title words and tags that extend `query`.
///
/// Title words of each post come before its tags; candidates keep first-seen
/// order and are returned lower-cased.
pub fn suggest(posts: &[PostMeta], query: &str) -> Vec<String> {
	if query.trim().is_empty() {
		return Vec::new();
	}

	let needle = text::fold(query);
	let mut seen = HashSet::new();
	let mut suggestions = Vec::new();

	for post in posts {
		let title = text::fold(&post.title);
		let candidates = title
			.split_whitespace()
			.map(str::to_string)
			.chain(post.tags.iter().map(|tag| text::fold(tag)));

		for candidate in candidates {
			if candidate == needle || !candidate.contains(&needle) || !seen.insert(candidate.clone())
			{
				continue;
			}

			suggestions.push(candidate);

			if suggestions.len() == MAX_SUGGESTIONS {
				return suggestions;
			}
		}
	}

	suggestions
}

#[cfg(test)]
mod tests {
	use super::*;

	fn post(title: &str, tags: &[&str]) -> PostMeta {
		PostMeta {
			title: title.into(),
			tags: tags.iter().map(|tag| tag.to_string()).collect(),
			..Default::default()
		}
	}

	#[test]
	fn title_words_precede_tags() {
		let posts = [post("Rusty Rustacean Guide", &["Rustlang", "rust"])];

		assert_eq!(suggest(&posts, "rust"), ["rusty", "rustacean", "rustlang"]);
	}

	#[test]
	fn exact_matches_and_duplicates_are_dropped() {
		let posts = [post("rust rusty", &["rusty"]), post("Rusty again", &[])];

		assert_eq!(suggest(&posts, "rust"), ["rusty"]);
	}

	#[test]
	fn capped_at_five() {
		let posts = [post("ab1 ab2 ab3 ab4 ab5 ab6", &["ab7"])];

		assert_eq!(suggest(&posts, "ab").len(), MAX_SUGGESTIONS);
	}

	#[test]
	fn blank_query_suggests_nothing() {
		let posts = [post("Anything", &["any"])];

		assert!(suggest(&posts, "").is_empty());
		assert!(suggest(&posts, "  ").is_empty());
	}
}
