//! Content snippet extraction from MDX bodies.
//!
//! Markup is stripped with a fixed sequence of regex passes, the remaining
//! prose is split into sentences, and each sentence containing the query is
//! cut down to a short window around the first hit. All lengths are counted
//! in chars.

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

use crate::text;

/// Chars kept on each side of the hit.
pub const CONTEXT_CHARS: usize = 30;
/// Longest snippet returned, ellipses included.
pub const MAX_SNIPPET_CHARS: usize = 100;
/// Sentences must be longer than this to yield a snippet.
pub const MIN_SENTENCE_CHARS: usize = 10;
/// Upper bound on distinct snippets collected per post.
pub const MAX_CONTENT_MATCHES: usize = 5;

const ELLIPSIS: &str = "...";
const SENTENCE_TERMINATORS: [char; 6] = ['.', '!', '?', '。', '！', '？'];

static MARKUP_PASSES: LazyLock<[Pass; 7]> = LazyLock::new(|| {
	[
		Pass::first(r"(?ms)^---.*?---", ""),
		Pass::all(r"(?s)```.*?```", ""),
		Pass::all(r"`[^`]*`", ""),
		Pass::all(r"#{1,6}\s", ""),
		Pass::all(r"\*\*([^*]+)\*\*", "$1"),
		Pass::all(r"\*([^*]+)\*", "$1"),
		Pass::all(r"\[([^\]]+)\]\([^)]+\)", "$1"),
	]
});

struct Pass {
	pattern: Regex,
	replacement: &'static str,
	every: bool,
}
impl Pass {
	fn first(pattern: &str, replacement: &'static str) -> Self {
		Self::build(pattern, replacement, false)
	}

	fn all(pattern: &str, replacement: &'static str) -> Self {
		Self::build(pattern, replacement, true)
	}

	fn build(pattern: &str, replacement: &'static str, every: bool) -> Self {
		let pattern = Regex::new(pattern).expect("MARKUP_PASSES: hardcoded regex is valid");

		Self { pattern, replacement, every }
	}

	fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
		if self.every {
			self.pattern.replace_all(text, self.replacement)
		} else {
			self.pattern.replace(text, self.replacement)
		}
	}
}

/// Removes front matter, code, headings, emphasis and link targets.
pub fn strip_markup(body: &str) -> String {
	MARKUP_PASSES.iter().fold(body.to_string(), |text, pass| pass.apply(&text).into_owned())
}

/// Trimmed, non-empty sentences in document order.
pub fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
	text.split(SENTENCE_TERMINATORS).map(str::trim).filter(|sentence| !sentence.is_empty())
}

/// Cuts a window around the first occurrence of `folded_query` in `sentence`.
///
/// Returns `None` when the query does not occur or the result would be empty.
pub fn make_snippet(sentence: &str, folded_query: &str) -> Option<String> {
	let chars = sentence.chars().collect::<Vec<_>>();
	let folded = text::fold(sentence).chars().collect::<Vec<_>>();
	let needle = folded_query.chars().collect::<Vec<_>>();
	let index = text::find_chars(&folded, &needle)?;
	let start = index.saturating_sub(CONTEXT_CHARS);
	let end = (index + needle.len() + CONTEXT_CHARS).min(chars.len());
	let mut snippet = chars[start..end].iter().collect::<String>();

	if start > 0 {
		snippet.insert_str(0, ELLIPSIS);
	}
	if end < chars.len() {
		snippet.push_str(ELLIPSIS);
	}
	if snippet.chars().count() > MAX_SNIPPET_CHARS {
		snippet = snippet.chars().take(MAX_SNIPPET_CHARS - ELLIPSIS.len()).collect();

		snippet.push_str(ELLIPSIS);
	}

	let snippet = snippet.trim();

	(!snippet.is_empty()).then(|| snippet.to_string())
}

/// Distinct snippets for every qualifying sentence, capped at
/// [`MAX_CONTENT_MATCHES`].
pub fn content_matches(body: &str, folded_query: &str) -> Vec<String> {
	let cleaned = strip_markup(body);
	let mut matches = Vec::new();

	for sentence in split_sentences(&cleaned) {
		if sentence.chars().count() <= MIN_SENTENCE_CHARS
			|| !text::contains_folded(sentence, folded_query)
		{
			continue;
		}

		let Some(snippet) = make_snippet(sentence, folded_query) else { continue };

		if !matches.contains(&snippet) {
			matches.push(snippet);
		}
		if matches.len() == MAX_CONTENT_MATCHES {
			break;
		}
	}

	matches
}
