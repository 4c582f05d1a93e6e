//! Case folding shared by every matcher.
//!
//! Folding maps each char to exactly one char so that char offsets found in
//! the folded text are valid in the original text.

const CAPITAL_SIGMA: char = 'Σ';
const FINAL_SIGMA: char = 'ς';

fn fold_char(ch: char) -> char {
	ch.to_lowercase().next().unwrap_or(ch)
}

/// Lower-cases `text` one char at a time.
///
/// A capital sigma that ends a word folds to the final form, as full Unicode
/// lower-casing does.
pub(crate) fn fold(text: &str) -> String {
	let chars = text.chars().collect::<Vec<_>>();

	chars
		.iter()
		.enumerate()
		.map(|(idx, &ch)| {
			if ch == CAPITAL_SIGMA && ends_word(&chars, idx) { FINAL_SIGMA } else { fold_char(ch) }
		})
		.collect()
}

fn ends_word(chars: &[char], idx: usize) -> bool {
	let after_letter = idx.checked_sub(1).is_some_and(|prev| chars[prev].is_alphabetic());
	let before_letter = chars.get(idx + 1).is_some_and(|next| next.is_alphabetic());

	after_letter && !before_letter
}

pub(crate) fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
	fold(haystack).contains(folded_needle)
}

/// Char offset of the first occurrence of `needle` in `haystack`.
pub(crate) fn find_chars(haystack: &[char], needle: &[char]) -> Option<usize> {
	if needle.is_empty() || needle.len() > haystack.len() {
		return None;
	}

	haystack.windows(needle.len()).position(|window| window == needle)
}
