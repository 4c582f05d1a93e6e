use regex::{Captures, Regex, RegexBuilder};

/// Wraps query hits in `<mark>` elements carrying a configurable class.
#[derive(Clone, Debug)]
pub struct Highlighter {
	open: String,
}
impl Highlighter {
	pub fn new(class: &str) -> Self {
		Self { open: format!("<mark class=\"{class}\">") }
	}

	/// Builds a matcher for `query`, treated as a literal and matched without
	/// regard to case.
	pub fn compile(&self, query: &str) -> Highlight<'_> {
		if query.is_empty() {
			return Highlight { open: &self.open, pattern: None };
		}

		let built = RegexBuilder::new(&regex::escape(query)).case_insensitive(true).build();
		let pattern = match built {
			Ok(pattern) => Some(pattern),
			Err(err) => {
				tracing::warn!(error = %err, "Highlight pattern failed to compile; leaving text unmarked.");

				None
			},
		};

		Highlight { open: &self.open, pattern }
	}

	pub fn highlight(&self, text: &str, query: &str) -> String {
		self.compile(query).apply(text)
	}
}
impl Default for Highlighter {
	fn default() -> Self {
		Self::new(scribe_config::DEFAULT_HIGHLIGHT_CLASS)
	}
}

pub struct Highlight<'a> {
	open: &'a str,
	pattern: Option<Regex>,
}
impl Highlight<'_> {
	/// Marks every non-overlapping hit, keeping the original casing.
	pub fn apply(&self, text: &str) -> String {
		let Some(pattern) = &self.pattern else { return text.to_string() };

		pattern
			.replace_all(text, |caps: &Captures<'_>| format!("{}{}</mark>", self.open, &caps[0]))
			.into_owned()
	}
}
