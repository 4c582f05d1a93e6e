use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_HIGHLIGHT_CLASS: &str = "bg-yellow-200 dark:bg-yellow-800";

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub content: Content,
	#[serde(default)]
	pub search: Search,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Content {
	/// Directory holding one post file per slug.
	pub root: PathBuf,
	#[serde(default = "default_extension")]
	pub extension: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Result cap for full-text search when the request omits `limit`.
	pub default_limit: usize,
	pub highlight_class: String,
}
impl Default for Search {
	fn default() -> Self {
		Self { default_limit: 10, highlight_class: DEFAULT_HIGHLIGHT_CLASS.to_string() }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_extension() -> String {
	"mdx".to_string()
}
