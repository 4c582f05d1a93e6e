pub mod fulltext;
pub mod highlight;
pub mod metadata;
pub mod scoring;
pub mod snippet;
pub mod suggest;
pub mod tags;

mod error;
mod text;

pub use error::{Error, Result};
pub use fulltext::{FullTextHit, FullTextRequest, FullTextResponse};
pub use highlight::Highlighter;
pub use metadata::{MetadataHit, SearchOptions};
pub use scoring::{Filters, MatchedField};
pub use tags::TagCount;

use std::{future::Future, pin::Pin, sync::Arc};

use scribe_config::Config;
use scribe_content::{ContentStore, PostMeta};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Where posts come from. Listing yields metadata only; bodies are fetched one
/// post at a time during full-text search.
pub trait ContentSource
where
	Self: Send + Sync,
{
	fn list_posts<'a>(&'a self) -> BoxFuture<'a, Result<Vec<PostMeta>>>;

	fn fetch_body<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<String>>;
}

pub struct SearchService {
	pub cfg: scribe_config::Search,
	pub source: Arc<dyn ContentSource>,
	pub highlighter: Highlighter,
}

impl ContentSource for ContentStore {
	fn list_posts<'a>(&'a self) -> BoxFuture<'a, Result<Vec<PostMeta>>> {
		Box::pin(async move {
			ContentStore::list_posts(self)
				.await
				.map_err(|err| Error::Listing { message: err.to_string() })
		})
	}

	fn fetch_body<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move {
			self.load_post(id)
				.await
				.map(|post| post.body)
				.map_err(|err| Error::Fetch { id: id.to_string(), message: err.to_string() })
		})
	}
}

impl SearchService {
	pub fn new(cfg: scribe_config::Search, source: Arc<dyn ContentSource>) -> Self {
		let highlighter = Highlighter::new(&cfg.highlight_class);

		Self { cfg, source, highlighter }
	}

	/// Builds a service reading posts from the configured content directory.
	pub fn from_config(cfg: &Config) -> Self {
		Self::new(cfg.search.clone(), Arc::new(ContentStore::from_config(&cfg.content)))
	}
}
