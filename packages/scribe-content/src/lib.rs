mod error;
mod front_matter;
mod store;

pub use error::{Error, Result};
pub use store::ContentStore;

use serde::{Deserialize, Serialize};

/// Listing-level view of a post. `id` and `slug` are both the file stem.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMeta {
	pub id: String,
	pub title: String,
	pub excerpt: String,
	pub date: String,
	pub author: String,
	pub tags: Vec<String>,
	pub slug: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Post {
	#[serde(flatten)]
	pub meta: PostMeta,
	/// Raw MDX following the front-matter block.
	pub body: String,
}
