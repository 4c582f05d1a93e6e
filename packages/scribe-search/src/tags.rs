use std::collections::HashMap;

use serde::Serialize;

use scribe_content::PostMeta;

use crate::{Result, SearchService};

pub const POPULAR_TAG_LIMIT: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TagCount {
	pub tag: String,
	pub count: usize,
}

impl SearchService {
	/// The current listing, optionally narrowed to posts carrying `tag`.
	pub async fn posts(&self, tag: Option<&str>) -> Result<Vec<PostMeta>> {
		let posts = self.source.list_posts().await?;

		Ok(match tag {
			Some(tag) => posts_with_tag(posts, tag),
			None => posts,
		})
	}

	pub async fn popular_tags(&self) -> Result<Vec<TagCount>> {
		let posts = self.source.list_posts().await?;

		Ok(popular_tags(&posts, POPULAR_TAG_LIMIT))
	}
}

pub fn posts_with_tag(mut posts: Vec<PostMeta>, tag: &str) -> Vec<PostMeta> {
	posts.retain(|post| post.tags.iter().any(|candidate| candidate == tag));

	posts
}

/// Tag usage counts, most used first. Ties keep first-seen order.
pub fn popular_tags(posts: &[PostMeta], limit: usize) -> Vec<TagCount> {
	let mut counts = Vec::<TagCount>::new();
	let mut index = HashMap::<&str, usize>::new();

	for tag in posts.iter().flat_map(|post| &post.tags) {
		match index.get(tag.as_str()) {
			Some(&slot) => counts[slot].count += 1,
			None => {
				index.insert(tag, counts.len());
				counts.push(TagCount { tag: tag.clone(), count: 1 });
			},
		}
	}

	counts.sort_by(|a, b| b.count.cmp(&a.count));
	counts.truncate(limit);

	counts
}
