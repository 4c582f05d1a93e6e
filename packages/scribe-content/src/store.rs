use std::{
	cmp::Reverse,
	io::ErrorKind,
	path::{Path, PathBuf},
};

use time::{Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description};
use tokio::fs;

use crate::{Error, Post, PostMeta, Result, front_matter};

/// Reads posts from a flat directory of `<slug>.<extension>` files.
#[derive(Clone, Debug)]
pub struct ContentStore {
	root: PathBuf,
	extension: String,
}
impl ContentStore {
	pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
		Self { root: root.into(), extension: extension.into() }
	}

	pub fn from_config(cfg: &scribe_config::Content) -> Self {
		Self::new(cfg.root.clone(), cfg.extension.clone())
	}

	/// Lists every post, newest first.
	///
	/// Posts that cannot be read as UTF-8 or whose front matter cannot be
	/// parsed are logged and left out.
	/// Posts with a missing or unparseable date sort after dated ones.
	pub async fn list_posts(&self) -> Result<Vec<PostMeta>> {
		let mut entries = fs::read_dir(&self.root)
			.await
			.map_err(|err| Error::ReadDir { path: self.root.clone(), source: err })?;
		let mut paths = Vec::new();

		while let Some(entry) = entries
			.next_entry()
			.await
			.map_err(|err| Error::ReadDir { path: self.root.clone(), source: err })?
		{
			let path = entry.path();
			let is_file = entry
				.file_type()
				.await
				.map_err(|err| Error::ReadDir { path: path.clone(), source: err })?
				.is_file();

			if is_file && self.has_extension(&path) {
				paths.push(path);
			}
		}

		paths.sort();

		let mut posts = Vec::with_capacity(paths.len());

		for path in paths {
			let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else { continue };
			let raw = match fs::read_to_string(&path).await {
				Ok(raw) => raw,
				Err(err) => {
					tracing::warn!(error = %err, path = %path.display(), "Skipping unreadable post file.");

					continue;
				},
			};

			match parse_post(&path, id, &raw) {
				Ok(post) => posts.push(post.meta),
				Err(err) => {
					tracing::warn!(error = %err, path = %path.display(), "Skipping unreadable post.");
				},
			}
		}

		posts.sort_by_key(|post| Reverse(parse_date(&post.date)));

		tracing::debug!(count = posts.len(), root = %self.root.display(), "Listed posts.");

		Ok(posts)
	}

	pub async fn load_post(&self, id: &str) -> Result<Post> {
		let path = self.post_path(id)?;
		let raw = match fs::read_to_string(&path).await {
			Ok(raw) => raw,
			Err(err) if err.kind() == ErrorKind::NotFound =>
				return Err(Error::NotFound { id: id.to_string() }),
			Err(err) => return Err(Error::ReadPost { path, source: err }),
		};

		parse_post(&path, id, &raw)
	}

	fn post_path(&self, id: &str) -> Result<PathBuf> {
		if id.is_empty() || id.starts_with('.') || id.contains(['/', '\\']) || id.contains("..") {
			return Err(Error::InvalidId { id: id.to_string() });
		}

		Ok(self.root.join(format!("{id}.{}", self.extension)))
	}

	fn has_extension(&self, path: &Path) -> bool {
		path.extension().and_then(|ext| ext.to_str()) == Some(self.extension.as_str())
	}
}

fn parse_post(path: &Path, id: &str, raw: &str) -> Result<Post> {
	let (block, body) = front_matter::split(raw);
	let fm = match block {
		Some(block) => front_matter::parse(block)
			.map_err(|message| Error::FrontMatter { path: path.to_path_buf(), message })?,
		None => Default::default(),
	};
	let meta = PostMeta {
		id: id.to_string(),
		title: fm.title.unwrap_or_default(),
		excerpt: fm.excerpt.unwrap_or_default(),
		date: fm.date.unwrap_or_default(),
		author: fm.author.unwrap_or_default(),
		tags: fm.tags.unwrap_or_default(),
		slug: id.to_string(),
	};

	Ok(Post { meta, body: body.to_string() })
}

fn parse_date(raw: &str) -> Option<Date> {
	let raw = raw.trim();

	Date::parse(raw, format_description!("[year]-[month]-[day]"))
		.ok()
		.or_else(|| OffsetDateTime::parse(raw, &Rfc3339).ok().map(|dt| dt.date()))
}
