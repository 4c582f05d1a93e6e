mod error;

pub use error::{Error, Result};

use std::{
	env, fs,
	path::{Path, PathBuf},
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

pub const EXTENSION: &str = "mdx";

/// A throwaway content directory that removes itself on drop.
pub struct TestContent {
	root: PathBuf,
	cleaned: bool,
}
impl TestContent {
	pub fn new() -> Result<Self> {
		static COUNTER: AtomicU64 = AtomicU64::new(0);

		let nanos = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map_err(|err| Error::Message(format!("System time is before the epoch: {err}.")))?
			.as_nanos();
		let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
		let pid = std::process::id();
		let root = env::temp_dir().join(format!("scribe_content_{nanos}_{pid}_{ordinal}"));

		fs::create_dir_all(&root)?;

		Ok(Self { root, cleaned: false })
	}

	/// Builds a directory holding every fixture in `posts`.
	pub fn with_posts(posts: &[PostFixture]) -> Result<Self> {
		let content = Self::new()?;

		for post in posts {
			content.write_post(post)?;
		}

		Ok(content)
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn write_post(&self, post: &PostFixture) -> Result<PathBuf> {
		self.write_raw(&format!("{}.{EXTENSION}", post.slug), &post.render())
	}

	pub fn write_raw(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
		let path = self.root.join(file_name);

		fs::write(&path, contents)?;

		Ok(path)
	}

	pub fn cleanup(mut self) -> Result<()> {
		self.cleanup_inner()
	}

	fn cleanup_inner(&mut self) -> Result<()> {
		if self.cleaned {
			return Ok(());
		}

		fs::remove_dir_all(&self.root)?;

		self.cleaned = true;

		Ok(())
	}
}
impl Drop for TestContent {
	fn drop(&mut self) {
		if let Err(err) = self.cleanup_inner() {
			eprintln!("Test content cleanup failed for {:?}: {err}.", self.root);
		}
	}
}

/// Builder for one post file with a YAML front-matter header.
#[derive(Clone, Debug)]
pub struct PostFixture {
	pub slug: String,
	pub title: String,
	pub excerpt: String,
	pub date: String,
	pub author: String,
	pub tags: Vec<String>,
	pub body: String,
}
impl PostFixture {
	pub fn new(slug: &str) -> Self {
		Self {
			slug: slug.to_string(),
			title: format!("Post {slug}"),
			excerpt: String::new(),
			date: "2024-01-01".to_string(),
			author: "ndzy".to_string(),
			tags: Vec::new(),
			body: String::new(),
		}
	}

	pub fn title(mut self, title: &str) -> Self {
		self.title = title.to_string();

		self
	}

	pub fn excerpt(mut self, excerpt: &str) -> Self {
		self.excerpt = excerpt.to_string();

		self
	}

	pub fn date(mut self, date: &str) -> Self {
		self.date = date.to_string();

		self
	}

	pub fn author(mut self, author: &str) -> Self {
		self.author = author.to_string();

		self
	}

	pub fn tags(mut self, tags: &[&str]) -> Self {
		self.tags = tags.iter().map(|tag| tag.to_string()).collect();

		self
	}

	pub fn body(mut self, body: &str) -> Self {
		self.body = body.to_string();

		self
	}

	pub fn render(&self) -> String {
		let tags = self.tags.iter().map(|tag| format!("\"{tag}\"")).collect::<Vec<_>>().join(", ");

		format!(
			"---\ntitle: \"{}\"\nexcerpt: \"{}\"\ndate: {}\nauthor: \"{}\"\ntags: [{tags}]\n---\n{}",
			self.title, self.excerpt, self.date, self.author, self.body
		)
	}
}
