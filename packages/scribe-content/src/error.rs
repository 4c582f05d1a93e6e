use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read content directory at {path:?}.")]
	ReadDir { path: PathBuf, source: std::io::Error },
	#[error("Failed to read post at {path:?}.")]
	ReadPost { path: PathBuf, source: std::io::Error },
	#[error("Post {id:?} not found.")]
	NotFound { id: String },
	#[error("Invalid post id {id:?}.")]
	InvalidId { id: String },
	#[error("Invalid front matter in {path:?}: {message}")]
	FrontMatter { path: PathBuf, message: String },
}
