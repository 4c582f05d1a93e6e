pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to list posts: {message}")]
	Listing { message: String },
	#[error("Failed to fetch post {id:?}: {message}")]
	Fetch { id: String, message: String },
}
