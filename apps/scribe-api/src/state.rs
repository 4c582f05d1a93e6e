use std::sync::Arc;

use color_eyre::eyre;
use scribe_search::SearchService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<SearchService>,
}
impl AppState {
	/// Builds the search service over the configured content directory, which
	/// must already exist.
	pub async fn new(config: &scribe_config::Config) -> color_eyre::Result<Self> {
		let root = &config.content.root;
		let metadata = tokio::fs::metadata(root).await.map_err(|err| {
			eyre::eyre!("Content root {} is not readable: {err}.", root.display())
		})?;

		if !metadata.is_dir() {
			return Err(eyre::eyre!("Content root {} is not a directory.", root.display()));
		}

		Ok(Self::from_service(SearchService::from_config(config)))
	}

	pub fn from_service(service: SearchService) -> Self {
		Self { service: Arc::new(service) }
	}
}
