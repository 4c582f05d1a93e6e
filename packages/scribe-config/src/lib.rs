mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Content, DEFAULT_HIGHLIGHT_CLASS, Search, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::invalid("service.http_bind", "must be non-empty."));
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::invalid("service.log_level", "must be non-empty."));
	}
	if cfg.content.root.as_os_str().is_empty() {
		return Err(Error::invalid("content.root", "must be non-empty."));
	}
	if cfg.content.extension.is_empty() {
		return Err(Error::invalid("content.extension", "must be non-empty."));
	}
	if cfg.content.extension.contains(['/', '\\']) {
		return Err(Error::invalid("content.extension", "must not contain path separators."));
	}
	if cfg.search.default_limit == 0 {
		return Err(Error::invalid("search.default_limit", "must be greater than zero."));
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let extension = cfg.content.extension.trim();

	cfg.content.extension = extension.strip_prefix('.').unwrap_or(extension).to_string();

	if cfg.service.log_level.trim().eq_ignore_ascii_case("silent") {
		cfg.service.log_level = "off".to_string();
	}
	if cfg.search.highlight_class.trim().is_empty() {
		cfg.search.highlight_class = DEFAULT_HIGHLIGHT_CLASS.to_string();
	}
}
