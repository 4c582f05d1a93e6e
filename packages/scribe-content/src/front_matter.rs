//! Front-matter block extraction for MDX posts.
//!
//! The block between the opening and closing `---` lines is YAML. Only the
//! fields search needs are read; anything else in the header is ignored.

use serde::{Deserialize, Deserializer, de};
use serde_yaml::Value;

const DELIMITER: &str = "---";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FrontMatter {
	#[serde(default, deserialize_with = "scalar")]
	pub(crate) title: Option<String>,
	#[serde(default, deserialize_with = "scalar")]
	pub(crate) excerpt: Option<String>,
	#[serde(default, deserialize_with = "scalar")]
	pub(crate) date: Option<String>,
	#[serde(default, deserialize_with = "scalar")]
	pub(crate) author: Option<String>,
	#[serde(default)]
	pub(crate) tags: Option<Vec<String>>,
}

/// Splits `raw` into its front-matter block and the remaining body.
///
/// Returns `None` for the block when the file does not open with a `---` line
/// or the block is never closed; the whole input is then the body.
pub(crate) fn split(raw: &str) -> (Option<&str>, &str) {
	let Some(rest) = raw.strip_prefix(DELIMITER) else { return (None, raw) };
	let Some(rest) = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) else {
		return (None, raw);
	};
	let mut offset = 0_usize;

	for line in rest.split_inclusive('\n') {
		if line.trim_end() == DELIMITER {
			return (Some(&rest[..offset]), &rest[offset + line.len()..]);
		}

		offset += line.len();
	}

	(None, raw)
}

pub(crate) fn parse(block: &str) -> Result<FrontMatter, String> {
	let is_blank = block.lines().map(str::trim).all(|line| line.is_empty() || line.starts_with('#'));

	if is_blank {
		return Ok(FrontMatter::default());
	}

	serde_yaml::from_str(block).map_err(|err| err.to_string())
}

/// Reads a string field that YAML may have typed as a number or boolean.
fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	match Option::<Value>::deserialize(deserializer)? {
		None | Some(Value::Null) => Ok(None),
		Some(Value::String(value)) => Ok(Some(value)),
		Some(Value::Number(value)) => Ok(Some(value.to_string())),
		Some(Value::Bool(value)) => Ok(Some(value.to_string())),
		Some(other) => Err(de::Error::custom(format!("expected a scalar, found {other:?}"))),
	}
}
