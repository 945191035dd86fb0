use std::fmt::Display;

/// One accessor step into a JSON document: an object key or an array index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
	Key(String),
	Index(usize),
}

/// The sub-path at which a diagnostic was recorded, from the document root
/// down to the offending value.
///
/// Displays in JSONPath-like notation: `$` for the root, then
/// `$.features[2].geometry.coordinates[0]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JsonPath(Vec<PathSegment>);

impl JsonPath {
	#[must_use]
	pub fn root() -> Self {
		Self(Vec::new())
	}

	#[must_use]
	pub fn segments(&self) -> &[PathSegment] {
		&self.0
	}

	#[must_use]
	pub fn is_root(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<PathSegment>> for JsonPath {
	fn from(segments: Vec<PathSegment>) -> Self {
		Self(segments)
	}
}

impl Display for JsonPath {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "$")?;
		for segment in &self.0 {
			match segment {
				PathSegment::Key(key) => write!(f, ".{key}")?,
				PathSegment::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use PathSegment::*;

	#[test]
	fn root_displays_as_dollar() {
		assert_eq!(JsonPath::root().to_string(), "$");
		assert!(JsonPath::root().is_root());
	}

	#[test]
	fn nested_path_display() {
		let path = JsonPath::from(vec![
			Key("features".to_string()),
			Index(2),
			Key("geometry".to_string()),
			Key("coordinates".to_string()),
			Index(0),
			Index(3),
		]);
		assert_eq!(path.to_string(), "$.features[2].geometry.coordinates[0][3]");
	}
}
