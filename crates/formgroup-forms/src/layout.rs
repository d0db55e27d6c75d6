//! Layout modes for form groups

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Arrangement of label, control and feedback within one form group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
	/// Label above the control, everything inside one group container
	#[default]
	Vertical,
	/// Label and control side by side in a grid row
	Horizontal,
	/// No group container, label visually hidden
	Inline,
}

impl Layout {
	pub fn as_str(&self) -> &'static str {
		match self {
			Layout::Vertical => "vertical",
			Layout::Horizontal => "horizontal",
			Layout::Inline => "inline",
		}
	}
}

impl fmt::Display for Layout {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Layout {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"vertical" => Ok(Layout::Vertical),
			"horizontal" => Ok(Layout::Horizontal),
			"inline" => Ok(Layout::Inline),
			other => Err(format!("Unknown layout: {other}")),
		}
	}
}

/// Where a field kind places its label relative to the control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelPosition {
	#[default]
	Before,
	After,
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("vertical", Layout::Vertical)]
	#[case("Horizontal", Layout::Horizontal)]
	#[case("INLINE", Layout::Inline)]
	fn test_layout_from_str(#[case] input: &str, #[case] expected: Layout) {
		assert_eq!(input.parse::<Layout>().unwrap(), expected);
	}

	#[rstest]
	fn test_layout_from_str_rejects_unknown() {
		assert!("grid".parse::<Layout>().is_err());
	}

	#[rstest]
	fn test_layout_default_is_vertical() {
		assert_eq!(Layout::default(), Layout::Vertical);
	}
}
