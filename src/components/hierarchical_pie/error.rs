use thiserror::Error;

/// Construction-time failures. The chart refuses to render with any of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
	/// A schema field name is blank.
	#[error("schema field for {role} is empty")]
	MissingField {
		/// Role of the field.
		role: &'static str,
	},

	/// Two roles map to the same field name.
	#[error("schema field `{field}` is used for both {first} and {second}")]
	DuplicateField {
		/// The shared field name.
		field: String,
		/// Role listed first.
		first: &'static str,
		/// Role that repeats it.
		second: &'static str,
	},

	/// A required element id is absent.
	#[error("no container reference given for {role}")]
	MissingContainer {
		/// Which container.
		role: &'static str,
	},

	/// Width or height is not a positive number.
	#[error("invalid chart dimensions {width}x{height}")]
	InvalidDimensions {
		/// Configured width.
		width: f64,
		/// Configured height.
		height: f64,
	},

	/// Hover growth would reach into the donut hole.
	#[error("hover radius difference {0} does not fit inside the ring")]
	InvalidHoverRadius(f64),

	/// An animation duration is negative or not finite.
	#[error("invalid {role} animation duration {duration_ms}")]
	InvalidAnimation {
		/// Which animation.
		role: &'static str,
		/// Configured duration.
		duration_ms: f64,
	},

	/// The dataset is neither a category object nor a list.
	#[error("invalid dataset: {0}")]
	InvalidDataset(String),
}

/// Interaction and data problems that never abort the chart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PieError {
	/// Drill requested on a leaf.
	#[error("`{title}` has no children to drill into")]
	InvalidDrillTarget {
		/// Title of the leaf.
		title: String,
	},

	/// A value could not be read as a number.
	#[error("value `{raw}` of `{title}` is not numeric")]
	MalformedValue {
		/// Title of the category.
		title: String,
		/// The value as supplied.
		raw: String,
	},
}
