//! Resolves the configured field names into typed accessors and turns the
//! raw dataset into an immutable category tree.

use std::sync::Arc;

use log::{debug, warn};
use serde_json::{Map, Number, Value};

use super::error::{ConfigError, PieError};
use super::types::{CategoryId, CategoryNode, DataSchema, PieConfig};

type Object = Map<String, Value>;

/// A single dataset field name, checked non-empty.
#[derive(Clone, Debug, PartialEq)]
struct Field(String);

impl Field {
	fn resolve(name: &str, role: &'static str) -> Result<Self, ConfigError> {
		let name = name.trim();
		if name.is_empty() {
			return Err(ConfigError::MissingField { role });
		}
		Ok(Self(name.to_owned()))
	}

	fn get<'a>(&self, obj: &'a Object) -> Option<&'a Value> {
		obj.get(&self.0)
	}
}

/// Typed view over [`DataSchema`].
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSchema {
	id: Field,
	title: Field,
	value: Field,
	children: Field,
	shaded_percent: Option<Field>,
}

impl ResolvedSchema {
	pub fn resolve(schema: &DataSchema) -> Result<Self, ConfigError> {
		let resolved = Self {
			id: Field::resolve(&schema.id_field, "id")?,
			title: Field::resolve(&schema.title_field, "title")?,
			value: Field::resolve(&schema.value_field, "value")?,
			children: Field::resolve(&schema.children_field, "children")?,
			shaded_percent: schema
				.shaded_percent_field
				.as_deref()
				.map(|name| Field::resolve(name, "shaded percent"))
				.transpose()?,
		};

		let mut roles: Vec<(&Field, &'static str)> = vec![
			(&resolved.id, "id"),
			(&resolved.title, "title"),
			(&resolved.value, "value"),
			(&resolved.children, "children"),
		];
		if let Some(field) = &resolved.shaded_percent {
			roles.push((field, "shaded percent"));
		}
		for (i, (field, first)) in roles.iter().enumerate() {
			if let Some((_, second)) = roles[i + 1..].iter().find(|(other, _)| other == field) {
				return Err(ConfigError::DuplicateField {
					field: field.0.clone(),
					first: *first,
					second: *second,
				});
			}
		}
		Ok(resolved)
	}

	fn id(&self, obj: &Object) -> Option<CategoryId> {
		match self.id.get(obj)? {
			Value::Null => None,
			Value::String(s) => Some(CategoryId(s.clone())),
			Value::Number(n) => Some(CategoryId(number_text(n))),
			other => Some(CategoryId(other.to_string())),
		}
	}

	fn title(&self, obj: &Object) -> String {
		match self.title.get(obj) {
			Some(Value::String(s)) => s.clone(),
			Some(Value::Null) | None => String::new(),
			Some(other) => other.to_string(),
		}
	}

	fn display_value(&self, obj: &Object) -> String {
		match self.value.get(obj) {
			Some(Value::String(s)) => s.clone(),
			Some(Value::Number(n)) => number_text(n),
			Some(Value::Null) | None => String::new(),
			Some(other) => other.to_string(),
		}
	}

	/// Parses one node and its subtree.
	pub fn node(&self, obj: &Object) -> CategoryNode {
		let title = self.title(obj);
		let value = coerce_number(self.value.get(obj)).unwrap_or_else(|| {
			let err = PieError::MalformedValue {
				title: title.clone(),
				raw: self.display_value(obj),
			};
			warn!("{err}; laying it out as zero");
			0.0
		});
		let shaded_percent = self
			.shaded_percent
			.as_ref()
			.map(|field| coerce_number(field.get(obj)).unwrap_or(0.0).clamp(0.0, 100.0));
		let children = match self.children.get(obj) {
			Some(Value::Array(items)) => Some(self.siblings(items)),
			Some(Value::Null) | None => None,
			Some(other) => {
				warn!("children of `{title}` are not a list ({other}); treating it as a leaf");
				None
			}
		};

		CategoryNode {
			id: self.id(obj),
			display_value: self.display_value(obj),
			title,
			value: value.max(0.0),
			shaded_percent,
			children,
		}
	}

	fn siblings(&self, items: &[Value]) -> Vec<Arc<CategoryNode>> {
		items
			.iter()
			.filter_map(|item| match item {
				Value::Object(obj) => Some(Arc::new(self.node(obj))),
				other => {
					warn!("skipping non-object category entry {other}");
					None
				}
			})
			.collect()
	}

	/// Resolves the root level: an array of siblings, or a single object
	/// whose children (or the object itself, for a leaf) form level 1.
	pub fn root_level(&self, data: &Value) -> Result<Vec<Arc<CategoryNode>>, ConfigError> {
		let level = match data {
			Value::Array(items) => self.siblings(items),
			Value::Object(obj) => {
				let node = self.node(obj);
				match node.children {
					Some(children) => children,
					None => vec![Arc::new(node)],
				}
			}
			other => {
				return Err(ConfigError::InvalidDataset(format!(
					"expected a category object or list, got {other}"
				)));
			}
		};
		debug!("resolved {} root categories", level.len());
		Ok(level)
	}
}

/// Prints a JSON number the way a browser would, so `100.0` reads `100`.
fn number_text(n: &Number) -> String {
	match n.as_f64() {
		Some(f) if n.is_f64() && f == 0.0 => "0".to_owned(),
		Some(f) if n.is_f64() => f.to_string(),
		_ => n.to_string(),
	}
}

/// Numeric coercion for dataset values: numbers pass through, strings take
/// their leading numeric prefix. Anything else, or a non-finite result, is
/// malformed.
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
	let n = match value? {
		Value::Number(n) => n.as_f64()?,
		Value::String(s) => parse_float_prefix(s)?,
		_ => return None,
	};
	n.is_finite().then_some(n)
}

fn parse_float_prefix(s: &str) -> Option<f64> {
	let s = s.trim_start();
	let bytes = s.as_bytes();
	let mut end = 0;
	if matches!(bytes.first(), Some(b'+' | b'-')) {
		end += 1;
	}
	let int_start = end;
	while end < bytes.len() && bytes[end].is_ascii_digit() {
		end += 1;
	}
	let mut digits = end - int_start;
	if end < bytes.len() && bytes[end] == b'.' {
		let frac_start = end + 1;
		let mut frac_end = frac_start;
		while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
			frac_end += 1;
		}
		digits += frac_end - frac_start;
		if digits > 0 {
			end = frac_end;
		}
	}
	if digits == 0 {
		return None;
	}
	if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
		let mut exp_end = end + 1;
		if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
			exp_end += 1;
		}
		let exp_digits_start = exp_end;
		while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
			exp_end += 1;
		}
		if exp_end > exp_digits_start {
			end = exp_end;
		}
	}
	s[..end].parse().ok()
}

/// Checks everything about the configuration that does not depend on the
/// dataset.
pub fn validate_config(config: &PieConfig) -> Result<ResolvedSchema, ConfigError> {
	let (width, height) = (config.width, config.height);
	if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
		return Err(ConfigError::InvalidDimensions { width, height });
	}
	let radius = width.min(height) / 2.0;
	let diff = config.hover_radius_diff;
	if !(diff.is_finite() && diff >= 0.0 && diff < radius / 2.0) {
		return Err(ConfigError::InvalidHoverRadius(diff));
	}

	for (role, container) in [
		("chart", &config.chart_id),
		("legend", &config.legend_container),
		("navigation", &config.navigation),
	] {
		if container.as_deref().is_none_or(|c| c.trim().is_empty()) {
			return Err(ConfigError::MissingContainer { role });
		}
	}

	for (role, animation) in [
		("hover pie", &config.hover_pie_animation),
		("focus", &config.focus_animation),
	] {
		let duration_ms = animation.duration_ms;
		if !(duration_ms.is_finite() && duration_ms >= 0.0) {
			return Err(ConfigError::InvalidAnimation { role, duration_ms });
		}
	}

	ResolvedSchema::resolve(&config.data_schema)
}
