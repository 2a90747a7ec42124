use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use super::animation::{AnimationConfig, Easing};
use super::focus::HoverTarget;
use super::legend::LegendRow;

/// Identifier of a category. Numeric ids from the dataset are kept in their
/// JSON text form so `1` and `"1"` name the same category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub String);

impl fmt::Display for CategoryId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for CategoryId {
	fn from(s: &str) -> Self {
		Self(s.to_owned())
	}
}

impl From<i64> for CategoryId {
	fn from(n: i64) -> Self {
		Self(n.to_string())
	}
}

/// One node of the category tree, resolved from the raw dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryNode {
	/// `None` marks the "direct" bucket of its sibling list.
	pub id: Option<CategoryId>,
	/// Display title.
	pub title: String,
	/// Coerced numeric value, never negative or non-finite.
	pub value: f64,
	/// The value exactly as supplied, for display.
	pub display_value: String,
	/// Hatched share of the wedge, 0 to 100.
	pub shaded_percent: Option<f64>,
	/// `None` marks a leaf.
	pub children: Option<Vec<Arc<CategoryNode>>>,
}

impl CategoryNode {
	/// Whether the node has no children list.
	pub fn is_leaf(&self) -> bool {
		self.children.is_none()
	}

	/// Whether this is the id-less "direct" bucket.
	pub fn is_direct(&self) -> bool {
		self.id.is_none()
	}

	/// Key tying the node to its legend row.
	pub fn key(&self) -> LegendKey {
		LegendKey(self.id.clone())
	}
}

/// Lookup key tying a wedge to its legend row.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LegendKey(pub Option<CategoryId>);

impl fmt::Display for LegendKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.0 {
			Some(id) => write!(f, "{id}"),
			None => f.write_str("direct"),
		}
	}
}

/// Dataset field names for each logical role.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataSchema {
	/// Field holding the category id.
	pub id_field: String,
	/// Also used for breadcrumbs.
	pub title_field: String,
	/// Field holding the value.
	pub value_field: String,
	/// Field holding the child list.
	pub children_field: String,
	/// Enables the hatched overlay ring when set.
	pub shaded_percent_field: Option<String>,
}

impl Default for DataSchema {
	fn default() -> Self {
		Self {
			id_field: "id_category".into(),
			title_field: "category".into(),
			value_field: "cost".into(),
			children_field: "categories".into(),
			shaded_percent_field: None,
		}
	}
}

/// Produces the inner markup of a legend `<tr>`.
pub type RowTemplate = Arc<dyn Fn(&LegendRow) -> String + Send + Sync>;
/// Produces one line of the focus surface.
pub type FocusTemplate = Arc<dyn Fn(&HoverTarget) -> String + Send + Sync>;

/// Pluggable markup and label producers.
#[derive(Clone)]
pub struct Templates {
	/// Legend row markup.
	pub row: RowTemplate,
	/// First line of the center label.
	pub focus_label: FocusTemplate,
	/// Second line of the center label.
	pub focus_sub_label: FocusTemplate,
}

impl Default for Templates {
	fn default() -> Self {
		Self {
			row: Arc::new(super::legend::default_row_template),
			focus_label: Arc::new(super::focus::percentage_label),
			focus_sub_label: Arc::new(|target: &HoverTarget| format!("${}", target.node.display_value)),
		}
	}
}

impl fmt::Debug for Templates {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Templates").finish_non_exhaustive()
	}
}

/// Chart options. Validated once by [`super::ChartController::new`] and
/// immutable afterwards.
#[derive(Clone, Debug)]
pub struct PieConfig {
	/// Chart width in pixels.
	pub width: f64,
	/// Chart height in pixels.
	pub height: f64,
	/// Element id of the drawing surface.
	pub chart_id: Option<String>,
	/// Element id of the legend container.
	pub legend_container: Option<String>,
	/// Element id of the navigation control.
	pub navigation: Option<String>,
	/// How far a hovered wedge grows outward.
	pub hover_radius_diff: f64,
	/// Hide the navigation control on level 1.
	pub hide_nav_on_root: bool,
	/// Field names in the dataset.
	pub data_schema: DataSchema,
	/// Sweep-in of a freshly drawn level.
	pub hover_pie_animation: AnimationConfig,
	/// Hover grow of a wedge.
	pub focus_animation: AnimationConfig,
	/// Markup and label producers.
	pub templates: Templates,
}

impl Default for PieConfig {
	fn default() -> Self {
		Self {
			width: 400.0,
			height: 250.0,
			chart_id: None,
			legend_container: None,
			navigation: None,
			hover_radius_diff: 10.0,
			hide_nav_on_root: true,
			data_schema: DataSchema::default(),
			hover_pie_animation: AnimationConfig {
				easing: Easing::Elastic,
				duration_ms: 1000.0,
			},
			focus_animation: AnimationConfig {
				easing: Easing::QuartInOut,
				duration_ms: 100.0,
			},
			templates: Templates::default(),
		}
	}
}

impl PieConfig {
	/// Whether the hatched overlay pass is drawn.
	pub fn shaded_overlay(&self) -> bool {
		self.data_schema.shaded_percent_field.is_some()
	}
}
