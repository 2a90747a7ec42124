use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use log::warn;

use super::color::{Color, ColorAssigner};
use super::types::{CategoryNode, LegendKey};

/// One legend line, derived from a visible category.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendRow {
	/// Key of the matching wedge.
	pub key: LegendKey,
	/// Same color as the matching wedge.
	pub color: Color,
	/// Row of the "direct" bucket.
	pub is_direct: bool,
	/// Display title.
	pub title: String,
	/// Value text as supplied.
	pub value: String,
	/// Category a click on the row drills into.
	pub node: Arc<CategoryNode>,
}

impl LegendRow {
	/// DOM class used by hosts that style rows per category.
	pub fn class_name(&self) -> String {
		format!("legend-row-{}", self.key)
	}
}

/// One ancestor in the navigation trail.
#[derive(Clone, Debug, PartialEq)]
pub struct Breadcrumb {
	/// Display title.
	pub title: String,
	/// Level shown when this crumb is activated.
	pub level: usize,
}

/// Keeps legend rows and breadcrumbs in step with the visible level.
#[derive(Clone, Debug, Default)]
pub struct LegendSynchronizer {
	rows: Vec<LegendRow>,
	by_key: HashMap<LegendKey, usize>,
	highlighted: Option<usize>,
	breadcrumbs: Vec<Breadcrumb>,
}

impl LegendSynchronizer {
	/// Replaces every row with one per visible node, in node order.
	pub fn rebuild(&mut self, visible: &[Arc<CategoryNode>], colors: &mut ColorAssigner) -> &[LegendRow] {
		self.rows.clear();
		self.by_key.clear();
		self.highlighted = None;

		for (index, node) in visible.iter().enumerate() {
			let key = node.key();
			match self.by_key.entry(key.clone()) {
				Entry::Vacant(slot) => {
					slot.insert(index);
				}
				Entry::Occupied(_) => {
					warn!("duplicate category key {key} among siblings; hover and clicks resolve to the first");
				}
			}
			self.rows.push(LegendRow {
				color: colors.color_for(node.id.as_ref()),
				is_direct: node.is_direct(),
				title: node.title.clone(),
				value: node.display_value.clone(),
				node: Arc::clone(node),
				key,
			});
		}
		&self.rows
	}

	/// Regenerates the trail from the drill chain, oldest ancestor first.
	pub fn rebuild_breadcrumbs(&mut self, chain: &[Arc<CategoryNode>]) -> &[Breadcrumb] {
		self.breadcrumbs = chain
			.iter()
			.enumerate()
			.map(|(i, node)| Breadcrumb {
				title: node.title.clone(),
				level: i + 2,
			})
			.collect();
		&self.breadcrumbs
	}

	/// Rows in display order.
	pub fn rows(&self) -> &[LegendRow] {
		&self.rows
	}

	/// Breadcrumb trail, oldest ancestor first.
	pub fn breadcrumbs(&self) -> &[Breadcrumb] {
		&self.breadcrumbs
	}

	/// Row for `key`; the first one when siblings share a key.
	pub fn row(&self, key: &LegendKey) -> Option<&LegendRow> {
		self.by_key.get(key).map(|&i| &self.rows[i])
	}

	/// The node a row click should drill into, or `None` for unknown rows.
	pub fn click(&self, key: &LegendKey) -> Option<Arc<CategoryNode>> {
		self.row(key).map(|row| Arc::clone(&row.node))
	}

	/// Marks the row for `key`; `false` when no such row exists.
	pub fn highlight(&mut self, key: &LegendKey) -> bool {
		self.highlighted = self.by_key.get(key).copied();
		self.highlighted.is_some()
	}

	/// Clears the mark if `key` holds it.
	pub fn unhighlight(&mut self, key: &LegendKey) {
		if self.highlighted.is_some() && self.highlighted == self.by_key.get(key).copied() {
			self.highlighted = None;
		}
	}

	/// The row currently marked as hovered.
	pub fn highlighted(&self) -> Option<&LegendRow> {
		self.highlighted.map(|i| &self.rows[i])
	}
}

fn escape_html(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			_ => out.push(c),
		}
	}
	out
}

/// Color swatch, optional "direct" marker, title and cost cells.
pub fn default_row_template(row: &LegendRow) -> String {
	let mut output = format!(
		r#"<td class="color-cell"><span class="cat-color" style="background: {}"></span></td><td>"#,
		row.color
	);
	if row.is_direct {
		output.push_str(r#"<span title="Directly in this category" rel="tooltip"><i class="icon-info"></i></span>"#);
	}
	output.push_str(&escape_html(&row.title));
	output.push_str(r#"</td><td class="cost">$"#);
	output.push_str(&escape_html(&row.value));
	output.push_str("</td>");
	output
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::hierarchical_pie::color::NEUTRAL;
	use crate::components::hierarchical_pie::types::CategoryId;

	fn node(id: Option<&str>, title: &str) -> Arc<CategoryNode> {
		Arc::new(CategoryNode {
			id: id.map(CategoryId::from),
			title: title.into(),
			value: 1.0,
			display_value: "1".into(),
			shaded_percent: None,
			children: None,
		})
	}

	#[test]
	fn rows_follow_input_order_and_replace_previous() {
		let mut colors = ColorAssigner::default();
		let mut legend = LegendSynchronizer::default();
		legend.rebuild(&[node(Some("a"), "A"), node(Some("b"), "B"), node(None, "Direct")], &mut colors);
		assert_eq!(legend.rows().len(), 3);

		let rows = legend.rebuild(&[node(Some("c"), "C"), node(Some("a"), "A")], &mut colors);
		let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
		assert_eq!(titles, ["C", "A"]);
		assert!(legend.row(&LegendKey(Some("b".into()))).is_none());
	}

	#[test]
	fn rows_are_found_by_key() {
		let mut colors = ColorAssigner::default();
		let mut legend = LegendSynchronizer::default();
		legend.rebuild(&[node(Some("a"), "A"), node(None, "Direct")], &mut colors);

		let direct = legend.row(&LegendKey(None)).unwrap();
		assert!(direct.is_direct);
		assert_eq!(direct.color, NEUTRAL);
		assert_eq!(direct.class_name(), "legend-row-direct");
		assert_eq!(legend.click(&LegendKey(Some("a".into()))).unwrap().title, "A");
	}

	#[test]
	fn one_row_highlighted_at_a_time() {
		let mut colors = ColorAssigner::default();
		let mut legend = LegendSynchronizer::default();
		legend.rebuild(&[node(Some("a"), "A"), node(Some("b"), "B")], &mut colors);
		let (a, b) = (LegendKey(Some("a".into())), LegendKey(Some("b".into())));

		assert!(legend.highlight(&a));
		assert!(legend.highlight(&b));
		assert_eq!(legend.highlighted().unwrap().title, "B");
		legend.unhighlight(&a);
		assert_eq!(legend.highlighted().unwrap().title, "B");
		legend.unhighlight(&b);
		assert!(legend.highlighted().is_none());
	}

	#[test]
	fn breadcrumbs_track_chain() {
		let mut legend = LegendSynchronizer::default();
		let crumbs = legend.rebuild_breadcrumbs(&[node(Some("a"), "Food"), node(Some("b"), "Dining")]);
		assert_eq!(
			crumbs,
			[
				Breadcrumb { title: "Food".into(), level: 2 },
				Breadcrumb { title: "Dining".into(), level: 3 },
			]
		);
		assert!(legend.rebuild_breadcrumbs(&[]).is_empty());
	}

	#[test]
	fn default_template_escapes_and_marks_direct() {
		let mut colors = ColorAssigner::default();
		let mut legend = LegendSynchronizer::default();
		legend.rebuild(&[node(None, "<b>Misc</b>")], &mut colors);
		let html = default_row_template(&legend.rows()[0]);
		assert!(html.contains("icon-info"));
		assert!(html.contains("&lt;b&gt;Misc&lt;/b&gt;"));
		assert!(html.contains("#dddddd"));
		assert!(html.ends_with(r#"<td class="cost">$1</td>"#));
	}
}
