use std::sync::Arc;

use super::geometry::AngularSpan;
use super::types::{CategoryNode, Templates};

/// The wedge under the pointer.
#[derive(Clone, Debug)]
pub struct HoverTarget {
	/// Extent of the hovered wedge.
	pub span: AngularSpan,
	/// Category under the pointer.
	pub node: Arc<CategoryNode>,
}

/// Center label contents. Hiding keeps the text so a quick re-hover shows
/// the old value while fading back in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FocusSurface {
	/// Share of the circle, e.g. `"25.0%"`.
	pub label: String,
	/// Value line, e.g. `"$100"`.
	pub sub_label: String,
	/// Whether the label is shown.
	pub visible: bool,
}

/// `"25.0%"` for a quarter of the circle. Ties round up, so 12.25 reads
/// as `"12.3%"`.
pub fn percentage_label(target: &HoverTarget) -> String {
	let percent = (target.span.fraction() * 100.0 * 10.0).round() / 10.0;
	format!("{percent:.1}%")
}

#[derive(Clone, Debug, Default)]
pub struct HoverFocusComputer {
	surface: FocusSurface,
}

impl HoverFocusComputer {
	/// Shows `target` through the focus templates.
	pub fn on_hover(&mut self, target: &HoverTarget, templates: &Templates) -> &FocusSurface {
		self.surface.label = (templates.focus_label)(target);
		self.surface.sub_label = (templates.focus_sub_label)(target);
		self.surface.visible = true;
		&self.surface
	}

	/// Hides the surface, keeping its text.
	pub fn on_hover_end(&mut self) -> &FocusSurface {
		self.surface.visible = false;
		&self.surface
	}

	/// Current surface.
	pub fn surface(&self) -> &FocusSurface {
		&self.surface
	}
}
