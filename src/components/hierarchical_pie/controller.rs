//! Ties navigation, coloring, legend and focus together and hands complete
//! frames to the renderer.

use std::sync::Arc;

use log::{debug, info};
use serde_json::Value;

use super::color::{Color, ColorAssigner};
use super::error::{ConfigError, PieError};
use super::focus::{FocusSurface, HoverFocusComputer, HoverTarget};
use super::geometry::{AngularSpan, ArcLayout, PieLayout, RingGeometry};
use super::legend::{Breadcrumb, LegendRow, LegendSynchronizer};
use super::navigation::{NavEvent, NavigationState};
use super::schema::validate_config;
use super::types::{CategoryNode, LegendKey, PieConfig};

/// One wedge of the visible ring, in layout order.
#[derive(Clone, Debug, PartialEq)]
pub struct Wedge {
	/// Key shared with the legend row.
	pub key: LegendKey,
	/// Category the wedge draws.
	pub node: Arc<CategoryNode>,
	/// Laid-out extent, before any sweep-in transition.
	pub span: AngularSpan,
	/// Palette color of the category.
	pub fill: Color,
	/// Outline, a darker shade of `fill`.
	pub stroke: Color,
	/// Inner radius of the hatched ring, set when the overlay is enabled.
	pub shaded_inner_radius: Option<f64>,
}

impl Wedge {
	/// `category-pie-{key}`, plus `pie-leaf` when it cannot be drilled into.
	pub fn class_name(&self) -> String {
		let mut class = format!("category-pie-{}", self.key);
		if self.node.is_leaf() {
			class.push_str(" pie-leaf");
		}
		class
	}
}

/// Everything needed to redraw the chart from scratch.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
	/// 1 for the root.
	pub level: usize,
	/// Wedges of the visible level.
	pub wedges: Vec<Wedge>,
	/// Legend rows, one per wedge.
	pub legend: Vec<LegendRow>,
	/// Trail of drilled-into ancestors.
	pub breadcrumbs: Vec<Breadcrumb>,
	/// Whether the breadcrumb and button bar is shown.
	pub show_navigation: bool,
	/// Radii the wedges are drawn with.
	pub ring: RingGeometry,
}

/// The drawing substrate.
pub trait PieRenderer {
	/// Replaces all wedge, legend and breadcrumb content with `frame`.
	fn render(&mut self, frame: &RenderFrame);

	/// Updates the center label and the highlighted legend row.
	fn focus(&mut self, surface: &FocusSurface, highlighted: Option<&LegendKey>);
}

/// Input from the host or the pointer.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartEvent {
	/// Drill into the wedge, ignored for leaves.
	WedgeClicked(LegendKey),
	/// Same as clicking the matching wedge.
	LegendRowClicked(LegendKey),
	/// Jump back to the given level.
	BreadcrumbClicked(usize),
	/// Back to level 1.
	Root,
	/// One level up.
	Up,
	/// Pointer entered a wedge.
	WedgeHovered(LegendKey),
	/// Pointer left a wedge.
	WedgeHoverEnded(LegendKey),
}

/// What an event ended up doing.
#[derive(Clone, Debug, PartialEq)]
pub enum Dispatch {
	/// A new frame was drawn.
	Rendered,
	/// Only the focus surface and highlight changed.
	Focused,
	/// Nothing changed.
	Ignored,
}

/// Owns the chart state and feeds every change to a [`PieRenderer`].
pub struct ChartController<R> {
	config: PieConfig,
	ring: RingGeometry,
	root: Vec<Arc<CategoryNode>>,
	nav: NavigationState,
	colors: ColorAssigner,
	legend: LegendSynchronizer,
	focus: HoverFocusComputer,
	layout: Box<dyn ArcLayout>,
	frame: Option<RenderFrame>,
	renderer: R,
}

impl<R: PieRenderer> ChartController<R> {
	/// Validates `config`, resolves `data` and draws the root level.
	pub fn new(config: PieConfig, data: &Value, renderer: R) -> Result<Self, ConfigError> {
		Self::with_layout(config, data, renderer, Box::new(PieLayout))
	}

	/// Like [`ChartController::new`] with a custom angular layout.
	pub fn with_layout(
		config: PieConfig,
		data: &Value,
		renderer: R,
		layout: Box<dyn ArcLayout>,
	) -> Result<Self, ConfigError> {
		let schema = validate_config(&config)?;
		let root = schema.root_level(data)?;
		let ring = RingGeometry::new(config.width, config.height, config.hover_radius_diff);
		let mut controller = Self {
			config,
			ring,
			root,
			nav: NavigationState::default(),
			colors: ColorAssigner::default(),
			legend: LegendSynchronizer::default(),
			focus: HoverFocusComputer::default(),
			layout,
			frame: None,
			renderer,
		};
		info!("pie chart ready with {} root categories", controller.root.len());
		controller.render_level();
		Ok(controller)
	}

	/// Applies one event, redrawing at most once.
	pub fn dispatch(&mut self, event: ChartEvent) -> Dispatch {
		debug!("chart event {event:?}");
		match event {
			ChartEvent::Root => self.navigate(NavEvent::GoToRoot),
			ChartEvent::Up => self.navigate(NavEvent::GoLevelUp),
			ChartEvent::BreadcrumbClicked(level) => self.navigate(NavEvent::JumpTo(level)),
			ChartEvent::WedgeClicked(key) | ChartEvent::LegendRowClicked(key) => {
				match self.legend.click(&key) {
					Some(node) => self.navigate(NavEvent::DrillInto(node)),
					None => Dispatch::Ignored,
				}
			}
			ChartEvent::WedgeHovered(key) => self.hover(&key),
			ChartEvent::WedgeHoverEnded(key) => self.hover_end(&key),
		}
	}

	fn navigate(&mut self, event: NavEvent) -> Dispatch {
		match self.nav.apply(&event) {
			Ok(next) => {
				let drilled = next.current_level() > self.nav.current_level();
				self.nav = next;
				if drilled {
					self.focus.on_hover_end();
					self.renderer.focus(self.focus.surface(), None);
				}
				self.render_level();
				Dispatch::Rendered
			}
			Err(PieError::InvalidDrillTarget { title }) => {
				debug!("ignoring drill into leaf `{title}`");
				Dispatch::Ignored
			}
			Err(err) => {
				debug!("ignoring navigation: {err}");
				Dispatch::Ignored
			}
		}
	}

	/// Rebuilds the full frame for the current level and hands it over.
	fn render_level(&mut self) {
		let visible = self.nav.visible(&self.root);
		let values: Vec<f64> = visible.iter().map(|node| node.value).collect();
		let spans = self.layout.spans(&values);
		let shaded = self.config.shaded_overlay();

		let wedges: Vec<Wedge> = visible
			.iter()
			.zip(spans)
			.map(|(node, span)| {
				let fill = self.colors.color_for(node.id.as_ref());
				Wedge {
					key: node.key(),
					node: Arc::clone(node),
					span,
					fill,
					stroke: fill.darker(),
					shaded_inner_radius: shaded
						.then(|| self.ring.shaded_inner_radius(node.shaded_percent.unwrap_or(0.0))),
				}
			})
			.collect();

		let legend = self.legend.rebuild(visible, &mut self.colors).to_vec();
		let breadcrumbs = self.legend.rebuild_breadcrumbs(self.nav.ancestor_chain()).to_vec();
		let level = self.nav.current_level();
		let frame = RenderFrame {
			level,
			wedges,
			legend,
			breadcrumbs,
			show_navigation: !(self.config.hide_nav_on_root && level == 1),
			ring: self.ring,
		};
		debug!("rendering level {level} with {} wedges", frame.wedges.len());
		self.renderer.render(&frame);
		self.frame = Some(frame);
	}

	fn hover(&mut self, key: &LegendKey) -> Dispatch {
		let Some(wedge) = self.wedge(key) else {
			return Dispatch::Ignored;
		};
		let target = HoverTarget {
			span: wedge.span,
			node: Arc::clone(&wedge.node),
		};
		self.legend.highlight(key);
		let surface = self.focus.on_hover(&target, &self.config.templates);
		self.renderer.focus(surface, Some(key));
		Dispatch::Focused
	}

	fn hover_end(&mut self, key: &LegendKey) -> Dispatch {
		self.legend.unhighlight(key);
		let surface = self.focus.on_hover_end();
		let highlighted = self.legend.highlighted().map(|row| &row.key);
		self.renderer.focus(surface, highlighted);
		Dispatch::Focused
	}

	fn wedge(&self, key: &LegendKey) -> Option<&Wedge> {
		self.frame.as_ref()?.wedges.iter().find(|w| &w.key == key)
	}

	/// Current drill stack.
	pub fn navigation(&self) -> &NavigationState {
		&self.nav
	}

	/// Categories on screen, in wedge order.
	pub fn visible(&self) -> &[Arc<CategoryNode>] {
		self.nav.visible(&self.root)
	}

	/// The last frame handed to the renderer.
	pub fn frame(&self) -> Option<&RenderFrame> {
		self.frame.as_ref()
	}

	/// Legend rows and breadcrumbs.
	pub fn legend(&self) -> &LegendSynchronizer {
		&self.legend
	}

	/// Current center label.
	pub fn focus_surface(&self) -> &FocusSurface {
		self.focus.surface()
	}

	/// The validated configuration.
	pub fn config(&self) -> &PieConfig {
		&self.config
	}

	/// Color of `key`, assigning one if it has never been seen.
	pub fn color_for(&mut self, key: &LegendKey) -> Color {
		self.colors.color_for(key.0.as_ref())
	}

	/// The drawing substrate.
	pub fn renderer(&self) -> &R {
		&self.renderer
	}
}
