use super::animation::{AnimationConfig, Easing, Tween};
use super::controller::Wedge;
use super::geometry::{RingGeometry, ring_segment_path};
use super::types::LegendKey;

/// Fade used for the focus surface.
const FOCUS_FADE: AnimationConfig = AnimationConfig {
	easing: Easing::CubicInOut,
	duration_ms: 250.0,
};

/// Durations and easings driving [`Motion`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
	pub sweep: AnimationConfig,
	pub grow: AnimationConfig,
	/// Hover grow is off while the hatched overlay is drawn.
	pub grow_enabled: bool,
}

/// In-flight transitions of the current frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Motion {
	pub sweep: Tween,
	pub hovered: Option<LegendKey>,
	pub grow: Tween,
	pub focus: Tween,
}

impl Default for Motion {
	fn default() -> Self {
		Self {
			sweep: Tween::settled(1.0),
			hovered: None,
			grow: Tween::default(),
			focus: Tween::default(),
		}
	}
}

impl Motion {
	/// A new frame sweeps in from nothing; old hover state belongs to
	/// removed wedges.
	pub fn restart_sweep(&mut self) {
		self.sweep.restart();
		self.hovered = None;
		self.grow = Tween::default();
	}

	pub fn hover(&mut self, key: Option<&LegendKey>) {
		match key {
			Some(key) => {
				if self.hovered.as_ref() != Some(key) {
					self.hovered = Some(key.clone());
					self.grow = Tween::default();
				}
				self.grow.target = 1.0;
			}
			None => self.grow.target = 0.0,
		}
	}

	pub fn show_focus(&mut self, visible: bool) {
		self.focus.target = if visible { 1.0 } else { 0.0 };
	}

	pub fn is_settled(&self) -> bool {
		self.sweep.is_settled() && self.grow.is_settled() && self.focus.is_settled()
	}

	pub fn tick(&mut self, dt_ms: f64, timing: &Timing) {
		self.sweep.tick(dt_ms, timing.sweep.duration_ms);
		self.grow.tick(dt_ms, timing.grow.duration_ms);
		self.focus.tick(dt_ms, FOCUS_FADE.duration_ms);
		if self.grow.is_settled() && self.grow.t == 0.0 {
			self.hovered = None;
		}
	}

	pub fn focus_opacity(&self) -> f64 {
		self.focus.eased(FOCUS_FADE.easing)
	}
}

/// Ring-segment path of `wedge` at the current point of its transitions.
pub fn wedge_outline(wedge: &Wedge, ring: RingGeometry, motion: &Motion, timing: &Timing) -> String {
	let span = wedge.span.grow_from_zero(motion.sweep.eased(timing.sweep.easing));
	let outer = if timing.grow_enabled && motion.hovered.as_ref() == Some(&wedge.key) {
		let grow = motion.grow.eased(timing.grow.easing);
		ring.outer_radius + (ring.hover_outer_radius - ring.outer_radius) * grow
	} else {
		ring.outer_radius
	};
	ring_segment_path(span, ring.inner_radius, outer)
}

/// Path of the hatched overlay ring, when the overlay is enabled.
pub fn wedge_hatch(wedge: &Wedge, ring: RingGeometry, motion: &Motion, timing: &Timing) -> Option<String> {
	let span = wedge.span.grow_from_zero(motion.sweep.eased(timing.sweep.easing));
	wedge
		.shaded_inner_radius
		.map(|inner| ring_segment_path(span, inner, ring.outer_radius))
}

#[cfg(test)]
mod tests {
	use std::f64::consts::PI;
	use std::sync::Arc;

	use super::*;
	use crate::components::hierarchical_pie::color::PALETTE;
	use crate::components::hierarchical_pie::geometry::AngularSpan;
	use crate::components::hierarchical_pie::types::{CategoryId, CategoryNode};

	const RING: RingGeometry = RingGeometry {
		radius: 100.0,
		inner_radius: 50.0,
		outer_radius: 90.0,
		hover_outer_radius: 100.0,
	};

	fn wedges(shaded: Option<f64>) -> Vec<Wedge> {
		let wedge = |id: &str, start: f64, end: f64| Wedge {
			key: LegendKey(Some(CategoryId::from(id))),
			node: Arc::new(CategoryNode {
				id: Some(CategoryId::from(id)),
				title: id.into(),
				value: 1.0,
				display_value: "1".into(),
				shaded_percent: shaded,
				children: None,
			}),
			span: AngularSpan::new(start, end),
			fill: PALETTE[0],
			stroke: PALETTE[0].darker(),
			shaded_inner_radius: shaded.map(|_| 80.0),
		};
		vec![wedge("a", 0.0, PI), wedge("b", PI, 2.0 * PI)]
	}

	fn outlines(wedges: &[Wedge], motion: &Motion, timing: &Timing) -> Vec<String> {
		wedges.iter().map(|w| wedge_outline(w, RING, motion, timing)).collect()
	}

	fn timing(grow_enabled: bool) -> Timing {
		Timing {
			sweep: AnimationConfig {
				easing: Easing::Linear,
				duration_ms: 100.0,
			},
			grow: AnimationConfig {
				easing: Easing::Linear,
				duration_ms: 100.0,
			},
			grow_enabled,
		}
	}

	#[test]
	fn sweep_restarts_from_nothing() {
		let mut motion = Motion::default();
		motion.restart_sweep();
		let start = outlines(&wedges(None), &motion, &timing(true));
		let settled = outlines(&wedges(None), &Motion::default(), &timing(true));
		assert_ne!(start[1], settled[1]);

		motion.tick(100.0, &timing(true));
		assert_eq!(outlines(&wedges(None), &motion, &timing(true)), settled);
	}

	#[test]
	fn hovered_wedge_grows_to_full_radius() {
		let key = LegendKey(Some(CategoryId::from("a")));
		let mut motion = Motion::default();
		motion.hover(Some(&key));
		motion.tick(100.0, &timing(true));
		let paths = outlines(&wedges(None), &motion, &timing(true));
		assert!(paths[0].contains("A100.000,100.000"));
		assert!(paths[1].contains("A90.000,90.000"));

		motion.hover(None);
		motion.tick(100.0, &timing(true));
		assert!(motion.hovered.is_none());
		assert!(motion.is_settled());
	}

	#[test]
	fn shaded_overlay_adds_hatch_and_disables_grow() {
		let key = LegendKey(Some(CategoryId::from("a")));
		let mut motion = Motion::default();
		motion.hover(Some(&key));
		motion.tick(100.0, &timing(false));
		let shaded = wedges(Some(50.0));
		assert!(outlines(&shaded, &motion, &timing(false))[0].contains("A90.000,90.000"));
		assert!(shaded.iter().all(|w| {
			wedge_hatch(w, RING, &motion, &timing(false)).is_some_and(|h| h.contains("A80.000,80.000"))
		}));
		assert!(wedge_hatch(&wedges(None)[0], RING, &motion, &timing(false)).is_none());
	}

	#[test]
	fn focus_fades_both_ways() {
		let mut motion = Motion::default();
		motion.show_focus(true);
		motion.tick(250.0, &timing(true));
		assert_eq!(motion.focus_opacity(), 1.0);
		motion.show_focus(false);
		motion.tick(125.0, &timing(true));
		assert!(motion.focus_opacity() > 0.0 && motion.focus_opacity() < 1.0);
	}
}
