//! Angular layout and ring-segment paths. Angles are radians measured
//! clockwise from 12 o'clock.

use std::f64::consts::TAU;
use std::fmt::Write;

/// Angular extent of one wedge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AngularSpan {
	/// Start angle.
	pub start: f64,
	/// End angle.
	pub end: f64,
}

impl AngularSpan {
	/// Span from `start` to `end`.
	pub fn new(start: f64, end: f64) -> Self {
		Self { start, end }
	}

	/// Angle covered, in radians.
	pub fn sweep(&self) -> f64 {
		self.end - self.start
	}

	/// Share of the full circle covered, in `[0, 1]` for laid-out spans.
	pub fn fraction(&self) -> f64 {
		self.sweep() / TAU
	}

	/// Interpolates from the empty span at angle zero, as the sweep-in
	/// transition does.
	pub fn grow_from_zero(&self, t: f64) -> Self {
		Self::new(self.start * t, self.end * t)
	}
}

/// Lays sibling values out around the circle.
pub trait ArcLayout: Send + Sync {
	/// One span per value, in input order, together covering the full
	/// circle unless every value is zero.
	fn spans(&self, values: &[f64]) -> Vec<AngularSpan>;
}

/// Spans proportional to value, unsorted.
#[derive(Clone, Copy, Debug, Default)]
pub struct PieLayout;

impl ArcLayout for PieLayout {
	fn spans(&self, values: &[f64]) -> Vec<AngularSpan> {
		let total: f64 = values.iter().copied().filter(|v| v.is_finite() && *v > 0.0).sum();
		let mut angle = 0.0;
		values
			.iter()
			.map(|&v| {
				let sweep = if total > 0.0 && v.is_finite() && v > 0.0 {
					v / total * TAU
				} else {
					0.0
				};
				let span = AngularSpan::new(angle, angle + sweep);
				angle += sweep;
				span
			})
			.collect()
	}
}

/// Radii of the donut, derived from the chart size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingGeometry {
	/// Half the smaller chart dimension.
	pub radius: f64,
	/// Radius of the donut hole.
	pub inner_radius: f64,
	/// Outer radius of a resting wedge.
	pub outer_radius: f64,
	/// Outer radius of a hovered wedge.
	pub hover_outer_radius: f64,
}

impl RingGeometry {
	/// Radii for a `width` by `height` chart; resting wedges stop `hover_radius_diff` short of the edge.
	pub fn new(width: f64, height: f64, hover_radius_diff: f64) -> Self {
		let radius = width.min(height) / 2.0;
		Self {
			radius,
			inner_radius: radius / 2.0,
			outer_radius: radius - hover_radius_diff,
			hover_outer_radius: radius,
		}
	}

	/// Inner radius of the hatched ring for a wedge shaded `percent` of the way out.
	pub fn shaded_inner_radius(&self, percent: f64) -> f64 {
		(self.radius - self.inner_radius) * percent / 100.0 + self.inner_radius
	}
}

fn point(radius: f64, angle: f64) -> (f64, f64) {
	(radius * angle.sin(), -radius * angle.cos())
}

/// SVG path data for a ring segment.
pub fn ring_segment_path(span: AngularSpan, inner: f64, outer: f64) -> String {
	let (start, end) = if span.start <= span.end {
		(span.start, span.end)
	} else {
		(span.end, span.start)
	};
	let sweep = end - start;
	let mut d = String::new();

	if sweep >= TAU - 1e-6 {
		// Full ring: two half arcs per circle, inner one wound backwards.
		let _ = write!(
			d,
			"M0,{:.3}A{outer:.3},{outer:.3} 0 1,1 0,{outer:.3}A{outer:.3},{outer:.3} 0 1,1 0,{:.3}",
			-outer, -outer
		);
		if inner > 0.0 {
			let _ = write!(
				d,
				"M0,{:.3}A{inner:.3},{inner:.3} 0 1,0 0,{inner:.3}A{inner:.3},{inner:.3} 0 1,0 0,{:.3}",
				-inner, -inner
			);
		}
		d.push('Z');
		return d;
	}

	let large_arc = u8::from(sweep > std::f64::consts::PI);
	let (x0, y0) = point(outer, start);
	let (x1, y1) = point(outer, end);
	let _ = write!(d, "M{x0:.3},{y0:.3}A{outer:.3},{outer:.3} 0 {large_arc},1 {x1:.3},{y1:.3}");
	if inner > 0.0 {
		let (x2, y2) = point(inner, end);
		let (x3, y3) = point(inner, start);
		let _ = write!(d, "L{x2:.3},{y2:.3}A{inner:.3},{inner:.3} 0 {large_arc},0 {x3:.3},{y3:.3}");
	} else {
		d.push_str("L0,0");
	}
	d.push('Z');
	d
}

#[cfg(test)]
mod tests {
	use std::f64::consts::FRAC_PI_2;

	use super::*;

	#[test]
	fn spans_are_proportional_and_ordered() {
		let spans = PieLayout.spans(&[100.0, 200.0]);
		assert_eq!(spans.len(), 2);
		assert!((spans[0].fraction() - 1.0 / 3.0).abs() < 1e-12);
		assert_eq!(spans[0].end, spans[1].start);
		assert!((spans[1].end - TAU).abs() < 1e-12);
	}

	#[test]
	fn zero_and_bad_values_get_empty_spans() {
		let spans = PieLayout.spans(&[0.0, f64::NAN, 5.0]);
		assert_eq!(spans[0].sweep(), 0.0);
		assert_eq!(spans[1].sweep(), 0.0);
		assert!((spans[2].sweep() - TAU).abs() < 1e-12);

		let none = PieLayout.spans(&[0.0, 0.0]);
		assert!(none.iter().all(|s| s.sweep() == 0.0));
	}

	#[test]
	fn grow_from_zero_interpolates_both_edges() {
		let span = AngularSpan::new(1.0, 2.0);
		assert_eq!(span.grow_from_zero(0.0), AngularSpan::new(0.0, 0.0));
		assert_eq!(span.grow_from_zero(0.5), AngularSpan::new(0.5, 1.0));
		assert_eq!(span.grow_from_zero(1.0), span);
	}

	#[test]
	fn ring_radii_follow_chart_size() {
		let ring = RingGeometry::new(400.0, 250.0, 10.0);
		assert_eq!(ring.radius, 125.0);
		assert_eq!(ring.inner_radius, 62.5);
		assert_eq!(ring.outer_radius, 115.0);
		assert_eq!(ring.hover_outer_radius, 125.0);
		assert_eq!(ring.shaded_inner_radius(0.0), 62.5);
		assert_eq!(ring.shaded_inner_radius(100.0), 125.0);
	}

	#[test]
	fn quarter_segment_path_starts_at_top() {
		let d = ring_segment_path(AngularSpan::new(0.0, FRAC_PI_2), 50.0, 100.0);
		assert!(d.starts_with("M0.000,-100.000A100.000,100.000 0 0,1 100.000,"), "{d}");
		assert!(d.ends_with('Z'));
	}

	#[test]
	fn full_ring_uses_two_arcs() {
		let d = ring_segment_path(AngularSpan::new(0.0, TAU), 50.0, 100.0);
		assert_eq!(d.matches('A').count(), 4);
	}
}
