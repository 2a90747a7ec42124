use std::f64::consts::TAU;

use serde::Deserialize;

/// Transition timing curve. Accepts both the short names and the
/// `easeInOutQuart` style ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
	/// Constant speed.
	Linear,
	/// Slow at both ends.
	#[default]
	#[serde(alias = "easeInOutCubic")]
	CubicInOut,
	/// Fast start, slow finish.
	#[serde(alias = "easeOutCubic")]
	CubicOut,
	/// Sharper version of [`Easing::CubicInOut`].
	#[serde(alias = "easeInOutQuart")]
	QuartInOut,
	/// Elastic out, overshoots past 1 before settling.
	#[serde(alias = "easeOutElastic")]
	Elastic,
}

impl Easing {
	/// Maps linear progress `t` (clamped to `[0, 1]`) onto the curve.
	pub fn apply(self, t: f64) -> f64 {
		let t = t.clamp(0.0, 1.0);
		match self {
			Self::Linear => t,
			Self::CubicInOut => {
				if t < 0.5 {
					4.0 * t * t * t
				} else {
					1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
				}
			}
			Self::CubicOut => 1.0 - (1.0 - t).powi(3),
			Self::QuartInOut => {
				if t < 0.5 {
					8.0 * t.powi(4)
				} else {
					1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
				}
			}
			Self::Elastic => {
				if t == 0.0 || t == 1.0 {
					return t;
				}
				let period = 0.45;
				let shift = period / 4.0;
				1.0 + 2f64.powf(-10.0 * t) * ((t - shift) * TAU / period).sin()
			}
		}
	}
}

/// Easing and duration of one kind of transition.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
	/// Curve applied to the transition.
	#[serde(default)]
	pub easing: Easing,
	/// Length in milliseconds.
	#[serde(alias = "duration")]
	pub duration_ms: f64,
}

/// Linear progress toward a target in `[0, 1]`, eased on read.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tween {
	/// Current linear progress.
	pub t: f64,
	/// Value `t` is moving toward.
	pub target: f64,
}

impl Tween {
	/// A tween already resting at `target`.
	pub fn settled(target: f64) -> Self {
		Self { t: target, target }
	}

	/// Rewinds to 0 and heads for 1.
	pub fn restart(&mut self) {
		self.t = 0.0;
		self.target = 1.0;
	}

	/// Whether `t` has reached `target`.
	pub fn is_settled(&self) -> bool {
		self.t == self.target
	}

	/// Advances by `dt_ms` over a full-range `duration_ms`.
	pub fn tick(&mut self, dt_ms: f64, duration_ms: f64) {
		if self.is_settled() {
			return;
		}
		if duration_ms <= 0.0 {
			self.t = self.target;
			return;
		}
		let step = dt_ms / duration_ms;
		self.t = if self.t < self.target {
			(self.t + step).min(self.target)
		} else {
			(self.t - step).max(self.target)
		};
	}

	/// Current progress through `easing`.
	pub fn eased(&self, easing: Easing) -> f64 {
		easing.apply(self.t)
	}
}
