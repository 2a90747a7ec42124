use std::collections::HashMap;
use std::fmt;

use log::debug;

use super::types::CategoryId;

/// An sRGB color, printed as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
}

impl Color {
	/// Color from its channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Same as d3's `rgb.darker()` with the default factor.
	pub fn darker(self) -> Self {
		let k = 0.7;
		let scale = |c: u8| (c as f64 * k).round() as u8;
		Self::rgb(scale(self.r), scale(self.g), scale(self.b))
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// Categorical colors handed out in first-seen order.
pub const PALETTE: [Color; 16] = [
	Color::rgb(0x1f, 0x77, 0xb4),
	Color::rgb(0xff, 0x7f, 0x0e),
	Color::rgb(0x2c, 0xa0, 0x2c),
	Color::rgb(0xd6, 0x27, 0x28),
	Color::rgb(0x94, 0x67, 0xbd),
	Color::rgb(0x8c, 0x56, 0x4b),
	Color::rgb(0xe3, 0x77, 0xc2),
	Color::rgb(0x7f, 0x7f, 0x7f),
	Color::rgb(0x8f, 0x75, 0x40),
	Color::rgb(0xbc, 0xbd, 0x22),
	Color::rgb(0x17, 0xbe, 0xcf),
	Color::rgb(0xd7, 0xde, 0x85),
	Color::rgb(0x75, 0x4a, 0x5f),
	Color::rgb(0x85, 0x7c, 0x57),
	Color::rgb(0x46, 0xa2, 0xb0),
	Color::rgb(0xff, 0x98, 0x96),
];

/// Color of the uncategorized ("direct") bucket; not part of the palette.
pub const NEUTRAL: Color = Color::rgb(0xdd, 0xdd, 0xdd);

/// Ordinal id → color table. Assignments are never removed, so a category
/// keeps its color across drill operations for the life of the chart.
#[derive(Clone, Debug, Default)]
pub struct ColorAssigner {
	assigned: HashMap<CategoryId, Color>,
	next_slot: usize,
}

impl ColorAssigner {
	/// Stable color for `id`; `None` (the direct bucket) is always [`NEUTRAL`].
	pub fn color_for(&mut self, id: Option<&CategoryId>) -> Color {
		let Some(id) = id else {
			return NEUTRAL;
		};
		if let Some(&color) = self.assigned.get(id) {
			return color;
		}
		let color = PALETTE[self.next_slot % PALETTE.len()];
		debug!("assigned palette slot {} to category {id}", self.next_slot);
		self.next_slot += 1;
		self.assigned.insert(id.clone(), color);
		color
	}

	/// Number of palette slots handed out so far.
	pub fn slots_used(&self) -> usize {
		self.next_slot
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_seen_ids_take_palette_in_order() {
		let mut colors = ColorAssigner::default();
		assert_eq!(colors.color_for(Some(&"b".into())), PALETTE[0]);
		assert_eq!(colors.color_for(Some(&"a".into())), PALETTE[1]);
		assert_eq!(colors.color_for(Some(&"b".into())), PALETTE[0]);
	}

	#[test]
	fn null_id_is_neutral_and_free() {
		let mut colors = ColorAssigner::default();
		assert_eq!(colors.color_for(None), NEUTRAL);
		assert_eq!(colors.slots_used(), 0);
		assert_eq!(colors.color_for(Some(&CategoryId::from(1))), PALETTE[0]);
		assert_eq!(colors.color_for(None), NEUTRAL);
		assert_eq!(colors.slots_used(), 1);
	}

	#[test]
	fn assignments_survive_palette_wrap() {
		let mut colors = ColorAssigner::default();
		let first = colors.color_for(Some(&CategoryId::from(0)));
		for i in 1..40_i64 {
			colors.color_for(Some(&CategoryId::from(i)));
		}
		assert_eq!(colors.color_for(Some(&CategoryId::from(16))), PALETTE[0]);
		assert_eq!(colors.color_for(Some(&CategoryId::from(0))), first);
		assert_eq!(colors.slots_used(), 40);
	}

	#[test]
	fn darker_matches_hex_rounding() {
		assert_eq!(Color::rgb(100, 200, 10).darker(), Color::rgb(70, 140, 7));
		assert_eq!(PALETTE[0].to_string(), "#1f77b4");
	}
}
