//! Reusable chart components.

pub mod hierarchical_pie;
