//! Recursively drillable donut chart: pure navigation, color, legend and
//! focus state behind a [`ChartController`], drawn by the Leptos
//! [`HierarchicalPie`] component.

mod animation;
mod color;
mod component;
mod controller;
mod error;
mod focus;
mod geometry;
mod legend;
mod navigation;
mod render;
mod schema;
mod types;

pub use animation::{AnimationConfig, Easing};
pub use color::{Color, ColorAssigner, NEUTRAL, PALETTE};
pub use component::HierarchicalPie;
pub use controller::{ChartController, ChartEvent, Dispatch, PieRenderer, RenderFrame, Wedge};
pub use error::{ConfigError, PieError};
pub use focus::{FocusSurface, HoverFocusComputer, HoverTarget, percentage_label};
pub use geometry::{AngularSpan, ArcLayout, PieLayout, RingGeometry};
pub use legend::{Breadcrumb, LegendRow, LegendSynchronizer, default_row_template};
pub use navigation::{NavEvent, NavigationState};
pub use types::{CategoryId, CategoryNode, DataSchema, LegendKey, PieConfig, Templates};
