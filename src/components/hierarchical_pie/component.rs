use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

use super::controller::{ChartController, ChartEvent, PieRenderer, RenderFrame, Wedge};
use super::focus::FocusSurface;
use super::geometry::RingGeometry;
use super::legend::{Breadcrumb, LegendRow};
use super::render::{Motion, Timing, wedge_hatch, wedge_outline};
use super::types::{LegendKey, PieConfig, RowTemplate};

/// Longest step the animation loop takes, so a backgrounded tab does not
/// skip a whole transition on return.
const MAX_FRAME_MS: f64 = 100.0;

/// Steps `motion` forward by `dt_ms`. Returns `false` once the signal has
/// been disposed with its owner, which ends the animation loop.
fn advance(motion: RwSignal<Motion>, dt_ms: f64, timing: &Timing) -> bool {
	match motion.try_with_untracked(Motion::is_settled) {
		Some(true) => true,
		Some(false) => motion.try_update(|m| m.tick(dt_ms, timing)).is_some(),
		None => false,
	}
}

/// Publishes controller output into signals the view reads.
#[derive(Clone, Copy)]
struct SignalRenderer {
	frame: RwSignal<Option<RenderFrame>>,
	focus: RwSignal<FocusSurface>,
	highlighted: RwSignal<Option<LegendKey>>,
	motion: RwSignal<Motion>,
}

impl PieRenderer for SignalRenderer {
	fn render(&mut self, frame: &RenderFrame) {
		self.motion.update(Motion::restart_sweep);
		self.frame.set(Some(frame.clone()));
	}

	fn focus(&mut self, surface: &FocusSurface, highlighted: Option<&LegendKey>) {
		self.focus.set(surface.clone());
		self.highlighted.set(highlighted.cloned());
		self.motion.update(|m| {
			m.show_focus(surface.visible);
			m.hover(highlighted);
		});
	}
}

/// Drillable donut chart with a synchronized legend and breadcrumb trail.
///
/// `config` is validated once; an invalid configuration or dataset renders
/// an error notice instead of the chart.
#[component]
pub fn HierarchicalPie(config: PieConfig, data: Value) -> impl IntoView {
	let renderer = SignalRenderer {
		frame: RwSignal::new(None),
		focus: RwSignal::new(FocusSurface::default()),
		highlighted: RwSignal::new(None),
		motion: RwSignal::new(Motion::default()),
	};
	let timing = Timing {
		sweep: config.hover_pie_animation,
		grow: config.focus_animation,
		grow_enabled: !config.shaded_overlay(),
	};
	let (width, height) = (config.width, config.height);
	let chart_id = config.chart_id.clone().unwrap_or_default();
	let legend_id = config.legend_container.clone().unwrap_or_default();
	let nav_id = config.navigation.clone().unwrap_or_default();
	let row_template = config.templates.row.clone();

	let controller = match ChartController::new(config, &data, renderer) {
		Ok(controller) => StoredValue::new(controller),
		Err(err) => {
			error!("pie chart not rendered: {err}");
			return view! { <p class="pie-error">{err.to_string()}</p> }.into_any();
		}
	};
	let dispatch = move |event: ChartEvent| {
		controller.update_value(|c| {
			c.dispatch(event);
		});
	};

	Effect::new(move |_| {
		let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
		let animate_inner = animate.clone();
		let last_tick = Cell::new(js_sys::Date::now());
		*animate.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = (now - last_tick.replace(now)).min(MAX_FRAME_MS);
			if !advance(renderer.motion, dt, &timing) {
				debug!("pie chart disposed, stopping animation loop");
				return;
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), &*animate_inner.borrow()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(window), Some(cb)) = (web_sys::window(), &*animate.borrow()) {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let radius = width.min(height) / 2.0;
	let shaded = !timing.grow_enabled;
	let hatch_display = if shaded { "inline" } else { "none" };
	let frame = renderer.frame;

	view! {
		<div class="hierarchical-pie">
			<div id=chart_id class="pie-chart">
				<svg width=width.to_string() height=height.to_string()>
					<defs>
						<pattern
							id="diagonalHatch"
							patternUnits="userSpaceOnUse"
							width="4"
							height="4"
						>
							<path
								d="M-1,1 l2,-2 M0,4 l4,-4 M3,5 l2,-2"
								stroke="#000000"
								stroke-width="1"
							/>
						</pattern>
					</defs>
					<g transform=format!("translate({radius},{})", height / 2.0)>
						<g class="cake">
							{move || {
								frame
									.get()
									.map(|f| {
										let ring = f.ring;
										f.wedges
											.into_iter()
											.map(|w| wedge_view(w, ring, renderer.motion, timing, dispatch))
											.collect_view()
									})
							}}
						</g>
						<g class="cake shaded" style:display=hatch_display>
							{move || {
								frame
									.get()
									.filter(|_| shaded)
									.map(|f| {
										let ring = f.ring;
										f.wedges
											.into_iter()
											.map(|w| hatch_view(w, ring, renderer.motion, timing, dispatch))
											.collect_view()
									})
							}}
						</g>
						<g
							class="focus-group"
							opacity=move || renderer.motion.with(|m| m.focus_opacity().to_string())
						>
							<g class="arc-percent">
								<text text-anchor="middle">
									{move || renderer.focus.with(|f| f.label.clone())}
								</text>
							</g>
							<g class="arc-cost">
								<text text-anchor="middle" dy="1.2em">
									{move || renderer.focus.with(|f| f.sub_label.clone())}
								</text>
							</g>
						</g>
					</g>
				</svg>
			</div>
			<div id=legend_id class="pie-legend">
				<table>
					<tbody>
						{move || {
							frame
								.get()
								.map(|f| {
									f.legend
										.into_iter()
										.map(|row| {
											legend_row_view(row, row_template.clone(), renderer.highlighted, dispatch)
										})
										.collect_view()
								})
						}}
					</tbody>
				</table>
			</div>
			<div
				id=nav_id
				class="pie-navigation"
				style:display=move || {
					let shown = frame.with(|f| f.as_ref().is_some_and(|f| f.show_navigation));
					if shown { "block" } else { "none" }
				}
			>
				<ul class="breadcrumb">
					{move || {
						frame
							.get()
							.map(|f| {
								f.breadcrumbs
									.into_iter()
									.map(|crumb| breadcrumb_view(crumb, dispatch))
									.collect_view()
							})
					}}
				</ul>
				<button id="btnRoot" on:click=move |_: MouseEvent| dispatch(ChartEvent::Root)>
					"Root"
				</button>
				<button id="btnLevelUp" on:click=move |_: MouseEvent| dispatch(ChartEvent::Up)>
					"Up"
				</button>
			</div>
		</div>
	}
	.into_any()
}

fn wedge_view(
	wedge: Wedge,
	ring: RingGeometry,
	motion: RwSignal<Motion>,
	timing: Timing,
	dispatch: impl Fn(ChartEvent) + Copy + Send + Sync + 'static,
) -> impl IntoView {
	let (fill, stroke, class) = (wedge.fill.to_string(), wedge.stroke.to_string(), wedge.class_name());
	let (over_key, out_key, click_key) = (wedge.key.clone(), wedge.key.clone(), wedge.key.clone());
	view! {
		<g class="arc">
			<path
				d=move || motion.with(|m| wedge_outline(&wedge, ring, m, &timing))
				fill=fill
				stroke=stroke
				class=class
				on:mouseover=move |_: MouseEvent| dispatch(ChartEvent::WedgeHovered(over_key.clone()))
				on:mouseout=move |_: MouseEvent| dispatch(ChartEvent::WedgeHoverEnded(out_key.clone()))
				on:click=move |_: MouseEvent| dispatch(ChartEvent::WedgeClicked(click_key.clone()))
			/>
		</g>
	}
}

fn hatch_view(
	wedge: Wedge,
	ring: RingGeometry,
	motion: RwSignal<Motion>,
	timing: Timing,
	dispatch: impl Fn(ChartEvent) + Copy + Send + Sync + 'static,
) -> impl IntoView {
	let class = wedge.class_name();
	let (over_key, out_key, click_key) = (wedge.key.clone(), wedge.key.clone(), wedge.key.clone());
	view! {
		<g class="arc">
			<path
				d=move || motion.with(|m| wedge_hatch(&wedge, ring, m, &timing).unwrap_or_default())
				fill="url(#diagonalHatch)"
				class=class
				on:mouseover=move |_: MouseEvent| dispatch(ChartEvent::WedgeHovered(over_key.clone()))
				on:mouseout=move |_: MouseEvent| dispatch(ChartEvent::WedgeHoverEnded(out_key.clone()))
				on:click=move |_: MouseEvent| dispatch(ChartEvent::WedgeClicked(click_key.clone()))
			/>
		</g>
	}
}

fn legend_row_view(
	row: LegendRow,
	template: RowTemplate,
	highlighted: RwSignal<Option<LegendKey>>,
	dispatch: impl Fn(ChartEvent) + Copy + Send + Sync + 'static,
) -> impl IntoView {
	let markup = template(&row);
	let (hover_key, click_key) = (row.key.clone(), row.key.clone());
	view! {
		<tr
			class=row.class_name()
			data-id=row.key.to_string()
			class:hovered=move || highlighted.with(|h| h.as_ref() == Some(&hover_key))
			inner_html=markup
			on:click=move |_: MouseEvent| dispatch(ChartEvent::LegendRowClicked(click_key.clone()))
		></tr>
	}
}

fn breadcrumb_view(
	crumb: Breadcrumb,
	dispatch: impl Fn(ChartEvent) + Copy + Send + Sync + 'static,
) -> impl IntoView {
	let level = crumb.level;
	view! {
		<li on:click=move |_: MouseEvent| dispatch(ChartEvent::BreadcrumbClicked(level))>
			{crumb.title}
			<span class="divider">"/"</span>
		</li>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::hierarchical_pie::{AnimationConfig, Easing};

	fn timing() -> Timing {
		let linear = AnimationConfig {
			easing: Easing::Linear,
			duration_ms: 100.0,
		};
		Timing {
			sweep: linear,
			grow: linear,
			grow_enabled: true,
		}
	}

	#[test]
	fn animation_steps_until_the_chart_is_disposed() {
		let motion = RwSignal::new(Motion::default());
		motion.update(Motion::restart_sweep);
		assert!(advance(motion, 50.0, &timing()));
		assert_eq!(motion.with_untracked(|m| m.sweep.t), 0.5);
		assert!(advance(motion, 50.0, &timing()));
		assert!(motion.with_untracked(Motion::is_settled));
		assert!(advance(motion, 50.0, &timing()));

		motion.dispose();
		assert!(!advance(motion, 50.0, &timing()));
	}
}
