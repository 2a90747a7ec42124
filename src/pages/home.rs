use leptos::prelude::*;
use serde_json::{Value, json};

use crate::components::hierarchical_pie::{HierarchicalPie, PieConfig};

/// Sample monthly budget, two levels deep in places, with a "direct" bucket
/// and one cost supplied as text.
fn sample_budget() -> Value {
	json!([
		{
			"id_category": 1,
			"category": "Food",
			"cost": 100,
			"categories": [
				{ "id_category": 11, "category": "Groceries", "cost": 60 },
				{
					"id_category": 12,
					"category": "Dining",
					"cost": "40",
					"categories": [
						{ "id_category": 121, "category": "Restaurants", "cost": 25 },
						{ "id_category": 122, "category": "Coffee", "cost": 10 },
						{ "id_category": null, "category": "Dining", "cost": 5 }
					]
				}
			]
		},
		{ "id_category": 2, "category": "Rent", "cost": 200 },
		{
			"id_category": 3,
			"category": "Transport",
			"cost": 45.5,
			"categories": [
				{ "id_category": 31, "category": "Fuel", "cost": 30 },
				{ "id_category": 32, "category": "Parking", "cost": 15.5 }
			]
		}
	])
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = PieConfig {
		chart_id: Some("chart".into()),
		legend_container: Some("legend".into()),
		navigation: Some("navigation".into()),
		..PieConfig::default()
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="budget-page">
				<h1>"Where the money goes"</h1>
				<p class="subtitle">"Click a slice or a legend row to drill in. Hover for its share."</p>
				<HierarchicalPie config=config data=sample_budget() />
			</div>
		</ErrorBoundary>
	}
}
