use leptos::prelude::*;

use super::model::{ComponentDetail, DetailView, Metrics, Topology};
use crate::components::topology::dataset::system_nodes;

const SECTION_TITLE: &str = "text-xs font-bold text-slate-500 uppercase tracking-widest mb-2";

/// Right-hand panel describing the selected component.
#[component]
pub fn DetailPanel(#[prop(into)] selection: Signal<Option<String>>) -> impl IntoView {
	let detail = Memo::new(move |_| DetailView::project(selection.get().as_deref(), system_nodes()));

	move || match detail.get() {
		DetailView::Empty => view! { <EmptyState /> }.into_any(),
		DetailView::Component(d) => component_view(d).into_any(),
	}
}

#[component]
fn EmptyState() -> impl IntoView {
	view! {
		<div class="h-full flex flex-col items-center justify-center text-slate-500 p-6 text-center border-l border-slate-800 bg-slate-900/50">
			<svg
				class="h-16 w-16 mb-4 opacity-50"
				fill="none"
				viewBox="0 0 24 24"
				stroke="currentColor"
			>
				<path
					stroke-linecap="round"
					stroke-linejoin="round"
					stroke-width="1"
					d="M9 3v2m6-2v2M9 19v2m6-2v2M5 9H3m2 6H3m18-6h-2m2 6h-2M7 19h10a2 2 0 002-2V7a2 2 0 00-2-2H7a2 2 0 00-2 2v10a2 2 0 002 2zM9 9h6v6H9V9z"
				/>
			</svg>
			<p class="text-lg font-medium">"System Explorer"</p>
			<p class="text-sm mt-2 text-slate-400">
				"Select a component to view architectural details, connectivity, and specifications."
			</p>
		</div>
	}
}

fn component_view(d: ComponentDetail) -> impl IntoView {
	let ComponentDetail {
		label,
		icon,
		color,
		category,
		description,
		specs,
		topology,
		metrics,
	} = d;

	view! {
		<div class="h-full flex flex-col p-6 border-l border-slate-800 bg-slate-900 overflow-y-auto">
			<div class="flex items-center gap-3 mb-6">
				<div
					class="w-12 h-12 rounded-lg flex items-center justify-center text-2xl shadow-lg border border-slate-700"
					style=format!("background-color: {color}22; color: {color};")
				>
					{icon}
				</div>
				<div>
					<h2 class="text-xl font-bold text-white tracking-tight">{label}</h2>
					<span class="text-xs font-mono uppercase text-slate-400 border border-slate-700 px-2 py-0.5 rounded bg-slate-800">
						{category}
					</span>
				</div>
			</div>

			<div class="space-y-6">
				<div>
					<h3 class=SECTION_TITLE>"Description"</h3>
					<p class="text-slate-300 leading-relaxed text-sm">{description}</p>
				</div>

				<div>
					<h3 class=SECTION_TITLE>"Technical Specs"</h3>
					<ul class="grid grid-cols-1 gap-2">
						{specs
							.into_iter()
							.map(|spec| {
								view! {
									<li class="flex items-center gap-2 text-xs text-slate-300 bg-slate-800/40 p-2 rounded border border-slate-700/30">
										<div
											class="w-1.5 h-1.5 rounded-full"
											style=format!("background-color: {color}; box-shadow: 0 0 5px {color};")
										></div>
										{spec}
									</li>
								}
							})
							.collect_view()}
					</ul>
				</div>

				<div>
					<h3 class=SECTION_TITLE>"Topology"</h3>
					<div class="flex flex-wrap gap-2">{topology_view(topology)}</div>
				</div>

				{metrics.map(metrics_view)}
			</div>
		</div>
	}
}

fn topology_view(topology: Topology) -> AnyView {
	match topology {
		Topology::Leaf => view! {
			<span class="text-xs text-slate-500 italic">"Endpoint / Leaf Node"</span>
		}
		.into_any(),
		Topology::Badges(badges) => badges
			.into_iter()
			.map(|badge| {
				view! {
					<span class="text-xs font-mono bg-slate-800 text-slate-400 px-2 py-1 rounded border border-slate-700 hover:text-white hover:border-slate-600 transition-colors cursor-default">
						{format!("↔ {badge}")}
					</span>
				}
			})
			.collect_view()
			.into_any(),
	}
}

fn metrics_view(metrics: Metrics) -> impl IntoView {
	let body = match metrics {
		Metrics::Telemetry(gauges) => gauges
			.iter()
			.map(|g| {
				view! {
					<div>
						<div class="flex justify-between text-xs mb-1 text-slate-400">
							<span>{g.label}</span>
							<span>{g.value}</span>
						</div>
						<div class="w-full bg-slate-800 rounded-full h-1">
							<div
								class=format!("h-1 rounded-full {}", g.bar_class)
								style=format!("width: {}%", g.percent)
							></div>
						</div>
					</div>
				}
			})
			.collect_view()
			.into_any(),
		Metrics::NetworkStatus(rows) => rows
			.iter()
			.map(|row| {
				view! {
					<div class="flex items-center justify-between bg-slate-800/50 p-2 rounded">
						<span class="text-xs text-slate-400">{row.label}</span>
						<span class=format!("text-xs font-mono {}", row.value_class)>{row.value}</span>
					</div>
				}
			})
			.collect_view()
			.into_any(),
	};

	view! {
		<div class="mt-4 pt-4 border-t border-slate-800">
			<h3 class="text-xs font-bold text-slate-500 uppercase tracking-widest mb-3">
				{metrics.title()}
			</h3>
			<div class="space-y-3">{body}</div>
		</div>
	}
}
