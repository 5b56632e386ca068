use leptos::prelude::*;

use crate::components::chat::ChatWidget;
use crate::components::detail_panel::DetailPanel;
use crate::components::topology::TopologyDiagram;

/// Topology map, detail panel and chat widget. Owns the selection.
#[component]
pub fn Home() -> impl IntoView {
	let selection = RwSignal::new(Option::<String>::None);
	let on_select = Callback::new(move |id: String| {
		log::debug!("selected {id}");
		selection.set(Some(id));
	});

	view! {
		<div class="flex flex-col h-screen overflow-hidden bg-slate-950 text-slate-200">
			<Header />

			<main class="flex-1 flex overflow-hidden">
				<div class="flex-1 relative">
					<div class="absolute top-4 left-4 z-10 bg-slate-900/80 backdrop-blur p-2 rounded border border-slate-700 text-xs text-slate-300">
						<p>"Interactive Topology Map"</p>
						<p class="text-slate-500">"Scroll to explore • Click a component for details"</p>
					</div>
					<TopologyDiagram selection=selection on_select=on_select />
				</div>

				<div class="w-96 flex-shrink-0 z-20 shadow-xl">
					<DetailPanel selection=selection />
				</div>
			</main>

			<ChatWidget />
		</div>
	}
}

#[component]
fn Header() -> impl IntoView {
	view! {
		<header class="h-16 bg-slate-900 border-b border-slate-800 flex items-center px-6 justify-between flex-shrink-0 z-10">
			<div class="flex items-center gap-3">
				<div class="bg-emerald-600 w-8 h-8 rounded flex items-center justify-center font-bold text-white">
					"N"
				</div>
				<h1 class="text-lg font-bold tracking-wide">
					"NVIDIA DGX H100 "
					<span class="font-normal text-slate-400">"| System Architecture"</span>
				</h1>
			</div>
			<div class="flex gap-4 text-sm text-slate-400">
				<div class="flex items-center gap-2">
					<span class="w-2 h-2 rounded-full bg-emerald-500 animate-pulse"></span>
					"System Online"
				</div>
				<div>{concat!("v", env!("CARGO_PKG_VERSION"))}</div>
			</div>
		</header>
	}
}
