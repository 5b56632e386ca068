use leptos::prelude::*;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="h-screen flex flex-col items-center justify-center bg-slate-950 text-slate-300">
			<h1 class="text-2xl font-bold">"Uh oh!" <br /> "We couldn't find that page!"</h1>
			<a href="/" class="mt-4 text-emerald-400 hover:underline">"Back to the topology map"</a>
		</div>
	}
}
