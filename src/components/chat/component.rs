use chrono::Utc;
use leptos::ev::KeyboardEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use super::transcript::{ChatTurn, Transcript};
use crate::services::gemini::deadline;
use crate::services::{Assistant, ChatConfig, Role};

/// Floating assistant window with its toggle button.
#[component]
pub fn ChatWidget() -> impl IntoView {
	let assistant = StoredValue::new(Assistant::from_config(&ChatConfig::from_build_env()));
	let transcript = RwSignal::new(Transcript::new(Utc::now()));
	let input = RwSignal::new(String::new());
	let open = RwSignal::new(false);
	let end_ref = NodeRef::<leptos::html::Div>::new();
	let sending = move || transcript.with(Transcript::is_sending);
	let configured = assistant.with_value(|a| a.is_configured());

	Effect::new(move |_| {
		transcript.track();
		if !open.get() {
			return;
		}
		if let Some(end) = end_ref.get() {
			let options = ScrollIntoViewOptions::new();
			options.set_behavior(ScrollBehavior::Smooth);
			options.set_block(ScrollLogicalPosition::End);
			end.scroll_into_view_with_scroll_into_view_options(&options);
		}
	});

	let send = move || {
		let text = input.get_untracked();
		let Some(pending) = transcript
			.try_update(|t| t.begin_send(&text, Utc::now()))
			.flatten()
		else {
			return;
		};
		input.set(String::new());
		let assistant = assistant.get_value();
		spawn_local(async move {
			let limit = deadline(assistant.timeout());
			let outcome = assistant.reply(&pending.history, &pending.message, limit).await;
			transcript.update(|t| t.complete(outcome, Utc::now()));
		});
	};

	view! {
		<div class="fixed bottom-6 right-6 z-50 flex flex-col items-end">
			<Show when=move || open.get()>
				<div class="w-80 md:w-96 h-[500px] bg-slate-900 border border-slate-700 rounded-lg shadow-2xl flex flex-col mb-4 overflow-hidden">
					<div class="bg-slate-800 p-4 border-b border-slate-700 flex justify-between items-center">
						<h3 class="text-white font-semibold flex items-center gap-2">
							<span class="text-emerald-400">"⚡"</span>
							" AI Architect"
							{(!configured).then(|| view! {
								<span class="text-xs font-normal text-amber-400">"(offline)"</span>
							})}
						</h3>
						<button
							class="text-slate-400 hover:text-white"
							on:click=move |_| open.set(false)
						>
							"✕"
						</button>
					</div>

					<div class="flex-1 overflow-y-auto p-4 space-y-4 bg-slate-900/90">
						{move || {
							transcript
								.with(|t| t.turns().to_vec())
								.into_iter()
								.map(turn_view)
								.collect_view()
						}}
						<Show when=sending>
							<div class="flex justify-start">
								<div class="bg-slate-800 text-slate-400 p-3 rounded-lg text-xs italic">
									"Thinking..."
								</div>
							</div>
						</Show>
						<div node_ref=end_ref></div>
					</div>

					<div class="p-3 bg-slate-800 border-t border-slate-700">
						<div class="flex gap-2">
							<input
								type="text"
								placeholder="Ask about the architecture..."
								class="flex-1 bg-slate-900 border border-slate-600 rounded px-3 py-2 text-sm text-white focus:outline-none focus:border-emerald-500"
								prop:value=move || input.get()
								on:input=move |ev| input.set(event_target_value(&ev))
								on:keydown=move |ev: KeyboardEvent| {
									if ev.key() == "Enter" {
										send();
									}
								}
							/>
							<button
								class="bg-emerald-600 hover:bg-emerald-500 text-white px-3 py-2 rounded transition-colors disabled:opacity-50"
								disabled=sending
								on:click=move |_| send()
							>
								"➤"
							</button>
						</div>
					</div>
				</div>
			</Show>

			<button
				class="bg-emerald-600 hover:bg-emerald-500 text-white rounded-full p-4 shadow-lg transition-all hover:scale-105 flex items-center justify-center w-14 h-14"
				on:click=move |_| open.update(|o| *o = !*o)
			>
				{move || if open.get() { "✕" } else { "💬" }}
			</button>
		</div>
	}
}

fn turn_view(turn: ChatTurn) -> impl IntoView {
	let (row, bubble) = match turn.role {
		Role::User => ("flex justify-end", "bg-emerald-600 text-white"),
		Role::Assistant => (
			"flex justify-start",
			"bg-slate-800 text-slate-200 border border-slate-700",
		),
	};
	view! {
		<div class=row>
			<div
				class=format!("max-w-[85%] rounded-lg p-3 text-sm {bubble}")
				title=turn.timestamp.format("%H:%M:%S").to_string()
			>
				{turn.text}
			</div>
		</div>
	}
}
