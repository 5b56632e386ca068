use leptos::ev::MouseEvent;
use leptos::prelude::*;
use log::debug;

use super::dataset::{DIAGRAM_HEIGHT, DIAGRAM_WIDTH, system_nodes};
use super::scene::{ConnectorShape, NodeKind, NodeShape, build_scene};
use super::types::Category;

const NODE_FILL: &str = "#1e293b";
const FABRIC_FILL: &str = "#1e1b4b";
const LABEL_FILL: &str = "#e2e8f0";
const ZONE_TEXT: &str = "#475569";

const LEGEND: [(Category, &str); 7] = [
	(Category::Cpu, "Xeon CPU Complex"),
	(Category::PcieSwitch, "PCIe Gen5 Switch"),
	(Category::ComputeNic, "Compute NIC (CX7)"),
	(Category::StorageNic, "Storage NIC (CX7)"),
	(Category::Nvme, "NVMe Storage"),
	(Category::Gpu, "H100 GPU"),
	(Category::NvSwitch, "NVSwitch Fabric"),
];

fn num(v: f64) -> String {
	v.to_string()
}

/// SVG topology map. Clicking a node reports its id through `on_select`.
#[component]
pub fn TopologyDiagram(
	#[prop(into)] selection: Signal<Option<String>>,
	#[prop(into)] on_select: Callback<String>,
) -> impl IntoView {
	let scene = Memo::new(move |_| build_scene(system_nodes(), selection.get().as_deref()));

	Effect::new(move |_| {
		scene.with(|s| {
			for dangling in &s.dangling {
				debug!("{dangling}");
			}
		})
	});

	view! {
		<div class="w-full h-full overflow-auto bg-slate-950 relative">
			<div
				class="absolute inset-0 pointer-events-none opacity-10"
				style="background-image: radial-gradient(#475569 1px, transparent 1px); background-size: 20px 20px;"
			></div>

			<svg
				viewBox=format!("0 0 {DIAGRAM_WIDTH} {DIAGRAM_HEIGHT}")
				class="w-full h-full min-w-[800px] min-h-[600px]"
				preserveAspectRatio="xMidYMid meet"
				data-dangling=move || scene.with(|s| s.dangling.len().to_string())
			>
				<BackgroundZones />
				<g>
					{move || scene.get().connectors.into_iter().map(connector_view).collect_view()}
				</g>
				<g>
					{move || {
						scene
							.get()
							.nodes
							.into_iter()
							.map(|node| node_view(node, on_select))
							.collect_view()
					}}
				</g>
				<Legend />
			</svg>
		</div>
	}
}

fn connector_view(connector: ConnectorShape) -> impl IntoView {
	let stroke = connector.emphasis.stroke();
	view! {
		<path
			data-source=connector.source
			data-target=connector.target
			d=connector.path
			stroke=stroke.color
			stroke-width=num(stroke.width)
			fill="none"
			opacity=num(stroke.opacity)
			class="transition-all duration-300"
		/>
	}
}

fn node_view(node: NodeShape, on_select: Callback<String>) -> AnyView {
	let NodeShape {
		id,
		label,
		rect,
		color,
		selected,
		kind,
	} = node;
	let (cx, cy) = rect.center();
	let on_click = move |_: MouseEvent| on_select.run(id.clone());

	match kind {
		NodeKind::Fabric { chips } => view! {
			<g class="cursor-pointer" on:click=on_click>
				<rect
					x=num(rect.x)
					y=num(rect.y)
					width=num(rect.width)
					height=num(rect.height)
					rx="8"
					fill=FABRIC_FILL
					stroke=color
					stroke-width={if selected { "2" } else { "1" }}
				/>
				{chips
					.into_iter()
					.map(|chip| {
						view! {
							<rect
								x=num(chip.x)
								y=num(chip.y)
								width=num(chip.width)
								height=num(chip.height)
								rx="4"
								fill=color
								fill-opacity="0.4"
								stroke=color
							/>
						}
					})
					.collect_view()}
				<text
					x=num(cx)
					y=num(cy)
					text-anchor="middle"
					fill=LABEL_FILL
					font-size="14"
					font-weight="bold"
				>
					{label}
				</text>
			</g>
		}
		.into_any(),
		NodeKind::Standard => {
			let glow = selected.then(|| format!("filter: drop-shadow(0 0 6px {color});"));
			let accent_y = num(rect.y + rect.height - 10.0);
			view! {
				<g
					class="cursor-pointer transition-transform duration-200 hover:scale-[1.02]"
					style=format!("transform-origin: {cx}px {cy}px;")
					on:click=on_click
				>
					<rect
						x=num(rect.x)
						y=num(rect.y)
						width=num(rect.width)
						height=num(rect.height)
						rx="6"
						fill=NODE_FILL
						stroke=color
						stroke-width={if selected { "3" } else { "1" }}
						fill-opacity="0.9"
						style=glow
						class="transition-all duration-300"
					/>
					<text
						x=num(cx)
						y=num(cy)
						text-anchor="middle"
						dominant-baseline="middle"
						fill=LABEL_FILL
						font-size="12"
						font-weight="600"
						class="pointer-events-none select-none"
					>
						{label}
					</text>
					<line
						x1=num(rect.x + 10.0)
						y1=accent_y.clone()
						x2=num(rect.x + 30.0)
						y2=accent_y
						stroke=color
						opacity="0.5"
					/>
				</g>
			}
			.into_any()
		}
	}
}

#[component]
fn BackgroundZones() -> impl IntoView {
	view! {
		<rect
			x="50"
			y="600"
			width="1300"
			height="380"
			rx="20"
			fill="#0f172a"
			stroke="#1e293b"
			stroke-width="2"
			stroke-dasharray="5,5"
			opacity="0.5"
		/>
		<text x="80" y="630" fill=ZONE_TEXT font-size="14" font-weight="bold">
			"GPU BASEBOARD & NVSWITCH"
		</text>
		<rect
			x="50"
			y="440"
			width="1300"
			height="150"
			rx="20"
			fill="#0f172a"
			stroke="#1e293b"
			stroke-width="2"
			stroke-dasharray="5,5"
			opacity="0.3"
		/>
		<text x="80" y="470" fill=ZONE_TEXT font-size="14" font-weight="bold">
			"COMPUTE FABRIC (PCIE ATTACHED)"
		</text>
	}
}

#[component]
fn Legend() -> impl IntoView {
	let height = 40.0 + 20.0 * LEGEND.len() as f64;
	view! {
		<g transform="translate(20, 20)">
			<rect
				width="200"
				height=num(height)
				rx="4"
				fill="#0f172a"
				stroke="#334155"
				fill-opacity="0.95"
			/>
			<text x="15" y="25" fill="#94a3b8" font-size="12" font-weight="bold">
				"SYSTEM ARCHITECTURE"
			</text>
			{LEGEND
				.iter()
				.enumerate()
				.map(|(i, (category, name))| {
					let y = 50.0 + 20.0 * i as f64;
					view! {
						<circle cx="25" cy=num(y) r="5" fill=category.color() />
						<text x="45" y=num(y + 4.0) fill="#cbd5e1" font-size="11">
							{*name}
						</text>
					}
				})
				.collect_view()}
		</g>
	}
}
