use crate::components::topology::dataset;
use crate::components::topology::{Category, Component};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gauge {
	pub label: &'static str,
	pub value: &'static str,
	pub percent: u8,
	pub bar_class: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusRow {
	pub label: &'static str,
	pub value: &'static str,
	pub value_class: &'static str,
}

/// Illustrative, fixed values. Nothing here is read from hardware.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metrics {
	Telemetry(&'static [Gauge]),
	NetworkStatus(&'static [StatusRow]),
}

impl Metrics {
	pub fn title(&self) -> &'static str {
		match self {
			Metrics::Telemetry(_) => "Live Telemetry (Sim)",
			Metrics::NetworkStatus(_) => "Network Status",
		}
	}
}

const GPU_TELEMETRY: &[Gauge] = &[
	Gauge {
		label: "HBM3 Usage",
		value: "64GB / 80GB",
		percent: 80,
		bar_class: "bg-emerald-500 shadow-[0_0_8px_rgba(16,185,129,0.5)]",
	},
	Gauge {
		label: "Power Draw",
		value: "612W",
		percent: 87,
		bar_class: "bg-orange-500 shadow-[0_0_8px_rgba(249,115,22,0.5)]",
	},
];

const NIC_STATUS: &[StatusRow] = &[
	StatusRow {
		label: "Link Status",
		value: "UP (400Gb/s)",
		value_class: "text-emerald-400",
	},
	StatusRow {
		label: "RDMA Activity",
		value: "HIGH",
		value_class: "text-blue-400",
	},
];

pub fn metrics(category: Category) -> Option<Metrics> {
	match category {
		Category::Gpu => Some(Metrics::Telemetry(GPU_TELEMETRY)),
		Category::ComputeNic => Some(Metrics::NetworkStatus(NIC_STATUS)),
		Category::Cpu
		| Category::NvSwitch
		| Category::StorageNic
		| Category::PcieSwitch
		| Category::Nvme => None,
	}
}

pub fn icon(category: Category) -> &'static str {
	match category {
		Category::Gpu => "⚡",
		Category::Cpu => "🧠",
		Category::NvSwitch => "🔀",
		Category::ComputeNic => "🚀",
		Category::StorageNic => "💾",
		Category::PcieSwitch => "⑂",
		Category::Nvme => "📦",
	}
}

/// `COMPUTE_NIC` -> `COMPUTE NIC`. Only the first separator is replaced.
pub fn category_label(category: Category) -> String {
	category.code().replacen('_', " ", 1)
}

/// `pcie-sw-0` -> `PCIE SW-0`. Only the first separator is replaced.
pub fn connection_badge(id: &str) -> String {
	id.replacen('-', " ", 1).to_uppercase()
}

#[derive(Clone, Debug, PartialEq)]
pub enum Topology {
	/// No outgoing links.
	Leaf,
	Badges(Vec<String>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComponentDetail {
	pub label: String,
	pub icon: &'static str,
	pub color: &'static str,
	pub category: String,
	pub description: String,
	pub specs: Vec<String>,
	pub topology: Topology,
	pub metrics: Option<Metrics>,
}

impl From<&Component> for ComponentDetail {
	fn from(component: &Component) -> Self {
		let topology = if component.connected_to.is_empty() {
			Topology::Leaf
		} else {
			Topology::Badges(
				component
					.connected_to
					.iter()
					.map(|id| connection_badge(id))
					.collect(),
			)
		};
		Self {
			label: component.label.clone(),
			icon: icon(component.category),
			color: component.color,
			category: category_label(component.category),
			description: component.description.clone(),
			specs: component.specs.clone(),
			topology,
			metrics: metrics(component.category),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum DetailView {
	Empty,
	Component(ComponentDetail),
}

impl DetailView {
	pub fn project(selection: Option<&str>, nodes: &[Component]) -> Self {
		selection
			.and_then(|id| dataset::find(nodes, id))
			.map(|c| DetailView::Component(c.into()))
			.unwrap_or(DetailView::Empty)
	}
}
