use std::collections::HashMap;
use std::fmt;

use super::dataset::{LINE_ACTIVE, LINE_DATA_PATH, LINE_DEFAULT};
use super::types::{Category, Component, Rect};

const CHIP_COUNT: usize = 4;
const CHIP_WIDTH: f64 = 160.0;
const CHIP_HEIGHT: f64 = 50.0;
const CHIP_MARGIN_X: f64 = 100.0;
const CHIP_INSET_Y: f64 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
	/// One endpoint is the selected node.
	Active,
	/// PCIe switch to GPU or compute NIC, not selected.
	DataPath,
	Idle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
	pub color: &'static str,
	pub width: f64,
	pub opacity: f64,
}

impl Emphasis {
	pub fn stroke(self) -> Stroke {
		match self {
			Emphasis::Active => Stroke {
				color: LINE_ACTIVE,
				width: 3.0,
				opacity: 1.0,
			},
			Emphasis::DataPath => Stroke {
				color: LINE_DATA_PATH,
				width: 1.0,
				opacity: 0.5,
			},
			Emphasis::Idle => Stroke {
				color: LINE_DEFAULT,
				width: 1.0,
				opacity: 0.3,
			},
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorShape {
	pub source: String,
	pub target: String,
	/// SVG path data.
	pub path: String,
	pub emphasis: Emphasis,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
	Standard,
	/// Single logical node drawn as a bar of physical chips.
	Fabric { chips: [Rect; CHIP_COUNT] },
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeShape {
	pub id: String,
	pub label: String,
	pub rect: Rect,
	pub color: &'static str,
	pub selected: bool,
	pub kind: NodeKind,
}

/// A `connected_to` entry that names no known component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DanglingRef {
	pub source: String,
	pub target: String,
}

impl fmt::Display for DanglingRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "no component {} for connector from {}", self.target, self.source)
	}
}

/// Everything the diagram draws for one `(nodes, selection)` pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub connectors: Vec<ConnectorShape>,
	pub nodes: Vec<NodeShape>,
	pub dangling: Vec<DanglingRef>,
}

pub fn build_scene(nodes: &[Component], selection: Option<&str>) -> Scene {
	let by_id: HashMap<&str, &Component> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
	let mut scene = Scene::default();

	for node in nodes {
		for target_id in &node.connected_to {
			let Some(target) = by_id.get(target_id.as_str()) else {
				scene.dangling.push(DanglingRef {
					source: node.id.clone(),
					target: target_id.clone(),
				});
				continue;
			};
			scene.connectors.push(ConnectorShape {
				source: node.id.clone(),
				target: target.id.clone(),
				path: connector_path(&node.rect, &target.rect),
				emphasis: emphasis(node, target, selection),
			});
		}
	}

	scene.nodes = nodes
		.iter()
		.map(|node| NodeShape {
			id: node.id.clone(),
			label: node.label.clone(),
			rect: node.rect,
			color: node.color,
			selected: selection == Some(node.id.as_str()),
			kind: match node.category {
				Category::NvSwitch => NodeKind::Fabric {
					chips: fabric_chips(&node.rect),
				},
				Category::Cpu
				| Category::Gpu
				| Category::ComputeNic
				| Category::StorageNic
				| Category::PcieSwitch
				| Category::Nvme => NodeKind::Standard,
			},
		})
		.collect();

	scene
}

fn emphasis(source: &Component, target: &Component, selection: Option<&str>) -> Emphasis {
	if selection.is_some_and(|s| s == source.id || s == target.id) {
		return Emphasis::Active;
	}
	let data_path = source.category == Category::PcieSwitch
		&& matches!(target.category, Category::ComputeNic | Category::Gpu);
	if data_path {
		Emphasis::DataPath
	} else {
		Emphasis::Idle
	}
}

/// Vertical S-curve between two rectangle centers.
pub fn connector_path(from: &Rect, to: &Rect) -> String {
	let ((x0, y0), (x1, y1)) = (from.center(), to.center());
	let mid_y = (y0 + y1) / 2.0;
	format!("M {x0} {y0} C {x0} {mid_y}, {x1} {mid_y}, {x1} {y1}")
}

/// Evenly spaced chip rectangles inside a fabric bar.
pub fn fabric_chips(rect: &Rect) -> [Rect; CHIP_COUNT] {
	let span = rect.width - 2.0 * CHIP_MARGIN_X - CHIP_WIDTH;
	let step = span / (CHIP_COUNT - 1) as f64;
	std::array::from_fn(|i| {
		Rect::new(
			rect.x + CHIP_MARGIN_X + step * i as f64,
			rect.y + CHIP_INSET_Y,
			CHIP_WIDTH,
			CHIP_HEIGHT,
		)
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::dataset::system_nodes;

	fn pair() -> Vec<Component> {
		vec![
			Component::new("a", Category::Cpu, "A")
				.rect(0.0, 0.0, 100.0, 100.0)
				.connected_to(&["b"]),
			Component::new("b", Category::Gpu, "B").rect(200.0, 300.0, 100.0, 100.0),
		]
	}

	fn emphasis_of(scene: &Scene, source: &str, target: &str) -> Emphasis {
		scene
			.connectors
			.iter()
			.find(|c| c.source == source && c.target == target)
			.map(|c| c.emphasis)
			.unwrap()
	}

	#[test]
	fn pair_emphasis_follows_selection() {
		let nodes = pair();
		assert_eq!(emphasis_of(&build_scene(&nodes, Some("a")), "a", "b"), Emphasis::Active);
		assert_eq!(emphasis_of(&build_scene(&nodes, Some("b")), "a", "b"), Emphasis::Active);
		assert_eq!(emphasis_of(&build_scene(&nodes, None), "a", "b"), Emphasis::Idle);
		assert_eq!(emphasis_of(&build_scene(&nodes, Some("zzz")), "a", "b"), Emphasis::Idle);
	}

	#[test]
	fn path_is_vertical_s_curve() {
		let from = Rect::new(0.0, 0.0, 100.0, 100.0);
		let to = Rect::new(200.0, 300.0, 100.0, 100.0);
		assert_eq!(
			connector_path(&from, &to),
			"M 50 50 C 50 200, 250 200, 250 350"
		);
	}

	#[test]
	fn dangling_targets_are_skipped_and_reported() {
		let mut nodes = pair();
		nodes[1].connected_to = vec!["ghost".into(), "a".into()];
		let scene = build_scene(&nodes, Some("b"));
		assert_eq!(scene.connectors.len(), 2);
		assert_eq!(
			scene.dangling,
			vec![DanglingRef {
				source: "b".into(),
				target: "ghost".into()
			}]
		);
		assert!(scene.connectors.iter().all(|c| c.target != "ghost"));
		assert_eq!(scene.dangling[0].to_string(), "no component ghost for connector from b");
	}

	#[test]
	fn one_connector_per_resolved_reference() {
		let nodes = system_nodes();
		let scene = build_scene(nodes, None);
		let expected: usize = nodes.iter().map(|n| n.connected_to.len()).sum();
		assert_eq!(scene.connectors.len(), expected);
		assert!(scene.dangling.is_empty());
		assert_eq!(scene.nodes.len(), nodes.len());
	}

	#[test]
	fn only_connectors_touching_selection_are_active() {
		let scene = build_scene(system_nodes(), Some("pcie-sw-1"));
		for c in &scene.connectors {
			let touches = c.source == "pcie-sw-1" || c.target == "pcie-sw-1";
			assert_eq!(c.emphasis == Emphasis::Active, touches, "{} -> {}", c.source, c.target);
		}
		let active = scene
			.connectors
			.iter()
			.filter(|c| c.emphasis == Emphasis::Active)
			.count();
		// cpu-0 -> pcie-sw-1 plus two GPUs and two NICs.
		assert_eq!(active, 5);
	}

	#[test]
	fn data_path_applies_only_when_not_active() {
		let idle = build_scene(system_nodes(), None);
		assert_eq!(emphasis_of(&idle, "pcie-sw-0", "gpu-0"), Emphasis::DataPath);
		assert_eq!(emphasis_of(&idle, "pcie-sw-0", "nic-1"), Emphasis::DataPath);
		assert_eq!(emphasis_of(&idle, "cpu-0", "pcie-sw-0"), Emphasis::Idle);
		assert_eq!(emphasis_of(&idle, "gpu-0", "nvswitch-fabric"), Emphasis::Idle);

		let selected = build_scene(system_nodes(), Some("gpu-0"));
		assert_eq!(emphasis_of(&selected, "pcie-sw-0", "gpu-0"), Emphasis::Active);
		assert_eq!(emphasis_of(&selected, "pcie-sw-0", "gpu-1"), Emphasis::DataPath);
	}

	#[test]
	fn strokes() {
		assert_eq!(Emphasis::Active.stroke().width, 3.0);
		assert_eq!(Emphasis::Active.stroke().opacity, 1.0);
		assert_eq!(Emphasis::DataPath.stroke().color, "#64748b");
		assert_eq!(Emphasis::Idle.stroke().opacity, 0.3);
	}

	#[test]
	fn rebuild_is_identical() {
		let first = build_scene(system_nodes(), Some("nic-3"));
		let second = build_scene(system_nodes(), Some("nic-3"));
		assert_eq!(first, second);
		assert_eq!(format!("{first:?}"), format!("{second:?}"));
	}

	#[test]
	fn fabric_renders_four_chips() {
		let scene = build_scene(system_nodes(), Some("nvswitch-fabric"));
		let fabric = scene.nodes.iter().find(|n| n.id == "nvswitch-fabric").unwrap();
		assert!(fabric.selected);
		let NodeKind::Fabric { chips } = &fabric.kind else {
			panic!("fabric node should render as chips");
		};
		let xs: Vec<f64> = chips.iter().map(|c| c.x).collect();
		assert_eq!(xs, vec![200.0, 480.0, 760.0, 1040.0]);
		assert!(chips.iter().all(|c| c.y == 915.0 && c.width == 160.0));

		let others = scene.nodes.iter().filter(|n| n.kind == NodeKind::Standard);
		assert_eq!(others.count(), system_nodes().len() - 1);
	}

	#[test]
	fn only_selected_node_is_marked() {
		let scene = build_scene(system_nodes(), Some("cpu-1"));
		let selected: Vec<_> = scene.nodes.iter().filter(|n| n.selected).map(|n| &n.id).collect();
		assert_eq!(selected, vec!["cpu-1"]);
	}
}
