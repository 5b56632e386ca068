use std::sync::LazyLock;

use super::types::{Category, Component};

/// Logical size of the SVG viewport.
pub const DIAGRAM_WIDTH: f64 = 1400.0;
pub const DIAGRAM_HEIGHT: f64 = 1000.0;

pub const LINE_DEFAULT: &str = "#475569";
pub const LINE_ACTIVE: &str = "#38bdf8";
/// Slightly brighter default for GPUDirect paths (switch to GPU or NIC).
pub const LINE_DATA_PATH: &str = "#64748b";

// Layout rows
const LEVEL_CPU: f64 = 100.0;
const LEVEL_PCIE: f64 = 320.0;
const LEVEL_NIC: f64 = 500.0;
const LEVEL_GPU: f64 = 700.0;
const LEVEL_NVSWITCH: f64 = 900.0;

static SYSTEM_NODES: LazyLock<Vec<Component>> = LazyLock::new(build_system_nodes);

/// Every component of the DGX H100 board, in render order.
pub fn system_nodes() -> &'static [Component] {
	&SYSTEM_NODES
}

pub fn find<'a>(nodes: &'a [Component], id: &str) -> Option<&'a Component> {
	nodes.iter().find(|n| n.id == id)
}

/// X of the PCIe switch that owns the `i`th GPU/NIC pair.
fn switch_x(i: usize) -> f64 {
	150.0 + 300.0 * (i / 2) as f64
}

fn build_system_nodes() -> Vec<Component> {
	let mut nodes = vec![
		Component::new("cpu-0", Category::Cpu, "CPU 0")
			.description(
				"Intel Xeon Platinum 8480C (Sapphire Rapids). Root complex for left system half.",
			)
			.specs(&["56 Cores", "PCIe Gen5 Root"])
			.rect(480.0, LEVEL_CPU, 140.0, 100.0)
			.connected_to(&["pcie-sw-0", "pcie-sw-1", "nic-store-0", "nvme-0", "cpu-1"]),
		Component::new("cpu-1", Category::Cpu, "CPU 1")
			.description(
				"Intel Xeon Platinum 8480C (Sapphire Rapids). Root complex for right system half.",
			)
			.specs(&["56 Cores", "PCIe Gen5 Root"])
			.rect(780.0, LEVEL_CPU, 140.0, 100.0)
			.connected_to(&["pcie-sw-2", "pcie-sw-3", "nic-store-1", "nvme-1"]),
		Component::new("nic-store-0", Category::StorageNic, "Storage NIC 0")
			.description(
				"ConnectX-7 VPI for Storage and In-Band Management. Directly attached to CPU 0.",
			)
			.specs(&["OSFP Port", "400Gb/s", "NFS/Storage Traffic"])
			.rect(280.0, LEVEL_CPU + 10.0, 120.0, 80.0),
		Component::new("nic-store-1", Category::StorageNic, "Storage NIC 1")
			.description(
				"ConnectX-7 VPI for Storage and In-Band Management. Directly attached to CPU 1.",
			)
			.specs(&["OSFP Port", "400Gb/s", "NFS/Storage Traffic"])
			.rect(1000.0, LEVEL_CPU + 10.0, 120.0, 80.0),
		Component::new("nvme-0", Category::Nvme, "NVMe 0")
			.description("U.2 NVMe boot and data cache drives behind CPU 0.")
			.specs(&["PCIe Gen4 x4", "Local Scratch"])
			.rect(290.0, LEVEL_CPU + 115.0, 100.0, 50.0),
		Component::new("nvme-1", Category::Nvme, "NVMe 1")
			.description("U.2 NVMe boot and data cache drives behind CPU 1.")
			.specs(&["PCIe Gen4 x4", "Local Scratch"])
			.rect(1010.0, LEVEL_CPU + 115.0, 100.0, 50.0),
	];

	for (sw, (cpu, first)) in [("CPU0", 0), ("CPU0", 2), ("CPU1", 4), ("CPU1", 6)]
		.into_iter()
		.enumerate()
	{
		let (gpu_a, gpu_b, nic_a, nic_b) = (
			format!("gpu-{first}"),
			format!("gpu-{}", first + 1),
			format!("nic-{first}"),
			format!("nic-{}", first + 1),
		);
		nodes.push(
			Component::new(format!("pcie-sw-{sw}"), Category::PcieSwitch, format!("PCIe Switch {sw}"))
				.description(format!(
					"Switch Complex {sw}. Routes traffic between {cpu}, GPUs {first}-{}, and NICs {first}-{}.",
					first + 1,
					first + 1
				))
				.specs(&["PCIe Gen5 x16 Lanes", "Supports GPUDirect"])
				.rect(switch_x(first), LEVEL_PCIE, 240.0, 60.0)
				.connected_to(&[&gpu_a, &gpu_b, &nic_a, &nic_b]),
		);
	}

	// Compute NICs hang off the PCIe switches; their links live on the switch.
	for i in 0..8 {
		let offset = if i % 2 == 0 { 30.0 } else { 150.0 };
		nodes.push(
			Component::new(format!("nic-{i}"), Category::ComputeNic, format!("CX-7 {i}"))
				.description(format!(
					"ConnectX-7 VPI Adapter {i}. Provides 400Gb/s NDR InfiniBand/Ethernet. \
					 Supports GPUDirect RDMA by sharing PCIe Switch with GPUs."
				))
				.specs(&["NDR 400Gb/s", "OSFP", "GPUDirect"])
				.rect(switch_x(i) + offset - 20.0, LEVEL_NIC, 100.0, 80.0),
		);
	}

	for i in 0..8 {
		let offset = if i % 2 == 0 { 10.0 } else { 130.0 };
		nodes.push(
			Component::new(format!("gpu-{i}"), Category::Gpu, format!("H100 {i}"))
				.description(
					"NVIDIA H100 Tensor Core GPU. Connected via PCIe Gen5 to Switch (for Host/NIC \
					 access) and NVLink to Fabric (for GPU-GPU).",
				)
				.specs(&["80GB HBM3", "Transformer Engine", "NVLink Gen4"])
				.rect(switch_x(i) + offset, LEVEL_GPU, 100.0, 100.0)
				.connected_to(&["nvswitch-fabric"]),
		);
	}

	nodes.push(
		Component::new(
			"nvswitch-fabric",
			Category::NvSwitch,
			"NVSwitch Gen3 Fabric (4x Chips)",
		)
		.description(
			"High-bandwidth NVLink Network. 4x NVSwitch chips provide full all-to-all \
			 connectivity between GPUs at 900 GB/s.",
		)
		.specs(&["3.6 TB/s Bisection BW", "SHARP Support", "4x Physical Chips"])
		.rect(100.0, LEVEL_NVSWITCH, 1200.0, 80.0),
	);

	nodes
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn ids_are_unique() {
		let mut seen = HashSet::new();
		for node in system_nodes() {
			assert!(seen.insert(node.id.as_str()), "duplicate id {}", node.id);
		}
	}

	#[test]
	fn references_resolve() {
		let nodes = system_nodes();
		for node in nodes {
			for target in &node.connected_to {
				assert!(find(nodes, target).is_some(), "{} -> {target}", node.id);
			}
		}
	}

	#[test]
	fn board_inventory() {
		let count = |c: Category| system_nodes().iter().filter(|n| n.category == c).count();
		assert_eq!(count(Category::Cpu), 2);
		assert_eq!(count(Category::StorageNic), 2);
		assert_eq!(count(Category::PcieSwitch), 4);
		assert_eq!(count(Category::ComputeNic), 8);
		assert_eq!(count(Category::Gpu), 8);
		assert_eq!(count(Category::NvSwitch), 1);
		assert_eq!(count(Category::Nvme), 2);
		assert_eq!(system_nodes().len(), 27);
	}

	#[test]
	fn pair_layout_follows_parent_switch() {
		let nodes = system_nodes();
		let rect = |id: &str| find(nodes, id).unwrap().rect;
		assert_eq!(rect("pcie-sw-2").x, 750.0);
		assert_eq!(rect("nic-0").x, 160.0);
		assert_eq!(rect("nic-1").x, 280.0);
		assert_eq!(rect("gpu-6").x, 1060.0);
		assert_eq!(rect("gpu-7").x, 1180.0);
		assert_eq!(rect("gpu-7").y, LEVEL_GPU);
	}

	#[test]
	fn colors_follow_category() {
		for node in system_nodes() {
			assert_eq!(node.color, node.category.color());
		}
	}

	#[test]
	fn switch_descriptions_name_their_pairs() {
		let sw = find(system_nodes(), "pcie-sw-3").unwrap();
		assert_eq!(
			sw.description,
			"Switch Complex 3. Routes traffic between CPU1, GPUs 6-7, and NICs 6-7."
		);
		assert_eq!(sw.connected_to, vec!["gpu-6", "gpu-7", "nic-6", "nic-7"]);
	}
}
