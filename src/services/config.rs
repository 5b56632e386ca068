use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed instruction sent with every completion request.
pub const SYSTEM_INSTRUCTION: &str = r#"
You are an expert system architect specializing in NVIDIA DGX H100 systems and high-performance computing (HPC) clusters.
Your goal is to explain the architecture of the DGX H100 based on the following technical context:

1.  **Topology**: The system consists of 2 Intel Xeon (Sapphire Rapids) CPUs and 8 NVIDIA H100 GPUs.
2.  **PCIe Fabric (Data Plane)**:
    *   The system uses 4x PCIe Gen5 Switches.
    *   Each switch connects 2 GPUs and 2 ConnectX-7 Network Adapters (NICs).
    *   **Crucial**: This topology allows **GPUDirect RDMA**, where GPUs can access the network directly through the PCIe switch without going through the CPU, significantly reducing latency.
3.  **NVLink Fabric (Compute Plane)**:
    *   4x NVSwitch Gen3 chips connect all 8 GPUs in a fully connected non-blocking mesh.
    *   Bandwidth: 900 GB/s bidirectional per GPU. Total aggregate 7.2 TB/s.
4.  **Networking**:
    *   **Compute Fabric**: 8x ConnectX-7 VPI (400Gb/s each) for NDR InfiniBand or 400GbE. These are physically located on two "Cedar" boards but logically connected to the PCIe switches.
    *   **Storage/Mgmt**: 2x ConnectX-7 adapters connected directly to the CPU complex for OS and storage access.
5.  **Use Cases**: Large Scale AI Training, Mixture of Experts (MoE), Scientific Simulation.

When answering users:
*   Be concise but technical.
*   Emphasize the importance of the Switch/NIC/GPU locality for performance.
*   Explain *why* the architecture is designed this way (reducing bottlenecks, maximizing throughput).

Keep answers relatively short (under 150 words) unless asked for a deep dive.
"#;

/// How prior turns are rebuilt into the remote context on each send.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReplayPolicy {
	/// Resend each earlier user turn, collecting fresh model replies, then the new message.
	#[default]
	UserTurnsOnly,
	/// One request carrying the local transcript as-is.
	FullTranscript,
}

impl FromStr for ReplayPolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim() {
			"user-turns" => Ok(ReplayPolicy::UserTurnsOnly),
			"full-transcript" => Ok(ReplayPolicy::FullTranscript),
			other => Err(format!("unknown replay policy: {other}")),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatConfig {
	pub api_key: Option<String>,
	pub model: String,
	pub endpoint: String,
	pub timeout: Duration,
	pub replay: ReplayPolicy,
}

impl Default for ChatConfig {
	fn default() -> Self {
		Self {
			api_key: None,
			model: DEFAULT_MODEL.into(),
			endpoint: DEFAULT_ENDPOINT.into(),
			timeout: DEFAULT_TIMEOUT,
			replay: ReplayPolicy::default(),
		}
	}
}

impl ChatConfig {
	/// Read `API_KEY`, `GEMINI_MODEL`, `GEMINI_ENDPOINT`, `GEMINI_TIMEOUT_SECS` and
	/// `GEMINI_REPLAY` from the build environment.
	pub fn from_build_env() -> Self {
		Self::from_lookup(|key| match key {
			"API_KEY" => option_env!("API_KEY"),
			"GEMINI_MODEL" => option_env!("GEMINI_MODEL"),
			"GEMINI_ENDPOINT" => option_env!("GEMINI_ENDPOINT"),
			"GEMINI_TIMEOUT_SECS" => option_env!("GEMINI_TIMEOUT_SECS"),
			"GEMINI_REPLAY" => option_env!("GEMINI_REPLAY"),
			_ => None,
		})
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<&'static str>) -> Self {
		let mut config = Self::default();
		let value = |key| lookup(key).map(str::trim).filter(|v| !v.is_empty());

		config.api_key = value("API_KEY").map(String::from);
		if let Some(model) = value("GEMINI_MODEL") {
			config.model = model.into();
		}
		if let Some(endpoint) = value("GEMINI_ENDPOINT") {
			config.endpoint = endpoint.into();
		}
		match value("GEMINI_TIMEOUT_SECS").map(str::parse::<u64>) {
			Some(Ok(secs)) if secs > 0 => config.timeout = Duration::from_secs(secs),
			Some(_) => log::warn!("ignoring invalid GEMINI_TIMEOUT_SECS"),
			None => {}
		}
		match value("GEMINI_REPLAY").map(str::parse::<ReplayPolicy>) {
			Some(Ok(replay)) => config.replay = replay,
			Some(Err(e)) => log::warn!("{e}"),
			None => {}
		}
		config
	}
}
