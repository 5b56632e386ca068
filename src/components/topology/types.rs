/// Hardware category of a topology node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
	Cpu,
	Gpu,
	NvSwitch,
	ComputeNic,
	StorageNic,
	PcieSwitch,
	Nvme,
}

impl Category {
	/// Stable upper-case code, e.g. `COMPUTE_NIC`.
	pub fn code(self) -> &'static str {
		match self {
			Category::Cpu => "CPU",
			Category::Gpu => "GPU",
			Category::NvSwitch => "NVSWITCH",
			Category::ComputeNic => "COMPUTE_NIC",
			Category::StorageNic => "STORAGE_NIC",
			Category::PcieSwitch => "PCIE_SWITCH",
			Category::Nvme => "NVME",
		}
	}

	pub fn color(self) -> &'static str {
		match self {
			Category::Cpu => "#3b82f6",
			Category::Gpu => "#84cc16",
			Category::NvSwitch => "#a855f7",
			Category::ComputeNic => "#f59e0b",
			Category::StorageNic => "#ea580c",
			Category::PcieSwitch => "#94a3b8",
			Category::Nvme => "#10b981",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	pub fn center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}
}

/// A single node of the server topology.
#[derive(Clone, Debug, PartialEq)]
pub struct Component {
	pub id: String,
	pub category: Category,
	pub label: String,
	pub description: String,
	pub specs: Vec<String>,
	pub rect: Rect,
	/// Ids of the components this one links to. Relation only.
	pub connected_to: Vec<String>,
	pub color: &'static str,
}

impl Component {
	pub fn new(id: impl Into<String>, category: Category, label: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			category,
			label: label.into(),
			description: String::new(),
			specs: Vec::new(),
			rect: Rect::new(0.0, 0.0, 0.0, 0.0),
			connected_to: Vec::new(),
			color: category.color(),
		}
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	pub fn specs<S: AsRef<str>>(mut self, specs: &[S]) -> Self {
		self.specs = specs.iter().map(|s| s.as_ref().to_string()).collect();
		self
	}

	pub fn rect(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
		self.rect = Rect::new(x, y, width, height);
		self
	}

	pub fn connected_to<S: AsRef<str>>(mut self, ids: &[S]) -> Self {
		self.connected_to = ids.iter().map(|s| s.as_ref().to_string()).collect();
		self
	}
}
