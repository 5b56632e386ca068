mod component;
pub mod dataset;
pub mod scene;
mod types;

pub use component::TopologyDiagram;
pub use types::{Category, Component};
