mod component;
pub mod model;

pub use component::DetailPanel;
