mod component;
pub mod transcript;

pub use component::ChatWidget;
