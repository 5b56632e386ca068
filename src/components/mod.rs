pub mod chat;
pub mod detail_panel;
pub mod topology;
