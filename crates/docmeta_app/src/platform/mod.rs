pub mod app;
pub mod charts;
pub mod config;
pub mod effects;
pub mod render;
