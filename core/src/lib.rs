pub mod config;
pub mod error;
pub mod preset;
pub mod registry;
pub mod render;
pub mod sections;
pub mod template;
