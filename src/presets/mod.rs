//! Named presets persisted under a single store key

pub mod manager;

pub use manager::PresetManager;
