pub mod merge;
pub mod presets;
pub mod store;
