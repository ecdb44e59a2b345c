pub mod engine;
pub mod headless;
pub mod state;
