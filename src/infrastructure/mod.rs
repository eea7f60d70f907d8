// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod headless_render;
pub mod http_dataset;
pub mod storage;
