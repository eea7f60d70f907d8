pub mod benchmark;
pub mod chart_service;
pub mod completion;
pub mod config_store;
pub mod dataset;
pub mod formatter;
pub mod load_controller;
pub mod render;
