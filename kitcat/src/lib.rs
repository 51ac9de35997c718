// ABOUTME: Library exports for kitcat CLI modules for testing and external use
// ABOUTME: Makes argument parsing and configuration available to integration tests

pub mod cli;
pub mod config;
