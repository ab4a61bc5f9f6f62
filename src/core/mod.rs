//! Core infrastructure: violation model, path handling, file reading, rendering

pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
