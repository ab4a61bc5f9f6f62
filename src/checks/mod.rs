//! Validation pipeline: discovery, link resolution, style rules, runner

pub mod discover;
pub mod resolve;
pub mod rules;
pub mod runner;
