//! FluentPath - Language Assessment Evaluation Core
//!
//! This crate implements the assessment pipeline of the FluentPath
//! language-learning platform: validated assessment content, a pure
//! CEFR scoring/diagnostic engine, and the use cases that drive a
//! session from start to finalized diagnostic, with every external
//! AI call guarded by a shared remote-call executor.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
