//! # Config Crate
//!
//! Centralized configuration constants for the CSG pipeline. All magic
//! numbers and tunable precision values are defined here to ensure
//! consistency across crates.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::EPSILON;
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f32 = 1e-8;
//! assert!(value.abs() < EPSILON);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
