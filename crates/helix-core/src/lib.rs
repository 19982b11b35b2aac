//! Core of the Helix structural analysis engine.
//!
//! Holds the shared data model, the aspect detector, the gate and center
//! tables, the blueprint calculator with its ephemeris seam, configuration,
//! and the file-backed stores used by callers at the persistence boundary.

pub mod aspect;
pub mod blueprint;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod model;
pub mod storage;
pub mod tables;

pub use aspect::{detect_aspect, separation};
pub use blueprint::BlueprintCalculator;
pub use error::CoreError;
