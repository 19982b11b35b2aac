//! Fluent Rust SDK for running Helix readings.
//!
//! # Example
//! ```no_run
//! use helix_sdk::{BirthMoment, FixedEphemeris, Reading, ReadingSession};
//!
//! let mut session = ReadingSession::begin(FixedEphemeris::uniform(10.0));
//! session
//!     .person("Ana", BirthMoment::parse("1990-04-12", Some("08:30")).unwrap())
//!     .person("Ben", BirthMoment::parse("1988-11-02", None).unwrap())
//!     .message("We keep arguing about the same thing, whatever.");
//! match session.run().unwrap() {
//!     Reading::Crisis { directive, .. } => println!("{directive}"),
//!     Reading::Full(report) => println!("{:?}", report.relationship),
//! }
//! ```

mod error;
mod panel;
mod session;

pub use error::SdkError;
pub use panel::{extract_panels, PanelCommand, PanelExtraction};
pub use session::{NamedBlueprint, Reading, ReadingReport, ReadingSession};

// Re-export the types SDK users need to build a session
pub use helix_core::ephemeris::{Ephemeris, FixedEphemeris, MeanElementEphemeris};
pub use helix_core::model::{BirthMoment, Blueprint, EchoEntry, HumanType};
pub use helix_relational::{RelationshipReport, TriangulationResult};
pub use helix_text::{EchoReport, SedaAssessment, SedaMode, SignalAnalysis};
