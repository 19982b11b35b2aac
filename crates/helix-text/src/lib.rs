//! Dictionary-based text analysis: journal echo patterns, the pre-reading
//! signal filter and the SEDA safety circuit breaker.

pub mod echo;
pub mod error;
pub mod markers;
pub mod seda;
pub mod signal;

pub use echo::{detect_echoes, EchoReport, EchoStatus, LoopOrigin, RecurringLoop};
pub use error::TextError;
pub use markers::MarkerSet;
pub use seda::{assess, SafetyBreaker, SedaAssessment, SedaMode, SedaStatus};
pub use signal::{Density, SignalAnalysis, SignalFilter};
