pub mod conditioning;
pub mod error;
pub mod friction;
pub mod triangulation;

#[cfg(test)]
pub(crate) mod testing;

pub use conditioning::{conditioning_between, ConditioningDirection, ConditioningEntry};
pub use error::RelationalError;
pub use friction::{
    analyze_friction, analyze_relationship, FrictionClass, FrictionReport, PairAspect,
    RelationshipReport,
};
pub use triangulation::{detect_triangulation, Side, TriangulationResult, TriangulationRole};
