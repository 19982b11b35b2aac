use serde::{Deserialize, Serialize};

use helix_core::model::{Blueprint, Center};
use helix_core::tables::conditioning_insight;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditioningDirection {
    AToB,
    BToA,
}

impl std::fmt::Display for ConditioningDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditioningDirection::AToB => f.write_str("A -> B"),
            ConditioningDirection::BToA => f.write_str("B -> A"),
        }
    }
}

/// A center one person carries and the other lacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditioningEntry {
    pub center: Center,
    pub direction: ConditioningDirection,
    pub insight: String,
}

/// Every center active in exactly one of the two blueprints, in center order.
pub fn conditioning_between(a: &Blueprint, b: &Blueprint) -> Vec<ConditioningEntry> {
    Center::ALL
        .into_iter()
        .filter_map(|center| {
            let direction = match (a.centers.is_active(center), b.centers.is_active(center)) {
                (true, false) => ConditioningDirection::AToB,
                (false, true) => ConditioningDirection::BToA,
                _ => return None,
            };
            Some(ConditioningEntry {
                center,
                direction,
                insight: conditioning_insight(center).to_string(),
            })
        })
        .collect()
}
