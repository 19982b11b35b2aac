use serde::{Deserialize, Serialize};

use super::birth::BirthMoment;

/// A named birth record kept by the people store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub birth: BirthMoment,
}
