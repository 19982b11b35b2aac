use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::birth::BirthMoment;
use super::body::PlanetaryLongitudes;

/// One of the nine functional zones of a blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Center {
    Head,
    Ajna,
    Throat,
    G,
    Heart,
    Sacral,
    SolarPlexus,
    Spleen,
    Root,
}

impl Center {
    pub const ALL: [Center; 9] = [
        Center::Head,
        Center::Ajna,
        Center::Throat,
        Center::G,
        Center::Heart,
        Center::Sacral,
        Center::SolarPlexus,
        Center::Spleen,
        Center::Root,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Center::Head => "Head",
            Center::Ajna => "Ajna",
            Center::Throat => "Throat",
            Center::G => "G",
            Center::Heart => "Heart",
            Center::Sacral => "Sacral",
            Center::SolarPlexus => "Solar Plexus",
            Center::Spleen => "Spleen",
            Center::Root => "Root",
        }
    }
}

impl std::fmt::Display for Center {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Active/inactive state for all nine centers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CenterMap(BTreeMap<Center, bool>);

impl CenterMap {
    /// A map with every center inactive.
    pub fn empty() -> Self {
        Self(Center::ALL.iter().map(|c| (*c, false)).collect())
    }

    pub fn set(&mut self, center: Center, active: bool) {
        self.0.insert(center, active);
    }

    pub fn is_active(&self, center: Center) -> bool {
        self.0.get(&center).copied().unwrap_or(false)
    }

    /// Active centers in table order.
    pub fn active(&self) -> impl Iterator<Item = Center> + '_ {
        Center::ALL.into_iter().filter(|c| self.is_active(*c))
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }
}

impl Default for CenterMap {
    fn default() -> Self {
        Self::empty()
    }
}

/// The categorical type inferred from the center pattern.
///
/// Doubles as the archetype selector for journal pattern detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HumanType {
    ManifestingGenerator,
    Generator,
    Manifestor,
    Projector,
    Reflector,
}

impl HumanType {
    pub const ALL: [HumanType; 5] = [
        HumanType::Generator,
        HumanType::ManifestingGenerator,
        HumanType::Projector,
        HumanType::Manifestor,
        HumanType::Reflector,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HumanType::ManifestingGenerator => "Manifesting Generator",
            HumanType::Generator => "Generator",
            HumanType::Manifestor => "Manifestor",
            HumanType::Projector => "Projector",
            HumanType::Reflector => "Reflector",
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            HumanType::ManifestingGenerator => Strategy::RespondThenInform,
            HumanType::Generator => Strategy::Respond,
            HumanType::Manifestor => Strategy::Inform,
            HumanType::Projector => Strategy::WaitForInvitation,
            HumanType::Reflector => Strategy::WaitLunarCycle,
        }
    }
}

impl std::fmt::Display for HumanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for HumanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "manifestinggenerator" | "mg" => Ok(HumanType::ManifestingGenerator),
            "generator" => Ok(HumanType::Generator),
            "manifestor" => Ok(HumanType::Manifestor),
            "projector" => Ok(HumanType::Projector),
            "reflector" => Ok(HumanType::Reflector),
            _ => Err(format!("unknown type '{s}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    RespondThenInform,
    Respond,
    Inform,
    WaitForInvitation,
    WaitLunarCycle,
}

impl Strategy {
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::RespondThenInform => "To Respond, then Inform",
            Strategy::Respond => "To Respond",
            Strategy::Inform => "To Inform",
            Strategy::WaitForInvitation => "Wait for the Invitation",
            Strategy::WaitLunarCycle => "Wait a Lunar Cycle",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authority {
    Emotional,
    Sacral,
    Splenic,
    Ego,
    SelfProjected,
    Mental,
    Lunar,
}

impl Authority {
    pub fn label(&self) -> &'static str {
        match self {
            Authority::Emotional => "Emotional",
            Authority::Sacral => "Sacral",
            Authority::Splenic => "Splenic",
            Authority::Ego => "Ego",
            Authority::SelfProjected => "Self-Projected",
            Authority::Mental => "Mental",
            Authority::Lunar => "Lunar",
        }
    }
}

impl std::fmt::Display for Authority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A person's derived structural profile. Pure function of the birth moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub birth: BirthMoment,
    pub longitudes: PlanetaryLongitudes,
    pub gates: BTreeSet<u8>,
    pub centers: CenterMap,
    #[serde(rename = "type")]
    pub kind: HumanType,
    pub strategy: Strategy,
    pub authority: Authority,
}
