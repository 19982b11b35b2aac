pub mod aspect;
pub mod birth;
pub mod blueprint;
pub mod body;
pub mod journal;
pub mod person;

pub use aspect::{AspectKind, AspectMatch, Nature};
pub use birth::BirthMoment;
pub use blueprint::{Authority, Blueprint, Center, CenterMap, HumanType, Strategy};
pub use body::{Body, PlanetaryLongitudes};
pub use journal::{EchoEntry, Spectrum};
pub use person::Person;
