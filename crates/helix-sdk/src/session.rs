use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use helix_core::ephemeris::Ephemeris;
use helix_core::model::{BirthMoment, Blueprint, EchoEntry, HumanType};
use helix_core::BlueprintCalculator;
use helix_relational::{
    analyze_relationship, detect_triangulation, RelationshipReport, TriangulationResult,
};
use helix_text::echo::DEFAULT_WINDOW_DAYS;
use helix_text::{detect_echoes, EchoReport, SafetyBreaker, SedaAssessment, SignalFilter};

use crate::error::SdkError;

/// A fluent builder for one reading over people, journal entries and a message.
///
/// The safety breaker always runs on the message before anything else. When it
/// trips into crisis mode the reading stops and only the grounding directive is
/// returned.
pub struct ReadingSession<E> {
    calculator: BlueprintCalculator<E>,
    people: Vec<(String, BirthMoment)>,
    entries: Option<Vec<EchoEntry>>,
    archetype: Option<HumanType>,
    window_days: u32,
    now: Option<DateTime<Utc>>,
    message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedBlueprint {
    pub name: String,
    pub blueprint: Blueprint,
}

/// Everything a non-crisis reading produced.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReadingReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<SedaAssessment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<helix_text::SignalAnalysis>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blueprints: Vec<NamedBlueprint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<RelationshipReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triangulation: Option<TriangulationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub echo: Option<EchoReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Reading {
    /// The message tripped the breaker; only grounding may follow.
    Crisis {
        safety: SedaAssessment,
        directive: String,
    },
    Full(Box<ReadingReport>),
}

impl Reading {
    pub fn is_crisis(&self) -> bool {
        matches!(self, Reading::Crisis { .. })
    }
}

impl<E: Ephemeris> ReadingSession<E> {
    /// Begin a session backed by the given ephemeris.
    pub fn begin(ephemeris: E) -> Self {
        Self {
            calculator: BlueprintCalculator::new(ephemeris),
            people: Vec::new(),
            entries: None,
            archetype: None,
            window_days: DEFAULT_WINDOW_DAYS,
            now: None,
            message: None,
        }
    }

    /// Add a person. The first two form the relationship pair; a third is the outside party.
    pub fn person(&mut self, name: &str, birth: BirthMoment) -> &mut Self {
        self.people.push((name.to_string(), birth));
        self
    }

    /// Journal snapshot to scan for echo patterns.
    pub fn journal(&mut self, entries: impl IntoIterator<Item = EchoEntry>) -> &mut Self {
        self.entries
            .get_or_insert_with(Vec::new)
            .extend(entries);
        self
    }

    /// Primary archetype for echo analysis. Defaults to the first person's type.
    pub fn archetype(&mut self, archetype: HumanType) -> &mut Self {
        self.archetype = Some(archetype);
        self
    }

    pub fn window_days(&mut self, days: u32) -> &mut Self {
        self.window_days = days;
        self
    }

    /// Reference instant for the echo window. Defaults to the time of `run`.
    pub fn now(&mut self, now: DateTime<Utc>) -> &mut Self {
        self.now = Some(now);
        self
    }

    /// Text the user wants read. Gated by the safety breaker.
    pub fn message(&mut self, text: &str) -> &mut Self {
        self.message = Some(text.to_string());
        self
    }

    /// Run the reading.
    pub fn run(&self) -> Result<Reading, SdkError> {
        let mut report = ReadingReport::default();

        if let Some(text) = &self.message {
            let safety = SafetyBreaker::shared()?.assess(text);
            if safety.mode.is_crisis() {
                warn!(score = safety.score, "Reading halted in crisis mode");
                return Ok(Reading::Crisis {
                    directive: safety.directive.clone(),
                    safety,
                });
            }
            report.signal = Some(SignalFilter::shared()?.analyze(text));
            report.safety = Some(safety);
        }

        for (name, birth) in &self.people {
            report.blueprints.push(NamedBlueprint {
                name: name.clone(),
                blueprint: self.calculator.calculate(birth)?,
            });
        }

        if let [a, b, rest @ ..] = report.blueprints.as_slice() {
            let relationship = analyze_relationship(&a.blueprint, &b.blueprint)?;
            if let Some(c) = rest.first() {
                report.triangulation = Some(detect_triangulation(
                    relationship.friction.score,
                    &a.blueprint,
                    &b.blueprint,
                    &c.blueprint,
                )?);
            }
            report.relationship = Some(relationship);
        }

        if let Some(entries) = &self.entries {
            let archetype = self
                .archetype
                .or_else(|| report.blueprints.first().map(|b| b.blueprint.kind))
                .ok_or(SdkError::MissingArchetype)?;
            let now = self.now.unwrap_or_else(Utc::now);
            report.echo = Some(detect_echoes(entries, archetype, self.window_days, now)?);
        }

        info!(
            people = report.blueprints.len(),
            relationship = report.relationship.is_some(),
            echo = report.echo.is_some(),
            "Reading complete"
        );
        Ok(Reading::Full(Box::new(report)))
    }
}
