use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use helix_core::model::{EchoEntry, HumanType};

use crate::error::TextError;

/// Trailing window used when the caller does not pick one.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Entries a theme must appear in before it counts as a loop.
pub const MIN_LOOP_FREQUENCY: usize = 2;

/// Overall drag above this is a chronic pattern.
pub const CHRONIC_ABOVE: u8 = 60;

/// Overall drag above this is an active loop.
pub const ACTIVE_ABOVE: u8 = 25;

const EXCERPT_CHARS: usize = 120;

/// The not-self theme of one archetype.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub archetype: HumanType,
    pub name: &'static str,
    /// Lowercase substrings; none appears in any other theme's list.
    pub markers: &'static [&'static str],
    pub description: &'static str,
    pub adjustment: &'static str,
}

pub const THEMES: [Theme; 5] = [
    Theme {
        archetype: HumanType::Generator,
        name: "Frustration",
        markers: &[
            "frustrated",
            "frustrating",
            "frustration",
            "stuck",
            "going nowhere",
            "drained",
            "exhausted",
            "trapped",
            "burned out",
            "burnt out",
            "stagnant",
            "same old",
        ],
        description: "Energy committed to things that never lit you up.",
        adjustment: "Stop initiating. Wait for something to respond to and let the gut say yes \
                     or no.",
    },
    Theme {
        archetype: HumanType::ManifestingGenerator,
        name: "Impatience",
        markers: &[
            "impatient",
            "rushing",
            "rushed",
            "skipped",
            "too slow",
            "hurry",
            "cut corners",
            "unfinished",
            "jumped ahead",
            "restless",
        ],
        description: "Speed that skips the steps it later has to come back for.",
        adjustment: "Respond first, then inform the people around you before you move.",
    },
    Theme {
        archetype: HumanType::Projector,
        name: "Bitterness",
        markers: &[
            "bitter",
            "unseen",
            "ignored",
            "unappreciated",
            "overlooked",
            "invisible",
            "not recognized",
            "no one listens",
            "nobody listens",
            "taken for granted",
            "not valued",
        ],
        description: "Guidance offered to people who never asked for it.",
        adjustment: "Save your insight for invitations. Rest is part of the work.",
    },
    Theme {
        archetype: HumanType::Manifestor,
        name: "Anger",
        markers: &[
            "angry",
            "furious",
            "enraged",
            "controlled",
            "interrupted",
            "told what to do",
            "pushed back",
            "resisted",
            "blocked",
            "irritated",
            "fed up",
        ],
        description: "Resistance met when others are surprised by your moves.",
        adjustment: "Inform before you act. Telling people removes most of the pushback.",
    },
    Theme {
        archetype: HumanType::Reflector,
        name: "Disappointment",
        markers: &[
            "disappointed",
            "disappointing",
            "disappointment",
            "let down",
            "letdown",
            "don't belong",
            "out of place",
            "lost in the crowd",
            "nothing feels right",
            "numb",
        ],
        description: "Environments that do not reflect you back.",
        adjustment: "Wait a lunar cycle before big decisions and choose your surroundings \
                     carefully.",
    },
];

pub fn theme_for(archetype: HumanType) -> &'static Theme {
    THEMES
        .iter()
        .find(|t| t.archetype == archetype)
        .unwrap_or(&THEMES[0])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EchoStatus {
    Clear,
    ActiveLoop,
    ChronicPattern,
}

impl EchoStatus {
    pub fn from_drag(drag: u8) -> Self {
        if drag > CHRONIC_ABOVE {
            EchoStatus::ChronicPattern
        } else if drag > ACTIVE_ABOVE {
            EchoStatus::ActiveLoop
        } else {
            EchoStatus::Clear
        }
    }
}

impl std::fmt::Display for EchoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EchoStatus::Clear => "CLEAR",
            EchoStatus::ActiveLoop => "ACTIVE_LOOP",
            EchoStatus::ChronicPattern => "CHRONIC_PATTERN",
        };
        f.write_str(s)
    }
}

/// Whether a loop belongs to the person or was picked up from others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoopOrigin {
    Own,
    Conditioning { from: HumanType },
}

/// An entry that fed a loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopEvidence {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub markers: Vec<String>,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringLoop {
    pub theme: String,
    pub archetype: HumanType,
    pub origin: LoopOrigin,
    pub frequency: usize,
    pub intensity: f64,
    pub system_drag: u8,
    pub description: String,
    pub adjustment: String,
    pub evidence: Vec<LoopEvidence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoReport {
    pub window_days: u32,
    pub total_entries: usize,
    pub status: EchoStatus,
    pub overall_drag: u8,
    pub loops: Vec<RecurringLoop>,
    pub insight: String,
}

impl EchoReport {
    pub fn top_loop(&self) -> Option<&RecurringLoop> {
        self.loops.first()
    }
}

/// Scan the journal for recurring not-self loops inside the trailing window.
pub fn detect_echoes(
    entries: &[EchoEntry],
    primary: HumanType,
    window_days: u32,
    now: DateTime<Utc>,
) -> Result<EchoReport, TextError> {
    if window_days == 0 {
        return Err(TextError::InvalidWindow { days: window_days });
    }
    // Windows reaching past the calendar range cover every entry.
    let since = Duration::try_days(i64::from(window_days))
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let window: Vec<&EchoEntry> = entries
        .iter()
        .filter(|e| e.timestamp >= since && e.timestamp <= now)
        .collect();
    let total = window.len();

    if total == 0 {
        return Ok(EchoReport {
            window_days,
            total_entries: 0,
            status: EchoStatus::Clear,
            overall_drag: 0,
            loops: Vec::new(),
            insight: format!(
                "No journal entries in the last {window_days} days. Nothing to read yet."
            ),
        });
    }

    let mut loops: Vec<RecurringLoop> = THEMES
        .iter()
        .filter_map(|theme| theme_loop(theme, &window, primary))
        .collect();
    // stable: ties keep table order
    loops.sort_by(|a, b| b.system_drag.cmp(&a.system_drag));

    let overall_drag = loops
        .iter()
        .map(|l| u32::from(l.system_drag))
        .sum::<u32>()
        .min(100) as u8;
    let status = EchoStatus::from_drag(overall_drag);
    let insight = insight(status, loops.first(), total);
    debug!(total, loops = loops.len(), overall_drag, %status, "Echo patterns scanned");

    Ok(EchoReport {
        window_days,
        total_entries: total,
        status,
        overall_drag,
        loops,
        insight,
    })
}

fn theme_loop(theme: &Theme, window: &[&EchoEntry], primary: HumanType) -> Option<RecurringLoop> {
    let total = window.len();
    let evidence: Vec<LoopEvidence> = window
        .iter()
        .filter_map(|entry| {
            let text = entry.text.to_lowercase();
            let markers: Vec<String> = theme
                .markers
                .iter()
                .filter(|m| text.contains(*m))
                .map(|m| m.to_string())
                .collect();
            (!markers.is_empty()).then(|| LoopEvidence {
                id: entry.id.clone(),
                timestamp: entry.timestamp,
                markers,
                excerpt: excerpt(&entry.text),
            })
        })
        .collect();

    let frequency = evidence.len();
    if frequency < MIN_LOOP_FREQUENCY {
        return None;
    }
    let hits: usize = evidence.iter().map(|e| e.markers.len()).sum();
    let intensity = (hits as f64 / frequency as f64 * 10.0).round() / 10.0;
    let system_drag = (frequency as f64 / total as f64 * intensity * 50.0)
        .min(100.0)
        .round() as u8;
    let origin = if theme.archetype == primary {
        LoopOrigin::Own
    } else {
        LoopOrigin::Conditioning {
            from: theme.archetype,
        }
    };

    Some(RecurringLoop {
        theme: theme.name.to_string(),
        archetype: theme.archetype,
        origin,
        frequency,
        intensity,
        system_drag,
        description: theme.description.to_string(),
        adjustment: theme.adjustment.to_string(),
        evidence,
    })
}

fn insight(status: EchoStatus, top: Option<&RecurringLoop>, total: usize) -> String {
    let Some(top) = top else {
        return "No recurring loop is dragging on the system right now.".to_string();
    };
    let origin = match top.origin {
        LoopOrigin::Own => "This is your own not-self signal.".to_string(),
        LoopOrigin::Conditioning { from } => format!(
            "This looks like conditioning picked up from {} energy around you, not your own \
             pattern.",
            from.label()
        ),
    };
    match status {
        EchoStatus::ChronicPattern => format!(
            "{} has become a chronic pattern ({} of {} entries, drag {}). {}",
            top.theme, top.frequency, total, top.system_drag, origin
        ),
        EchoStatus::ActiveLoop => format!(
            "{} is looping: it showed up in {} of {} entries. {}",
            top.theme, top.frequency, total, origin
        ),
        EchoStatus::Clear => format!(
            "Light echoes of {} are present but not yet pulling on the system.",
            top.theme
        ),
    }
}

fn excerpt(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    fn entry(days_ago: i64, text: &str) -> EchoEntry {
        EchoEntry::new(text, now() - Duration::days(days_ago))
    }

    #[test]
    fn test_generator_frustration_is_chronic() {
        let entries = vec![
            entry(1, "I feel frustrated and stuck at work"),
            entry(3, "Still stuck. So frustrated with this project."),
            entry(5, "Nice walk by the river"),
        ];
        let report = detect_echoes(&entries, HumanType::Generator, 30, now()).unwrap();

        assert_eq!(report.total_entries, 3);
        assert_eq!(report.loops.len(), 1);
        let top = report.top_loop().unwrap();
        assert_eq!(top.theme, "Frustration");
        assert_eq!(top.origin, LoopOrigin::Own);
        assert_eq!(top.frequency, 2);
        assert!((top.intensity - 2.0).abs() < 1e-9);
        // 2/3 * 2.0 * 50
        assert_eq!(top.system_drag, 67);
        assert_eq!(report.overall_drag, 67);
        assert_eq!(report.status, EchoStatus::ChronicPattern);
        assert!(report.insight.contains("Frustration"));
        assert!(report.insight.contains("your own"));
    }

    #[test]
    fn test_empty_window_is_clear() {
        let entries = vec![entry(45, "frustrated"), entry(40, "stuck again")];
        let report = detect_echoes(&entries, HumanType::Generator, 30, now()).unwrap();
        assert_eq!(report.total_entries, 0);
        assert_eq!(report.status, EchoStatus::Clear);
        assert_eq!(report.overall_drag, 0);
        assert!(report.loops.is_empty());
        assert!(report.insight.contains("No journal entries"));
    }

    #[test]
    fn test_future_entries_excluded() {
        let entries = vec![entry(-2, "stuck"), entry(-1, "stuck"), entry(1, "stuck")];
        let report = detect_echoes(&entries, HumanType::Generator, 30, now()).unwrap();
        assert_eq!(report.total_entries, 1);
        assert!(report.loops.is_empty());
    }

    #[test]
    fn test_single_match_is_not_a_loop() {
        let entries = vec![entry(1, "bitter about it"), entry(2, "fine day")];
        let report = detect_echoes(&entries, HumanType::Projector, 30, now()).unwrap();
        assert!(report.loops.is_empty());
        assert_eq!(report.status, EchoStatus::Clear);
        assert!(report.insight.contains("No recurring loop"));
    }

    #[test]
    fn test_conditioning_loop_flagged() {
        let entries = vec![
            entry(1, "Felt ignored in the meeting"),
            entry(2, "Ignored again, totally unseen"),
            entry(3, "Quiet evening"),
            entry(4, "Made soup"),
        ];
        let report = detect_echoes(&entries, HumanType::Generator, 30, now()).unwrap();
        let top = report.top_loop().unwrap();
        assert_eq!(top.theme, "Bitterness");
        assert_eq!(
            top.origin,
            LoopOrigin::Conditioning {
                from: HumanType::Projector
            }
        );
        // hits 1 + 2 over 2 entries -> 1.5; 2/4 * 1.5 * 50 = 37.5
        assert!((top.intensity - 1.5).abs() < 1e-9);
        assert_eq!(top.system_drag, 38);
        assert_eq!(report.status, EchoStatus::ActiveLoop);
        assert!(report.insight.contains("conditioning"));
    }

    #[test]
    fn test_loops_sorted_and_overall_capped() {
        let entries = vec![
            entry(1, "stuck and frustrated and drained, so impatient and rushing"),
            entry(2, "stuck and frustrated and drained, impatient"),
        ];
        let report = detect_echoes(&entries, HumanType::Generator, 30, now()).unwrap();
        assert_eq!(report.loops.len(), 2);
        assert_eq!(report.loops[0].theme, "Frustration");
        assert_eq!(report.loops[0].system_drag, 100);
        assert_eq!(report.loops[1].theme, "Impatience");
        assert_eq!(report.overall_drag, 100);
    }

    #[test]
    fn test_excerpt_truncates_on_chars() {
        let long = "é".repeat(130);
        let short = excerpt(&long);
        assert_eq!(short.chars().count(), 123);
        assert!(short.ends_with("..."));
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(matches!(
            detect_echoes(&[], HumanType::Generator, 0, now()),
            Err(TextError::InvalidWindow { days: 0 })
        ));
    }

    #[test]
    fn test_unbounded_window_covers_everything() {
        let ancient = EchoEntry::new(
            "frustrated and stuck",
            Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap(),
        );
        let entries = vec![ancient, entry(400, "stuck, frustrated")];
        let report = detect_echoes(&entries, HumanType::Generator, u32::MAX, now()).unwrap();
        assert_eq!(report.window_days, u32::MAX);
        assert_eq!(report.total_entries, 2);
        assert_eq!(report.loops.len(), 1);

        let empty = detect_echoes(&[], HumanType::Generator, u32::MAX, now()).unwrap();
        assert_eq!(empty.status, EchoStatus::Clear);
    }

    #[test]
    fn test_markers_do_not_overlap_between_themes() {
        for (i, a) in THEMES.iter().enumerate() {
            for b in THEMES.iter().skip(i + 1) {
                for m in a.markers {
                    for n in b.markers {
                        assert!(
                            !m.contains(n) && !n.contains(m),
                            "{m} ({}) overlaps {n} ({})",
                            a.name,
                            b.name
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_every_archetype_has_a_theme() {
        for kind in HumanType::ALL {
            assert_eq!(theme_for(kind).archetype, kind);
        }
    }

    #[test]
    fn test_report_serializes() {
        let entries = vec![entry(1, "stuck"), entry(2, "stuck")];
        let report = detect_echoes(&entries, HumanType::ManifestingGenerator, 30, now()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["loops"][0]["origin"]["kind"], "conditioning");
        assert_eq!(json["loops"][0]["origin"]["from"], "GENERATOR");
    }
}
