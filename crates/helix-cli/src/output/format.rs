use helix_core::model::{EchoEntry, Person};
use helix_relational::{ConditioningDirection, TriangulationRole};
use helix_sdk::{
    EchoReport, NamedBlueprint, RelationshipReport, SedaAssessment, SignalAnalysis,
    TriangulationResult,
};
use helix_text::LoopOrigin;

use super::OutputFormat;

fn json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    let mut out = serde_json::to_string_pretty(value).unwrap_or_default();
    out.push('\n');
    out
}

pub fn format_people(people: &[Person], fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => json(people),
        OutputFormat::Text => {
            if people.is_empty() {
                return "No people stored.\n".to_string();
            }
            people
                .iter()
                .map(|p| format!("\u{25c6} {}  {}\n", p.name, p.birth))
                .collect()
        }
    }
}

pub fn format_blueprint(named: &NamedBlueprint, fmt: OutputFormat) -> String {
    if let OutputFormat::Json = fmt {
        return json(named);
    }
    let bp = &named.blueprint;
    let mut out = String::new();
    out.push_str(&format!("Blueprint: {}\n", named.name));
    out.push_str(&format!("Born:      {}\n", bp.birth));
    out.push_str(&format!("Type:      {}\n", bp.kind));
    out.push_str(&format!("Strategy:  {}\n", bp.strategy));
    out.push_str(&format!("Authority: {}\n", bp.authority));

    let active: Vec<String> = bp.centers.active().map(|c| c.to_string()).collect();
    out.push_str(&format!(
        "Centers:   {}\n",
        if active.is_empty() {
            "(none)".to_string()
        } else {
            active.join(", ")
        }
    ));
    let gates: Vec<String> = bp.gates.iter().map(u8::to_string).collect();
    out.push_str(&format!("Gates:     {}\n", gates.join(" ")));

    out.push_str("\n--- Positions ---\n");
    for (body, lon) in bp.longitudes.iter() {
        out.push_str(&format!("  {:<8} {lon:>7.2}\u{b0}\n", body.to_string()));
    }
    out
}

pub fn format_relationship(
    a: &str,
    b: &str,
    report: &RelationshipReport,
    fmt: OutputFormat,
) -> String {
    if let OutputFormat::Json = fmt {
        return json(report);
    }
    let friction = &report.friction;
    let mut out = String::new();
    out.push_str(&format!("Friction: {a} / {b}\n"));
    out.push_str(&format!(
        "Score:    {} ({})\n",
        friction.score, friction.classification
    ));
    out.push_str(&format!("{}\n", friction.rationale));

    out.push_str(&format!("\n--- Aspects ({}) ---\n", friction.aspects.len()));
    for p in &friction.aspects {
        out.push_str(&format!(
            "  {:<16} {:<12} orb {:>4.1}\u{b0}  {:+.2}\n",
            p.pair.to_string(),
            p.aspect.aspect.to_string(),
            p.aspect.deviation,
            p.contribution
        ));
    }

    if !report.conditioning.is_empty() {
        out.push_str("\n--- Conditioning ---\n");
        for entry in &report.conditioning {
            let (from, to) = match entry.direction {
                ConditioningDirection::AToB => (a, b),
                ConditioningDirection::BToA => (b, a),
            };
            out.push_str(&format!(
                "  {} {from} -> {to}: {}\n",
                entry.center, entry.insight
            ));
        }
    }
    out
}

pub fn format_triangulation(
    names: [&String; 3],
    pair_friction: u8,
    result: &TriangulationResult,
    fmt: OutputFormat,
) -> String {
    if let OutputFormat::Json = fmt {
        return json(result);
    }
    let [a, b, c] = names;
    let role = match (result.role, result.mild) {
        (TriangulationRole::Stabilizer, true) => "STABILIZER (mild)".to_string(),
        (role, _) => role.to_string(),
    };
    let mut out = String::new();
    out.push_str(&format!("Triangulation: {c} around {a} / {b}\n"));
    out.push_str(&format!("Pair friction: {pair_friction}\n"));
    out.push_str(&format!("Role:          {role}\n"));
    out.push_str(&format!(
        "Resonance:     {a} {} / {b} {}\n",
        result.resonance_a, result.resonance_b
    ));
    if let Some(axis) = &result.conflict_axis {
        out.push_str(&format!(
            "Conflict axis: Mars {} ({})\n",
            axis.aspect, axis.nature
        ));
    }
    if let Some(side) = result.aligned_with {
        out.push_str(&format!("Aligned with:  {side:?}\n"));
    }
    out.push_str(&format!("\nImpact: {}\n", result.impact));
    out.push_str(&format!("Risk:   {}\n", result.risk));
    out.push_str(&format!("Next:   {}\n", result.recommendation));
    out
}

pub fn format_entries(entries: &[EchoEntry], fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => json(entries),
        OutputFormat::Text => {
            if entries.is_empty() {
                return "No journal entries.\n".to_string();
            }
            entries
                .iter()
                .map(|e| {
                    let short_id = &e.id[..8.min(e.id.len())];
                    let tag = e
                        .spectrum
                        .map(|s| format!(" [{s}]"))
                        .unwrap_or_default();
                    format!(
                        "\u{25c6} {short_id} {}{tag}  {}\n",
                        e.timestamp.format("%Y-%m-%d %H:%M"),
                        first_line(&e.text)
                    )
                })
                .collect()
        }
    }
}

pub fn format_echo(report: &EchoReport, fmt: OutputFormat) -> String {
    if let OutputFormat::Json = fmt {
        return json(report);
    }
    let mut out = String::new();
    out.push_str(&format!(
        "Echo: {} (drag {}) over {} entries in {} days\n",
        report.status, report.overall_drag, report.total_entries, report.window_days
    ));
    out.push_str(&format!("{}\n", report.insight));

    for l in &report.loops {
        let origin = match l.origin {
            LoopOrigin::Own => "own".to_string(),
            LoopOrigin::Conditioning { from } => format!("conditioning from {from}"),
        };
        out.push_str(&format!(
            "\n--- {} ({origin}) ---\n  frequency {}  intensity {:.1}  drag {}\n  {}\n  {}\n",
            l.theme, l.frequency, l.intensity, l.system_drag, l.description, l.adjustment
        ));
        for e in &l.evidence {
            out.push_str(&format!(
                "  {} [{}] {}\n",
                e.timestamp.format("%Y-%m-%d"),
                e.markers.join(", "),
                e.excerpt
            ));
        }
    }
    out
}

pub fn format_signal(
    signal: &SignalAnalysis,
    safety: Option<&SedaAssessment>,
    fmt: OutputFormat,
) -> String {
    if let OutputFormat::Json = fmt {
        return json(&serde_json::json!({
            "signal": signal,
            "safety": safety,
        }));
    }
    let mut out = String::new();
    out.push_str(&format!("Signal: {} ({})\n", signal.flag, signal.spectrum));
    out.push_str(&format!(
        "Entropy {}  Integration {}  Expansion {}  Density {}\n",
        signal.entropy, signal.integration, signal.expansion, signal.density
    ));
    out.push_str(&format!("\n{}\n", signal.body));
    out.push_str(&format!("Prepare: {}\n", signal.preparation));
    if !signal.markers.is_empty() {
        out.push_str(&format!("Markers: {}\n", signal.markers.join(", ")));
    }
    if let Some(safety) = safety {
        out.push_str(&format!("Safety: {} ({})\n", safety.mode, safety.score));
    }
    out
}

/// The only output allowed once the breaker trips.
pub fn format_crisis(safety: &SedaAssessment, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => json(&serde_json::json!({
            "mode": safety.mode,
            "directive": safety.directive,
        })),
        OutputFormat::Text => format!("{}\n{}\n", safety.mode, safety.directive),
    }
}

pub fn format_seda(safety: &SedaAssessment, fmt: OutputFormat) -> String {
    if let OutputFormat::Json = fmt {
        return json(safety);
    }
    let mut out = String::new();
    out.push_str(&format!(
        "SEDA: {} / {} (score {})\n",
        safety.status, safety.mode, safety.score
    ));
    out.push_str(&format!(
        "Grounding {}  Inflation {}  Distress {}\n",
        safety.grounding, safety.inflation, safety.distress
    ));
    out.push_str(&format!("{}\n", safety.directive));
    out
}

fn first_line(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > 60 {
        let head: String = line.chars().take(60).collect();
        format!("{head}...")
    } else {
        line.to_string()
    }
}
