use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A directive embedded in generated text asking the UI to open a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "panel", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PanelCommand {
    Blueprint,
    Friction { a: String, b: String },
    Triangulation { a: String, b: String, c: String },
    Echo,
    Signal,
}

impl std::fmt::Display for PanelCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelCommand::Blueprint => f.write_str("[PANEL:BLUEPRINT]"),
            PanelCommand::Friction { a, b } => write!(f, "[PANEL:FRICTION:{a}:{b}]"),
            PanelCommand::Triangulation { a, b, c } => {
                write!(f, "[PANEL:TRIANGULATION:{a}:{b}:{c}]")
            }
            PanelCommand::Echo => f.write_str("[PANEL:ECHO]"),
            PanelCommand::Signal => f.write_str("[PANEL:SIGNAL]"),
        }
    }
}

impl PanelCommand {
    fn from_parts(kind: &str, args: &[&str]) -> Option<Self> {
        let arg = |i: usize| args.get(i).map(|s| s.trim().to_string());
        match (kind, args.len()) {
            ("BLUEPRINT", 0) => Some(PanelCommand::Blueprint),
            ("ECHO", 0) => Some(PanelCommand::Echo),
            ("SIGNAL", 0) => Some(PanelCommand::Signal),
            ("FRICTION", 2) => Some(PanelCommand::Friction {
                a: arg(0)?,
                b: arg(1)?,
            }),
            ("TRIANGULATION", 3) => Some(PanelCommand::Triangulation {
                a: arg(0)?,
                b: arg(1)?,
                c: arg(2)?,
            }),
            _ => None,
        }
    }
}

/// Generated text with its panel directives pulled out.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PanelExtraction {
    pub commands: Vec<PanelCommand>,
    pub text: String,
}

fn tag_pattern() -> Option<&'static Regex> {
    static TAG: OnceLock<Option<Regex>> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"\[PANEL:([A-Z_]+)((?::[^\]:\[]+)*)\]").ok())
        .as_ref()
}

/// Pull recognised `[PANEL:...]` tags out of `text`, in order of appearance.
///
/// Tags that are unknown or have the wrong number of arguments stay in the text.
pub fn extract_panels(text: &str) -> PanelExtraction {
    let mut commands = Vec::new();
    let mut cleaned = String::with_capacity(text.len());
    let mut last = 0;
    let Some(pattern) = tag_pattern() else {
        return PanelExtraction {
            commands,
            text: text.to_string(),
        };
    };

    let mut after_tag = false;
    for caps in pattern.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let kind = caps.get(1).map_or("", |m| m.as_str());
        let args: Vec<&str> = caps
            .get(2)
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .map(|s| s[1..].split(':').collect())
            .unwrap_or_default();

        if let Some(command) = PanelCommand::from_parts(kind, &args) {
            push_segment(&mut cleaned, &text[last..whole.start()], after_tag);
            last = whole.end();
            after_tag = true;
            commands.push(command);
        }
    }
    push_segment(&mut cleaned, &text[last..], after_tag);

    PanelExtraction {
        commands,
        text: cleaned,
    }
}

/// Append the text between tags, closing the gap a removed tag leaves behind.
///
/// Only whitespace touching a removed tag is affected.
fn push_segment(cleaned: &mut String, segment: &str, after_tag: bool) {
    if !after_tag {
        cleaned.push_str(segment);
        return;
    }
    let at_line_start = cleaned.is_empty() || cleaned.ends_with('\n');
    let at_gap = at_line_start || cleaned.ends_with([' ', '\t']);
    let mut rest = if at_gap {
        segment.trim_start_matches([' ', '\t'])
    } else {
        segment
    };
    if rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n") {
        let kept = cleaned.trim_end_matches([' ', '\t']).len();
        cleaned.truncate(kept);
        // a line that held only tags disappears with its newline
        if cleaned.is_empty() || cleaned.ends_with('\n') {
            rest = rest
                .strip_prefix("\r\n")
                .or_else(|| rest.strip_prefix('\n'))
                .unwrap_or(rest);
        }
    }
    cleaned.push_str(rest);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_all_kinds() {
        let text = "Here is your chart [PANEL:BLUEPRINT] and the pair view \
                    [PANEL:FRICTION:Ana:Ben]. Also [PANEL:TRIANGULATION:Ana:Ben:Cleo] \
                    [PANEL:ECHO][PANEL:SIGNAL]";
        let out = extract_panels(text);
        assert_eq!(
            out.commands,
            vec![
                PanelCommand::Blueprint,
                PanelCommand::Friction {
                    a: "Ana".into(),
                    b: "Ben".into()
                },
                PanelCommand::Triangulation {
                    a: "Ana".into(),
                    b: "Ben".into(),
                    c: "Cleo".into()
                },
                PanelCommand::Echo,
                PanelCommand::Signal,
            ]
        );
        assert_eq!(out.text, "Here is your chart and the pair view . Also");
    }

    #[test]
    fn test_unknown_and_malformed_tags_stay() {
        let text = "A [PANEL:WEATHER] B [PANEL:FRICTION:Ana] C [PANEL:ECHO]";
        let out = extract_panels(text);
        assert_eq!(out.commands, vec![PanelCommand::Echo]);
        assert_eq!(out.text, "A [PANEL:WEATHER] B [PANEL:FRICTION:Ana] C");
    }

    #[test]
    fn test_no_tags_is_identity() {
        let out = extract_panels("Nothing to see.\nSecond line.");
        assert!(out.commands.is_empty());
        assert_eq!(out.text, "Nothing to see.\nSecond line.");
    }

    #[test]
    fn test_untagged_lines_keep_indentation() {
        let text = concat!(
            "Steps:\n  - first\n      code  block\n",
            "[PANEL:ECHO]\n",
            "  - second [PANEL:SIGNAL]\nend",
        );
        let out = extract_panels(text);
        assert_eq!(out.commands, vec![PanelCommand::Echo, PanelCommand::Signal]);
        assert_eq!(
            out.text,
            "Steps:\n  - first\n      code  block\n  - second\nend"
        );
    }

    #[test]
    fn test_indented_text_without_tags_is_identity() {
        let text = "  leading\n\tTabbed  twice\n";
        assert_eq!(extract_panels(text).text, text);
    }

    #[test]
    fn test_names_with_spaces_are_trimmed() {
        let out = extract_panels("[PANEL:FRICTION: Ana Lopez : Ben ]");
        assert_eq!(
            out.commands,
            vec![PanelCommand::Friction {
                a: "Ana Lopez".into(),
                b: "Ben".into()
            }]
        );
        assert!(out.text.is_empty());
    }

    #[test]
    fn test_display_round_trips_through_parser() {
        let command = PanelCommand::Triangulation {
            a: "x".into(),
            b: "y".into(),
            c: "z".into(),
        };
        let out = extract_panels(&command.to_string());
        assert_eq!(out.commands, vec![command]);
    }
}
