//! Wiring profile file parser
//!
//! Profile files hold one `NAME="VALUE"` assignment per line. Lines starting
//! with `#` are comments. Anything else that does not match is skipped with a
//! warning; a bad line never invalidates the rest of the file.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// A line that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineWarning {
    /// 1-based line number
    pub line_no: usize,
    pub line: String,
}

/// Result of parsing one profile file
#[derive(Debug, Clone, Default)]
pub struct ParsedProfile {
    /// Assignments in file order; a repeated key keeps its first position and last value
    pub values: IndexMap<String, String>,
    pub warnings: Vec<LineWarning>,
}

/// Value is greedy up to the last quote on the line
static ASSIGNMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^(\w+)="(.*)""#).expect("static regex"));

/// Parse profile file content
pub fn parse_profile(content: &str) -> ParsedProfile {
    let re = &*ASSIGNMENT_RE;
    let mut parsed = ParsedProfile::default();

    for (idx, line) in content.lines().enumerate() {
        if line.starts_with('#') {
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        match re.captures(line) {
            Some(caps) => {
                parsed.values.insert(caps[1].to_string(), caps[2].to_string());
            }
            None => parsed.warnings.push(LineWarning {
                line_no: idx + 1,
                line: line.to_string(),
            }),
        }
    }

    parsed
}

/// Render one assignment line in the profile file format
pub fn format_assignment(key: &str, value: &str) -> String {
    format!("{}=\"{}\"\n", key, value)
}
