//! External content provider boundary
//!
//! The oracle supplies everything educational: bug labels for a wave, a
//! failing test for a hit enemy, and the eventual fix. It is treated as
//! untrusted and unreliable - every call can fail, and the engine degrades
//! to deterministic fallback content rather than propagating errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How bad the generated bug is, as judged by the oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// A generated failing test for one bug concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    pub bug: String,
    pub test_code: String,
    pub explanation: String,
    pub severity: Severity,
    /// Point value for resolving this bug; `None` means use the tuned default
    pub points_worth: Option<u32>,
}

/// A generated fix for a previously failing test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixReport {
    pub bug: String,
    pub fix_code: String,
    pub explanation: String,
}

/// Oracle failure modes. All of them are survivable.
#[derive(Debug, Clone, Error)]
pub enum OracleError {
    #[error("oracle unavailable: {0}")]
    Unavailable(String),
    #[error("oracle returned malformed content")]
    Malformed,
}

/// The asynchronous content service, seen from the tick loop.
///
/// Calls are issued synchronously at scheduled ticks; the multi-tick delays
/// the player perceives live in the engagement state machine, not here.
pub trait Oracle {
    /// Bug labels for a wave. Callers pad or truncate to `enemy_count`.
    fn wave_bugs(&mut self, wave: u32, enemy_count: usize) -> Result<Vec<String>, OracleError>;

    /// A failing test for the given bug, scaled to the current wave.
    fn generate_test(&mut self, bug: &str, wave: u32) -> Result<TestReport, OracleError>;

    /// A fix for the given bug and its failing test.
    fn fix_bug(&mut self, bug: &str, test_code: &str) -> Result<FixReport, OracleError>;
}

/// Static label pool used whenever the oracle cannot supply a wave
pub const FALLBACK_BUGS: [&str; 8] = [
    "NullPointer",
    "IndexOutOfBounds",
    "TypeError",
    "ReferenceError",
    "SyntaxError",
    "MemoryLeak",
    "RaceCondition",
    "BufferOverflow",
];

/// Cycle the fallback pool to fill `count` slots
pub fn fallback_bugs(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| FALLBACK_BUGS[i % FALLBACK_BUGS.len()].to_string())
        .collect()
}

/// Deterministic offline oracle with canned content.
///
/// Stands in for the remote service in tests and the demo binary; also a
/// reasonable shipping fallback when the host has no network layer at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticOracle;

impl StaticOracle {
    fn severity_for_wave(wave: u32) -> Severity {
        match wave {
            0..=2 => Severity::Low,
            3..=4 => Severity::Medium,
            5..=6 => Severity::High,
            _ => Severity::Critical,
        }
    }
}

impl Oracle for StaticOracle {
    fn wave_bugs(&mut self, _wave: u32, enemy_count: usize) -> Result<Vec<String>, OracleError> {
        Ok(fallback_bugs(enemy_count))
    }

    fn generate_test(&mut self, bug: &str, wave: u32) -> Result<TestReport, OracleError> {
        Ok(TestReport {
            bug: bug.to_string(),
            test_code: format!(
                "#[test]\nfn triggers_{}() {{\n    assert!(subject.exhibits(\"{bug}\"));\n}}",
                bug.to_lowercase().replace([' ', '-'], "_"),
            ),
            explanation: format!("{bug} makes the code under test fail this assertion."),
            severity: Self::severity_for_wave(wave),
            points_worth: Some(100 + (wave.saturating_sub(1)) * 25),
        })
    }

    fn fix_bug(&mut self, bug: &str, _test_code: &str) -> Result<FixReport, OracleError> {
        Ok(FixReport {
            bug: bug.to_string(),
            fix_code: format!("// Fixed: {bug}"),
            explanation: format!("Bug {bug} has been resolved!"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_cycles_past_pool_size() {
        let bugs = fallback_bugs(11);
        assert_eq!(bugs.len(), 11);
        assert_eq!(bugs[0], "NullPointer");
        assert_eq!(bugs[8], "NullPointer");
        assert_eq!(bugs[10], "TypeError");
    }

    #[test]
    fn static_oracle_scales_points_with_wave() {
        let mut oracle = StaticOracle;
        let t1 = oracle.generate_test("NullPointer", 1).unwrap();
        let t4 = oracle.generate_test("NullPointer", 4).unwrap();
        assert_eq!(t1.points_worth, Some(100));
        assert_eq!(t4.points_worth, Some(175));
        assert_eq!(t1.severity, Severity::Low);
        assert_eq!(t4.severity, Severity::Medium);
    }
}
