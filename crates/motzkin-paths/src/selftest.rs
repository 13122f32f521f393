//! Cross-check of the enumerator against the counter.
//!
//! Enumerates every path for one `(length, min_width)` and confirms that the
//! result set has the counted size, contains no duplicates or invalid paths,
//! includes each expected path and excludes each rejected one.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path::is_valid_path;

/// What to check.
#[derive(Debug, Clone)]
pub struct SelfTestConfig {
    pub length: i64,
    pub min_width: i64,
    /// Paths that must be produced.
    pub expect_present: Vec<String>,
    /// Paths that must not be produced.
    pub expect_absent: Vec<String>,
}

impl Default for SelfTestConfig {
    fn default() -> Self {
        Self {
            length: 8,
            min_width: 3,
            expect_present: vec!["(.(...))".to_string()],
            expect_absent: vec!["()......".to_string()],
        }
    }
}

/// Outcome of a self-test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfTestReport {
    pub passed: bool,
    pub length: usize,
    pub min_width: usize,
    /// Paths produced by the enumerator, duplicates included.
    pub enumerated: u128,
    pub counted: u128,
    pub distinct: usize,
    /// Produced paths that break a path invariant.
    pub invalid: Vec<String>,
    /// Expected paths that were not produced.
    pub missing: Vec<String>,
    /// Rejected paths that were produced.
    pub unexpected: Vec<String>,
}

pub fn run_self_test(config: &SelfTestConfig) -> Result<SelfTestReport> {
    let counted = crate::count(config.length, config.min_width)?;
    let paths = crate::enumerate(config.length, config.min_width)?;
    let (length, min_width) = (paths.length(), paths.min_width());

    let mut enumerated: u128 = 0;
    let mut seen = HashSet::new();
    let mut invalid = Vec::new();
    for path in paths {
        enumerated += 1;
        if !is_valid_path(&path, min_width) {
            invalid.push(path.clone());
        }
        seen.insert(path);
    }
    debug!(
        "self-test ({}, {}): enumerated {}, counted {}",
        length, min_width, enumerated, counted
    );

    let missing: Vec<String> = config
        .expect_present
        .iter()
        .filter(|path| !seen.contains(*path))
        .cloned()
        .collect();
    let unexpected: Vec<String> = config
        .expect_absent
        .iter()
        .filter(|path| seen.contains(*path))
        .cloned()
        .collect();

    let distinct = seen.len();
    let passed = enumerated == counted
        && distinct as u128 == enumerated
        && invalid.is_empty()
        && missing.is_empty()
        && unexpected.is_empty();

    Ok(SelfTestReport {
        passed,
        length,
        min_width,
        enumerated,
        counted,
        distinct,
        invalid,
        missing,
        unexpected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MotzkinError;

    #[test]
    fn test_default_self_test_passes() {
        let report = run_self_test(&SelfTestConfig::default()).unwrap();
        assert!(report.passed);
        assert_eq!(report.enumerated, 16);
        assert_eq!(report.counted, 16);
        assert_eq!(report.distinct, 16);
        assert!(report.missing.is_empty());
        assert!(report.unexpected.is_empty());
    }

    #[test]
    fn test_expectation_failures_are_reported() {
        let config = SelfTestConfig {
            length: 4,
            min_width: 1,
            expect_present: vec!["(())".to_string(), "(..)".to_string()],
            expect_absent: vec!["....".to_string(), ".()".to_string()],
        };
        let report = run_self_test(&config).unwrap();
        assert!(!report.passed);
        assert_eq!(report.missing, vec!["(())"]);
        assert_eq!(report.unexpected, vec!["...."]);
        assert_eq!(report.enumerated, report.counted);
    }

    #[test]
    fn test_negative_arguments_fail() {
        let config = SelfTestConfig {
            length: -1,
            ..SelfTestConfig::default()
        };
        assert!(matches!(
            run_self_test(&config),
            Err(MotzkinError::InvalidArgument { name: "length", .. })
        ));
    }

    #[test]
    fn test_report_json_keys() {
        let report = run_self_test(&SelfTestConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["minWidth"], 3);
        assert_eq!(json["passed"], true);
    }
}
