//! One-line JSON record a worker prints on stdout.

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};

/// Pinned version of the worker output record
pub const RECORD_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect: Option<String>,

    pub review: String,
}

impl WorkerRecord {
    pub fn new(aspect: &str, review: String) -> Self {
        Self {
            version: Some(RECORD_VERSION),
            aspect: Some(aspect.to_string()),
            review,
        }
    }

    /// Serialize as a single line (serde_json escapes embedded newlines)
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Parse worker stdout for `expected_aspect`.
///
/// Exactly one non-empty line is accepted. `version` and `aspect` may be
/// omitted, but when present they must match.
pub fn parse_record(stdout: &str, expected_aspect: &str) -> Result<WorkerRecord, ProtocolError> {
    let lines: Vec<&str> = stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() != 1 {
        return Err(ProtocolError::LineCount(lines.len()));
    }

    let record: WorkerRecord = serde_json::from_str(lines[0])?;

    if let Some(version) = record.version {
        if version != RECORD_VERSION {
            return Err(ProtocolError::Version(version));
        }
    }

    if let Some(found) = &record.aspect {
        if found != expected_aspect {
            return Err(ProtocolError::AspectMismatch {
                expected: expected_aspect.to_string(),
                found: found.clone(),
            });
        }
    }

    Ok(record)
}
