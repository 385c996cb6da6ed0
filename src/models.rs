//! Wire and result types for the rucaptcha API.

use crate::error::{Result, SolverError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel returned while a captcha is still being worked on.
pub const NOT_READY: &str = "CAPTCHA_NOT_READY";

/// Spelling actually emitted by the live service.
pub const NOT_READY_LEGACY: &str = "CAPCHA_NOT_READY";

/// Identifier assigned by the service to an accepted image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub u64);

impl SubmissionId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SubmissionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for SubmissionId {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim().parse::<u64>().map(SubmissionId).map_err(|_| {
            SolverError::InvalidResponse(format!("expected numeric captcha id, got {:?}", s))
        })
    }
}

/// Response from a successful solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    pub id: SubmissionId,
    pub answer: String,
}

/// JSON envelope returned by both `in.php` and `res.php` when `json=1`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiResponse {
    pub status: u8,
    /// Captcha id, answer, sentinel or error code depending on the call
    #[serde(deserialize_with = "deserialize_string_or_int")]
    pub request: String,
}

impl ApiResponse {
    /// Parse a raw response body.
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| {
            tracing::error!(
                "Invalid API response: {}",
                body.chars().take(200).collect::<String>()
            );
            SolverError::Json(e)
        })
    }

    pub fn is_ok(&self) -> bool {
        self.status == 1
    }
}

/// State of a submission as seen by one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Pending,
    Solved(String),
    Failed(String),
}

impl From<ApiResponse> for PollOutcome {
    fn from(response: ApiResponse) -> Self {
        if response.is_ok() {
            PollOutcome::Solved(response.request)
        } else if is_not_ready(&response.request) {
            PollOutcome::Pending
        } else {
            PollOutcome::Failed(response.request)
        }
    }
}

/// Whether `request` is the "try again later" sentinel.
pub fn is_not_ready(request: &str) -> bool {
    request == NOT_READY || request == NOT_READY_LEGACY
}

/// Deserialize a field that can be either string or integer.
fn deserialize_string_or_int<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct StringOrIntVisitor;

    impl<'de> Visitor<'de> for StringOrIntVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer")
        }

        fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_string<E>(self, v: String) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(StringOrIntVisitor)
}
