use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info    => "info",
            Severity::Warning => "warning",
            Severity::Error   => "error",
            Severity::Success => "success",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputLine {
    pub severity: Severity,
    pub text: String,
}

impl OutputLine {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self { severity, text: text.into() }
    }
}

/// A labelled sequence of samples from one trajectory call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    /// Arguments of the call that produced the series, by parameter name.
    pub params: Vec<(String, f64)>,
}
