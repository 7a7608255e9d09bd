use std::str::FromStr;

use crate::errors::Error;

/// Severity a forwarded event must match exactly.
///
/// Codes mirror the conventional numeric levels; `None` (-1) disables
/// matching entirely. Matching is exact, not an at-least threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardLevel {
    Debug,
    Info,
    Warn,
    Error,
    Critical,
    None,
}

impl ForwardLevel {
    pub const fn code(self) -> i32 {
        match self {
            ForwardLevel::Debug => 10,
            ForwardLevel::Info => 20,
            ForwardLevel::Warn => 30,
            ForwardLevel::Error => 40,
            ForwardLevel::Critical => 50,
            ForwardLevel::None => -1,
        }
    }

    /// Unknown codes degrade to `None` rather than erroring; the store only
    /// ever holds codes written through this enum.
    pub fn from_code(code: i32) -> Self {
        match code {
            10 => ForwardLevel::Debug,
            20 => ForwardLevel::Info,
            30 => ForwardLevel::Warn,
            40 => ForwardLevel::Error,
            50 => ForwardLevel::Critical,
            _ => ForwardLevel::None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ForwardLevel::Debug => "Debug",
            ForwardLevel::Info => "Info",
            ForwardLevel::Warn => "Warn",
            ForwardLevel::Error => "Error",
            ForwardLevel::Critical => "Critical",
            ForwardLevel::None => "None",
        }
    }
}

impl FromStr for ForwardLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(ForwardLevel::Debug),
            "INFO" => Ok(ForwardLevel::Info),
            "WARN" | "WARNING" => Ok(ForwardLevel::Warn),
            "ERROR" => Ok(ForwardLevel::Error),
            "CRITICAL" | "FATAL" => Ok(ForwardLevel::Critical),
            "NONE" => Ok(ForwardLevel::None),
            other => Err(Error::BadArgument(format!(
                "unknown logging level `{other}`"
            ))),
        }
    }
}
