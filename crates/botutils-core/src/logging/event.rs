use tracing::Level;

/// One observed log emission.
///
/// Ephemeral: created by the forward layer per tracing event, consumed once
/// by the plugin's listener, never stored.
#[derive(Clone, Debug)]
pub struct LogEvent {
    /// tracing target, `::`-separated (module path unless overridden).
    pub target: String,
    /// Numeric severity code (see [`super::level::ForwardLevel`]).
    pub level: i32,
    /// The event's `message` field, already formatted.
    pub message: String,
    /// Remaining recorded fields, in recording order.
    pub fields: Vec<(String, String)>,
    /// The recorded `error` field, if any.
    pub error: Option<String>,
}

impl LogEvent {
    /// First `::`-separated segment of the target.
    pub fn root(&self) -> &str {
        self.target.split("::").next().unwrap_or("")
    }
}

/// Map a tracing level onto the numeric codes the filter compares against.
///
/// TRACE folds into the debug code; nothing in tracing produces the
/// critical code (50), which exists for configuration parity only.
pub fn level_code(level: &Level) -> i32 {
    if *level == Level::ERROR {
        40
    } else if *level == Level::WARN {
        30
    } else if *level == Level::INFO {
        20
    } else {
        10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_segment() {
        let event = LogEvent {
            target: "botutils_core::logging::sink".to_string(),
            level: 20,
            message: String::new(),
            fields: Vec::new(),
            error: None,
        };
        assert_eq!(event.root(), "botutils_core");
    }

    #[test]
    fn level_codes() {
        assert_eq!(level_code(&Level::TRACE), 10);
        assert_eq!(level_code(&Level::DEBUG), 10);
        assert_eq!(level_code(&Level::INFO), 20);
        assert_eq!(level_code(&Level::WARN), 30);
        assert_eq!(level_code(&Level::ERROR), 40);
    }
}
