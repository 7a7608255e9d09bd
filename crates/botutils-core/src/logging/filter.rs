use crate::domain::ChannelRef;

use super::{event::LogEvent, level::ForwardLevel};

/// Root namespace prefix an event's target must carry to be forwarded.
///
/// Matches the `botutils` crate family (`botutils`, `botutils_core`,
/// `botutils_telegram`); everything else in the process is dropped.
pub const ROOT_NAMESPACE: &str = "botutils";

/// The forwarding decision, taken per event against the cached settings.
///
/// Every rejection is silent. The level comparison is an exact match, not a
/// threshold: level Warn forwards warnings only, nothing above.
#[derive(Clone, Copy, Debug)]
pub struct ForwardPolicy {
    pub enabled: bool,
    pub level: ForwardLevel,
    pub destination: Option<ChannelRef>,
}

impl ForwardPolicy {
    pub fn accepts(&self, event: &LogEvent) -> bool {
        if !self.enabled {
            return false;
        }
        if self.destination.is_none() {
            return false;
        }
        if !event.root().starts_with(ROOT_NAMESPACE) {
            return false;
        }
        if self.level == ForwardLevel::None {
            return false;
        }
        event.level == self.level.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChatId;

    fn event(target: &str, level: i32) -> LogEvent {
        LogEvent {
            target: target.to_string(),
            level,
            message: "hello".to_string(),
            fields: Vec::new(),
            error: None,
        }
    }

    fn policy(enabled: bool, level: ForwardLevel, resolved: bool) -> ForwardPolicy {
        ForwardPolicy {
            enabled,
            level,
            destination: resolved.then_some(ChannelRef {
                chat_id: ChatId(77),
            }),
        }
    }

    #[test]
    fn accepts_exact_level_match() {
        let p = policy(true, ForwardLevel::Info, true);
        assert!(p.accepts(&event("botutils_core::plugin", 20)));
    }

    #[test]
    fn level_match_is_exact_not_threshold() {
        // Level set to Debug: an Info event must be rejected.
        let p = policy(true, ForwardLevel::Debug, true);
        assert!(!p.accepts(&event("botutils_core::plugin", 20)));
        assert!(p.accepts(&event("botutils_core::plugin", 10)));
    }

    #[test]
    fn unrecognized_root_always_rejected() {
        let p = policy(true, ForwardLevel::Info, true);
        assert!(!p.accepts(&event("other::module", 20)));
        assert!(!p.accepts(&event("teloxide::dispatching", 20)));
    }

    #[test]
    fn disabled_rejects_everything() {
        let p = policy(false, ForwardLevel::Info, true);
        assert!(!p.accepts(&event("botutils_core::plugin", 20)));
    }

    #[test]
    fn missing_destination_rejects() {
        let p = policy(true, ForwardLevel::Info, false);
        assert!(!p.accepts(&event("botutils_core::plugin", 20)));
    }

    #[test]
    fn level_none_rejects() {
        let p = policy(true, ForwardLevel::None, true);
        assert!(!p.accepts(&event("botutils_core::plugin", 20)));
        // -1 events do not exist, but a pathological match must still fail.
        assert!(!p.accepts(&event("botutils_core::plugin", -1)));
    }
}
