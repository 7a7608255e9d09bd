//! Owner gating for the command group.

use crate::domain::UserId;

/// Every command in this plugin is owner-only; there is no per-command
/// permission granularity.
pub fn is_owner(user_id: Option<UserId>, owners: &[i64]) -> bool {
    match user_id {
        Some(UserId(id)) => owners.contains(&id),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_gate() {
        let owners = vec![11, 22];
        assert!(is_owner(Some(UserId(11)), &owners));
        assert!(!is_owner(Some(UserId(33)), &owners));
        assert!(!is_owner(None, &owners));
    }
}
