//! Discord role gating for moderator commands.

use crate::error::CoreError;

/// Role a member needs to issue `/teleport` unless overridden by config.
pub const DEFAULT_MODERATOR_ROLE: &str = "Game Developers";

pub const PERMISSION_DENIED_MESSAGE: &str = "You do not have permission to use this command.";

/// Whether any of `role_names` matches `required` exactly.
pub fn has_role<S: AsRef<str>>(role_names: &[S], required: &str) -> bool {
    role_names.iter().any(|name| name.as_ref() == required)
}

/// Fail with [`CoreError::Forbidden`] unless the member holds `required`.
pub fn authorize<S: AsRef<str>>(role_names: &[S], required: &str) -> Result<(), CoreError> {
    if has_role(role_names, required) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(PERMISSION_DENIED_MESSAGE.into()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn matching_role_is_authorized() {
        let roles = ["Member", "Game Developers"];
        assert!(authorize(&roles, DEFAULT_MODERATOR_ROLE).is_ok());
    }

    #[test]
    fn role_match_is_case_sensitive() {
        let roles = vec!["game developers".to_string()];
        assert!(!has_role(&roles, DEFAULT_MODERATOR_ROLE));
    }

    #[test]
    fn no_roles_is_forbidden() {
        let roles: [&str; 0] = [];
        assert_matches!(
            authorize(&roles, DEFAULT_MODERATOR_ROLE),
            Err(CoreError::Forbidden(msg)) if msg == PERMISSION_DENIED_MESSAGE
        );
    }
}
