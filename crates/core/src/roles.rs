//! Role name constants carried in access-token claims.

/// Platform administrator: manages every store.
pub const ROLE_ADMIN: &str = "admin";

/// Dealership staff: scoped to the store named in their token.
pub const ROLE_USER: &str = "user";

/// All roles accepted in a token.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_USER];

/// Returns `true` when `role` is one of [`VALID_ROLES`].
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_are_valid() {
        assert!(is_valid_role("admin"));
        assert!(is_valid_role("user"));
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(!is_valid_role("creator"));
        assert!(!is_valid_role(""));
    }
}
