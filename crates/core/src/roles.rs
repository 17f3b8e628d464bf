//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000001_create_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_CITIZEN: &str = "citizen";

/// Role id of `citizen` in the seeded `roles` table. Self-registration
/// always lands here.
pub const CITIZEN_ROLE_ID: i64 = 3;

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_STAFF, ROLE_CITIZEN];

/// Whether the role may work the pickup and recycling queues.
pub fn is_staff_or_admin(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_STAFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_and_admin_are_privileged() {
        assert!(is_staff_or_admin(ROLE_ADMIN));
        assert!(is_staff_or_admin(ROLE_STAFF));
        assert!(!is_staff_or_admin(ROLE_CITIZEN));
        assert!(!is_staff_or_admin(""));
    }
}
