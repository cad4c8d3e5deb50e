use auth::Role;

use crate::domain::user::models::UserId;

/// Identity of the caller for the duration of one request.
///
/// Derived from verified token claims at the HTTP boundary and passed
/// explicitly into every gated operation; never re-queried from the store
/// mid-request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity {
    pub id: UserId,
    pub role: Role,
}

impl CallerIdentity {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Whether the caller holds the admin role.
    ///
    /// Admin-only endpoints check this before any ownership logic runs.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// The single access rule gating every task and user-profile operation:
    /// admins may touch anything, everyone else only what they own.
    ///
    /// The role is checked first, so for an admin the owner id is never
    /// compared (it may be dangling, e.g. while resolving a resource whose
    /// owner was deleted).
    pub fn can_access(&self, owner_id: &UserId) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Regular => self.id == *owner_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(id: UserId, role: Role) -> CallerIdentity {
        CallerIdentity::new(id, role)
    }

    #[test]
    fn test_owner_accesses_own_resource() {
        let id = UserId::new();
        assert!(caller(id, Role::Regular).can_access(&id));
    }

    #[test]
    fn test_stranger_denied_other_resource() {
        let stranger = UserId::new();
        let owner = UserId::new();
        assert!(!caller(stranger, Role::Regular).can_access(&owner));
    }

    #[test]
    fn test_admin_accesses_own_resource() {
        let id = UserId::new();
        assert!(caller(id, Role::Admin).can_access(&id));
    }

    #[test]
    fn test_admin_accesses_other_resource() {
        let admin = UserId::new();
        let owner = UserId::new();
        assert!(caller(admin, Role::Admin).can_access(&owner));
    }

    #[test]
    fn test_admin_allowed_for_dangling_owner() {
        // The role check short-circuits: an owner id that resolves to no
        // existing user must still pass for an admin.
        let admin = UserId::new();
        let dangling = UserId::new();
        assert!(caller(admin, Role::Admin).can_access(&dangling));
    }

    #[test]
    fn test_is_admin_gate() {
        let id = UserId::new();
        assert!(caller(id, Role::Admin).is_admin());
        assert!(!caller(id, Role::Regular).is_admin());
    }
}
