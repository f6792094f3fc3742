//! Requester Identity
//!
//! Who is asking, as established by the HTTP layer from the bearer
//! token.

use kernel::id::UserId;

/// Identity of the requesting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub user_id: Option<UserId>,
    pub is_admin: bool,
}

impl Requester {
    pub const fn anonymous() -> Self {
        Self {
            user_id: None,
            is_admin: false,
        }
    }

    pub const fn user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            is_admin: false,
        }
    }

    pub const fn admin(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            is_admin: true,
        }
    }

    /// Full access to a user record: the user themselves, or an admin.
    pub fn has_full_access(&self, target: UserId) -> bool {
        self.is_admin || self.user_id == Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::Id;

    #[test]
    fn test_has_full_access() {
        let target: UserId = Id::from_i64(5);

        assert!(Requester::user(target).has_full_access(target));
        assert!(Requester::admin(Id::from_i64(1)).has_full_access(target));
        assert!(!Requester::user(Id::from_i64(6)).has_full_access(target));
        assert!(!Requester::anonymous().has_full_access(target));
    }
}
