//! Requester Identity
//!
//! What the HTTP layer learned from the bearer token, reduced to the
//! two facts the use cases care about: who is asking, and whether they
//! hold the admin role.

use kernel::id::UserId;

/// Identity of the requesting user, as established by the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub user_id: Option<UserId>,
    pub is_admin: bool,
}

impl Access {
    /// No token, or an invalid one.
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

    /// Full access to a creator's puzzles: the creator themselves, or
    /// an admin.
    pub fn can_manage(&self, creator_id: UserId) -> bool {
        self.is_admin || self.user_id == Some(creator_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::Id;

    #[test]
    fn test_can_manage() {
        let creator: UserId = Id::from_i64(5);

        assert!(Access::user(creator).can_manage(creator));
        assert!(Access::admin(Id::from_i64(99)).can_manage(creator));
        assert!(!Access::user(Id::from_i64(6)).can_manage(creator));
        assert!(!Access::anonymous().can_manage(creator));
    }
}
