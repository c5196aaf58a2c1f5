//! What the signed-in user is allowed to see, computed in one place.
//!
//! The server already filters every collection by permission; this module only
//! decides which empty-state copy to render and which panels to mount.

use api::User;

/// Coarse access tier derived from the user record.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AccessMode {
    Admin,
    Member,
}

impl AccessMode {
    pub fn for_user(user: &User) -> Self {
        if user.is_admin {
            AccessMode::Admin
        } else {
            AccessMode::Member
        }
    }
}

/// Admins see everything; members need at least one group grant.
pub fn has_any_access(user: &User) -> bool {
    user.is_admin || !user.permissions.is_empty()
}

/// Which empty-state to show over the recordings list, if any.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RecordingsPlaceholder {
    /// No grants at all. Takes precedence over list contents: a user whose
    /// grants were just revoked may still be holding a stale non-empty list.
    NoAccess,
    NoRecordings,
}

pub fn recordings_placeholder(
    user: &User,
    recording_count: usize,
) -> Option<RecordingsPlaceholder> {
    if !has_any_access(user) {
        return Some(RecordingsPlaceholder::NoAccess);
    }
    if recording_count == 0 {
        return Some(RecordingsPlaceholder::NoRecordings);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::Permission;

    fn member(permissions: Vec<Permission>) -> User {
        User {
            id: 7,
            username: "sam".into(),
            name: None,
            is_admin: false,
            permissions,
        }
    }

    fn grant(group: &str) -> Permission {
        Permission {
            id: 1,
            group_name: group.into(),
            can_edit: false,
        }
    }

    #[test]
    fn no_permissions_outranks_a_non_empty_list() {
        let user = member(vec![]);
        assert_eq!(
            recordings_placeholder(&user, 12),
            Some(RecordingsPlaceholder::NoAccess)
        );
    }

    #[test]
    fn granted_member_with_empty_list_sees_no_recordings() {
        let user = member(vec![grant("sales")]);
        assert_eq!(
            recordings_placeholder(&user, 0),
            Some(RecordingsPlaceholder::NoRecordings)
        );
        assert_eq!(recordings_placeholder(&user, 3), None);
    }

    #[test]
    fn admins_always_have_access() {
        let mut user = member(vec![]);
        user.is_admin = true;
        assert!(has_any_access(&user));
        assert_eq!(AccessMode::for_user(&user), AccessMode::Admin);
        assert_eq!(
            recordings_placeholder(&user, 0),
            Some(RecordingsPlaceholder::NoRecordings)
        );
    }
}
