//! Auth data models.

/// Identity of the caller behind a verified bearer credential.
///
/// Derived per request; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Subject of the verified token.
    pub uid: String,

    /// Administrative capability, granting access to every order.
    pub is_admin: bool,
}

impl CallerIdentity {
    /// A regular caller.
    #[must_use]
    pub fn user(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            is_admin: false,
        }
    }

    /// A caller holding the admin capability.
    #[must_use]
    pub fn admin(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            is_admin: true,
        }
    }

    /// Whether this caller may act on a resource owned by `owner_uid`.
    #[must_use]
    pub fn may_act_for(&self, owner_uid: &str) -> bool {
        self.is_admin || self.uid == owner_uid
    }
}
