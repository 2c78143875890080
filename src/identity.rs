//! Account identities and name-to-uid resolution.
//!
//! Resolution order: pinned accounts from configuration, then the system
//! account database, then a decimal uid given verbatim (as `id -u 1001` does).
//! Names are matched exactly; surrounding whitespace is rejected, not stripped.

use crate::error::LookupError;
use nix::unistd::User;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// An account name together with its numeric user identifier.
///
/// Identities compare by uid only; the name is what gets printed.
#[derive(Debug, Clone, Eq)]
pub struct Identity {
    pub name: String,
    pub uid: u32,
}

impl Identity {
    pub fn new(name: impl Into<String>, uid: u32) -> Self {
        Self {
            name: name.into(),
            uid,
        }
    }

    /// Whether this identity owns an entry with the given owner uid.
    pub fn owns(&self, uid: u32) -> bool {
        self.uid == uid
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.uid)
    }
}

/// Maps account names to identities
pub trait IdentityResolver {
    fn resolve(&self, account: &str) -> Result<Identity, LookupError>;
}

/// Resolver backed by the system account database (`getpwnam`).
#[derive(Debug, Clone, Default)]
pub struct SystemResolver {
    pinned: HashMap<String, u32>,
}

impl SystemResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver that consults `pinned` before the account database.
    pub fn with_pinned(pinned: HashMap<String, u32>) -> Self {
        Self { pinned }
    }
}

impl IdentityResolver for SystemResolver {
    fn resolve(&self, account: &str) -> Result<Identity, LookupError> {
        if account.is_empty() {
            return Err(LookupError::EmptyName);
        }
        if account.trim() != account {
            return Err(LookupError::PaddedName(account.to_string()));
        }

        if let Some(uid) = self.pinned.get(account) {
            debug!(account, uid, "Resolved pinned account");
            return Ok(Identity::new(account, *uid));
        }

        let user = User::from_name(account).map_err(|source| LookupError::Unavailable {
            account: account.to_string(),
            source,
        })?;
        if let Some(user) = user {
            let uid = user.uid.as_raw();
            debug!(account, uid, "Resolved account from system database");
            return Ok(Identity::new(account, uid));
        }

        match account.parse::<u32>() {
            Ok(uid) => {
                debug!(account, uid, "Account not in database, using numeric uid");
                Ok(Identity::new(account, uid))
            }
            Err(_) => Err(LookupError::UnknownAccount(account.to_string())),
        }
    }
}
