//! Owner plus single-slot administrator access control.
//!
//! Both the bridge and the token collaborator gate their mutating entry points
//! on this table. The owner is fixed at construction. The administrator slot
//! holds at most one account; granting it replaces the previous holder.

use std::fmt;

use alloy_primitives::{keccak256, Address, B256};
use tracing::info;

use crate::error::{BridgeError, Result};

/// Roles known to [`AccessControl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Deployer of the contract. Implicit superuser, never transferable.
    Owner,
    /// Delegated operator, grantable by the owner or the current administrator.
    Administrator,
}

impl Role {
    /// Returns the 32-byte role identifier, `keccak256` of the upper-case role
    /// name, as exposed by the EVM deployment's `administrator()` getter.
    pub fn id(self) -> B256 {
        keccak256(self.name().to_ascii_uppercase())
    }

    /// Looks up a role by its 32-byte identifier.
    pub fn from_id(id: B256) -> Option<Self> {
        [Self::Owner, Self::Administrator]
            .into_iter()
            .find(|role| role.id() == id)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Administrator => "administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessControl {
    owner: Address,
    administrator: Option<Address>,
}

impl AccessControl {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            administrator: None,
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn administrator(&self) -> Option<Address> {
        self.administrator
    }

    pub fn has_role(&self, role: Role, account: Address) -> bool {
        match role {
            Role::Owner => self.owner == account,
            Role::Administrator => self.administrator == Some(account),
        }
    }

    /// True for the owner and the current administrator.
    pub fn is_privileged(&self, account: Address) -> bool {
        self.has_role(Role::Owner, account) || self.has_role(Role::Administrator, account)
    }

    /// Guard used by every mutating bridge entry point.
    pub fn require_admin_or_owner(&self, account: Address) -> Result<()> {
        if self.is_privileged(account) {
            Ok(())
        } else {
            Err(BridgeError::Unauthorized { account })
        }
    }

    /// Grants `role` to `account` and returns the previous administrator.
    ///
    /// Only [`Role::Administrator`] is grantable; the owner slot is immutable.
    pub fn grant_role(
        &mut self,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<Option<Address>> {
        self.require_admin_or_owner(caller)?;
        if role == Role::Owner {
            return Err(BridgeError::RoleNotGrantable { role });
        }

        let previous = self.administrator.replace(account);

        info!(
            caller = %caller,
            account = %account,
            role = %role,
            previous = ?previous,
            event = "role_granted"
        );

        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const OWNER: Address = address!("00000000000000000000000000000000000000a1");
    const ADMIN: Address = address!("00000000000000000000000000000000000000a2");
    const OTHER: Address = address!("00000000000000000000000000000000000000a3");

    #[test]
    fn test_owner_is_privileged_without_grant() {
        let access = AccessControl::new(OWNER);
        assert!(access.has_role(Role::Owner, OWNER));
        assert!(access.require_admin_or_owner(OWNER).is_ok());
        assert_eq!(access.administrator(), None);
    }

    #[test]
    fn test_grant_replaces_previous_administrator() {
        let mut access = AccessControl::new(OWNER);
        assert_eq!(access.grant_role(OWNER, Role::Administrator, ADMIN).unwrap(), None);
        assert_eq!(
            access.grant_role(ADMIN, Role::Administrator, OTHER).unwrap(),
            Some(ADMIN)
        );

        assert!(access.has_role(Role::Administrator, OTHER));
        assert!(!access.has_role(Role::Administrator, ADMIN));
        assert!(access.require_admin_or_owner(ADMIN).is_err());
    }

    #[test]
    fn test_unprivileged_grant_leaves_state_unchanged() {
        let mut access = AccessControl::new(OWNER);
        access.grant_role(OWNER, Role::Administrator, ADMIN).unwrap();
        let before = access.clone();

        let err = access
            .grant_role(OTHER, Role::Administrator, OTHER)
            .unwrap_err();
        assert!(matches!(err, BridgeError::Unauthorized { account } if account == OTHER));
        assert_eq!(access, before);
    }

    #[test]
    fn test_owner_role_is_not_grantable() {
        let mut access = AccessControl::new(OWNER);
        let err = access.grant_role(OWNER, Role::Owner, OTHER).unwrap_err();
        assert!(matches!(err, BridgeError::RoleNotGrantable { role: Role::Owner }));
        assert!(access.has_role(Role::Owner, OWNER));
        assert!(!access.has_role(Role::Owner, OTHER));
    }

    #[test]
    fn test_role_ids_round_trip() {
        assert_ne!(Role::Owner.id(), Role::Administrator.id());
        assert_eq!(Role::from_id(Role::Administrator.id()), Some(Role::Administrator));
        assert_eq!(Role::from_id(B256::ZERO), None);
    }
}
