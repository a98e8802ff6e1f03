// src/contracts/access_control.rs
//! Single-authority access control.

use crate::error::{RegistryError, RegistryResult};
use ethers_core::types::Address;

/// Holds the one address allowed to issue and revoke credentials.
///
/// The authority is fixed when the registry is created and cannot be
/// reassigned afterwards.
#[derive(Debug, Clone, Copy)]
pub struct AccessControl {
    authority: Address,
}

impl AccessControl {
    pub fn new(authority: Address) -> Self {
        AccessControl { authority }
    }

    pub fn authority(&self) -> Address {
        self.authority
    }

    /// Succeeds silently when `caller` is the authority.
    ///
    /// # Errors
    /// `Unauthorized` for any other caller.
    pub fn require_authority(&self, caller: Address) -> RegistryResult<()> {
        if caller == self.authority {
            Ok(())
        } else {
            log::warn!("rejected privileged call from {:?}", caller);
            Err(RegistryError::Unauthorized { caller })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_authority() {
        let university = Address::from_low_u64_be(1);
        let attacker = Address::from_low_u64_be(2);
        let guard = AccessControl::new(university);

        assert_eq!(guard.authority(), university);
        assert!(guard.require_authority(university).is_ok());
        assert_eq!(
            guard.require_authority(attacker),
            Err(RegistryError::Unauthorized { caller: attacker })
        );
    }
}
