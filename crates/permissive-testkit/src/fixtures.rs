//! Permission set fixtures
//!
//! The sample set matches the one used to exercise deployed accounts: three
//! unsponsored grants on one token contract, all expiring at the same time.

use permissive_authorization::{AuthorizationConfig, PermissiveAccount};
use permissive_core::{Address, Amount, Hash32, MerkleProof, Permission, PermissionTree, Selector};

/// Contract every sample permission targets
pub const SAMPLE_TARGET: &str = "0x0576a174d229e3cfa37253523e645a78a0c91b57";

/// Wall-clock expiry shared by the sample permissions
pub const SAMPLE_EXPIRY: u64 = 1_709_933_133;

/// 0.5 units at 18 decimals, the default sample budget
pub const HALF_ETHER: Amount = 500_000_000_000_000_000;

/// Parsed [`SAMPLE_TARGET`]
pub fn sample_target() -> Address {
    SAMPLE_TARGET.parse().unwrap()
}

/// ERC-20 transfer, ERC-721 transfer and a Uniswap swap on the sample target
pub fn permissions_sample(operator: Address) -> Vec<Permission> {
    ["0xa9059cbb", "0xab790ba3", "0x022c0d9f"]
        .into_iter()
        .map(|selector| Permission {
            operator,
            target: sample_target(),
            selector: selector.parse::<Selector>().unwrap(),
            paymaster: Address::ZERO,
            expires_at_time: SAMPLE_EXPIRY,
            expires_at_height: 0,
        })
        .collect()
}

/// A permission set together with its materialized tree
#[derive(Debug, Clone)]
pub struct PermissionSetFixture {
    /// Operator all permissions belong to
    pub operator: Address,
    /// Permissions in insertion order
    pub permissions: Vec<Permission>,
    tree: PermissionTree,
}

impl PermissionSetFixture {
    /// Build a tree over `permissions`
    pub fn new(operator: Address, permissions: Vec<Permission>) -> Self {
        let tree = PermissionTree::from_permissions(&permissions);
        Self {
            operator,
            permissions,
            tree,
        }
    }

    /// The three-permission sample set for `operator`
    pub fn sample(operator: Address) -> Self {
        Self::new(operator, permissions_sample(operator))
    }

    /// Committed root
    pub fn root(&self) -> Hash32 {
        self.tree.root()
    }

    /// Permission at `index` in insertion order
    pub fn permission(&self, index: usize) -> Permission {
        self.permissions[index]
    }

    /// Proof for a member permission
    pub fn proof(&self, permission: &Permission) -> MerkleProof {
        self.tree
            .proof_for(permission)
            .expect("permission is not a member of the fixture set")
    }

    /// Account owned by `owner` with this set granted at the given budgets
    pub fn account(
        &self,
        owner: Address,
        fee_allowance: Amount,
        value_allowance: Amount,
    ) -> PermissiveAccount {
        let mut account = PermissiveAccount::new(AuthorizationConfig::new(owner)).unwrap();
        account
            .set_operator_permissions(
                &owner,
                self.operator,
                self.root(),
                fee_allowance,
                value_allowance,
            )
            .unwrap();
        account.drain_events();
        account
    }

    /// Account granted the sample budgets of [`HALF_ETHER`] each
    pub fn sample_account(&self, owner: Address) -> PermissiveAccount {
        self.account(owner, HALF_ETHER, HALF_ETHER)
    }
}
