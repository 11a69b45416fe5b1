//! The account entity
//!
//! Owns the configuration, the permission store and the pending audit log,
//! and is the only place decisions are committed. Calls are expected to be
//! serialized by the dispatcher; nothing here is shared across threads.

use crate::admin;
use crate::config::AuthorizationConfig;
use crate::engine::{Authorization, AuthorizationEngine, Decision};
use crate::error::AuthorizationResult;
use crate::events::OperatorMutated;
use crate::registry::{InMemoryPermissionStore, PermissionStore, RegistryEntry};
use crate::request::ExecutionRequest;
use permissive_core::{Address, Amount, Hash32, PermissiveResult};
use std::mem;

/// A programmable account that delegates scoped call rights to operators
#[derive(Debug)]
pub struct PermissiveAccount<S = InMemoryPermissionStore> {
    config: AuthorizationConfig,
    store: S,
    events: Vec<OperatorMutated>,
}

impl PermissiveAccount<InMemoryPermissionStore> {
    /// Account backed by an in-memory store.
    ///
    /// Fails if `config` does not validate.
    pub fn new(config: AuthorizationConfig) -> PermissiveResult<Self> {
        Self::with_store(config, InMemoryPermissionStore::new())
    }
}

impl<S: PermissionStore> PermissiveAccount<S> {
    /// Account backed by `store`
    pub fn with_store(config: AuthorizationConfig, store: S) -> PermissiveResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            store,
            events: Vec::new(),
        })
    }

    /// Replace `operator`'s permission root and budgets (owner only).
    pub fn set_operator_permissions(
        &mut self,
        caller: &Address,
        operator: Address,
        root: Hash32,
        fee_allowance: Amount,
        value_allowance: Amount,
    ) -> AuthorizationResult<OperatorMutated> {
        let change = admin::set_operator_permissions(
            &self.config.owner,
            &mut self.store,
            caller,
            operator,
            root,
            fee_allowance,
            value_allowance,
        )?;
        self.events.push(change);
        Ok(change)
    }

    /// Remove every permission and budget from `operator` (owner only).
    pub fn revoke_operator(
        &mut self,
        caller: &Address,
        operator: Address,
    ) -> AuthorizationResult<OperatorMutated> {
        self.set_operator_permissions(caller, operator, Hash32::ZERO, 0, 0)
    }

    /// Authorize `request` and commit its debit.
    ///
    /// On allow the post-debit entry is written once; on deny nothing is
    /// written and the reason is returned.
    pub fn execute(&mut self, request: &ExecutionRequest) -> AuthorizationResult<Authorization> {
        let decision = AuthorizationEngine::new(&self.config).authorize(request, &self.store);
        let authorization = match decision {
            Decision::Allow(authorization) => authorization,
            Decision::Deny(reason) => return Err(reason.into()),
        };
        if let Authorization::Operator(debit) = &authorization {
            self.store.put_entry(debit.operator, debit.entry)?;
        }
        Ok(authorization)
    }

    /// Current registry entry for `operator`
    pub fn operator_entry(&self, operator: &Address) -> RegistryEntry {
        self.store.entry(operator)
    }

    /// Take the audit records accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<OperatorMutated> {
        mem::take(&mut self.events)
    }

    /// Active configuration
    pub fn config(&self) -> &AuthorizationConfig {
        &self.config
    }

    /// The owning principal
    pub fn owner(&self) -> &Address {
        &self.config.owner
    }
}
