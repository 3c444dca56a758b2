//! Estado agregado do pool: status, admin, reservas e ledger de shares.
//! Só o `Exchange` tem acesso mutável, e só depois de validar tudo.

use std::collections::BTreeMap;

use super::liquidity::{DepositPlan, WithdrawPlan};
use super::swap::SwapPlan;
use super::types::{AccountId, Amount, PoolSnapshot, PoolStatus, Reserves};

#[derive(Debug, Clone)]
pub struct PoolState {
    status: PoolStatus,
    admin: AccountId,
    reserves: Reserves,
    shares: BTreeMap<AccountId, Amount>,
}

impl PoolState {
    pub fn new(admin: AccountId) -> Self {
        Self {
            status: PoolStatus::Uninitialized,
            admin,
            reserves: Reserves::default(),
            shares: BTreeMap::new(),
        }
    }

    pub fn status(&self) -> PoolStatus {
        self.status
    }

    pub fn admin(&self) -> &AccountId {
        &self.admin
    }

    pub fn reserves(&self) -> Reserves {
        self.reserves
    }

    pub fn share_of(&self, account: &AccountId) -> Amount {
        self.shares.get(account).copied().unwrap_or(0)
    }

    pub fn total_shares(&self) -> Amount {
        self.shares.values().sum()
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            status: self.status,
            admin: self.admin.clone(),
            reserves: self.reserves,
            total_shares: self.total_shares(),
        }
    }

    // -------- commits (infalíveis; planos já validados) --------

    pub(crate) fn activate(&mut self) {
        self.status = PoolStatus::Active;
    }

    /// `share_after` já vem checado pelo chamador.
    pub(crate) fn commit_deposit(&mut self, account: &AccountId, plan: &DepositPlan, share_after: Amount) {
        self.reserves = plan.reserves_after;
        self.shares.insert(account.clone(), share_after);
    }

    pub(crate) fn commit_withdraw(&mut self, account: &AccountId, plan: &WithdrawPlan, share_after: Amount) {
        self.reserves = plan.reserves_after;
        self.shares.insert(account.clone(), share_after);
    }

    /// Swaps não tocam shares.
    pub(crate) fn commit_swap(&mut self, plan: &SwapPlan) {
        self.reserves = plan.reserves_after;
    }

    /// Reservas conjuntamente zero ou positivas.
    pub fn reserves_consistent(&self) -> bool {
        (self.reserves.base == 0) == (self.reserves.token == 0)
    }
}
