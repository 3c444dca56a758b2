//! Colaboradores externos do pool: o ledger do token fungível e o primitivo
//! de transferência do valor nativo (base). O pool só conhece estas traits.

use std::sync::Arc;

use crate::amm::error::Result;
use crate::amm::types::{AccountId, Amount};

mod native;
mod token;

pub use native::NativeBank;
pub use token::TokenLedger;

/// Superfície do ledger do token consumida pelo pool.
pub trait AssetLedger: Send + Sync {
    fn balance_of(&self, account: &AccountId) -> Amount;

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount;

    /// Move `amount` de `from` para `to` (saída de fundos do próprio pool).
    fn transfer(&self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<()>;

    /// `spender` puxa `amount` de `owner` para si, consumindo allowance.
    /// Falha com `InsufficientAllowance` ou `InsufficientBalance`.
    fn transfer_from(&self, owner: &AccountId, spender: &AccountId, amount: Amount) -> Result<()>;
}

/// Débito/crédito atômico de valor nativo.
pub trait NativeTransfer: Send + Sync {
    fn balance_of(&self, account: &AccountId) -> Amount;

    fn transfer(&self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<()>;
}

impl<T: AssetLedger + ?Sized> AssetLedger for Arc<T> {
    fn balance_of(&self, account: &AccountId) -> Amount {
        (**self).balance_of(account)
    }

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        (**self).allowance(owner, spender)
    }

    fn transfer(&self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<()> {
        (**self).transfer(from, to, amount)
    }

    fn transfer_from(&self, owner: &AccountId, spender: &AccountId, amount: Amount) -> Result<()> {
        (**self).transfer_from(owner, spender, amount)
    }
}

impl<T: NativeTransfer + ?Sized> NativeTransfer for Arc<T> {
    fn balance_of(&self, account: &AccountId) -> Amount {
        (**self).balance_of(account)
    }

    fn transfer(&self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<()> {
        (**self).transfer(from, to, amount)
    }
}
