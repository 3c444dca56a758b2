use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::NativeTransfer;
use crate::amm::error::Result;
use crate::amm::error_map::{from_ledger_debit, to_error};
use crate::amm::guardrails::checked_add;
use crate::amm::types::{AccountId, Amount};

/// Saldos de valor nativo em memória.
#[derive(Debug, Default)]
pub struct NativeBank {
    balances: Mutex<HashMap<AccountId, Amount>>,
}

impl NativeBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credita saldo de gênese (setup de testes/demo).
    pub fn fund(&self, account: &AccountId, amount: Amount) -> Result<()> {
        let mut balances = self.balances.lock().unwrap_or_else(PoisonError::into_inner);
        let current = balances.get(account).copied().unwrap_or(0);
        balances.insert(account.clone(), checked_add(current, amount)?);
        Ok(())
    }
}

impl NativeTransfer for NativeBank {
    fn balance_of(&self, account: &AccountId) -> Amount {
        let balances = self.balances.lock().unwrap_or_else(PoisonError::into_inner);
        balances.get(account).copied().unwrap_or(0)
    }

    fn transfer(&self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<()> {
        let mut balances = self.balances.lock().unwrap_or_else(PoisonError::into_inner);
        let from_balance = balances.get(from).copied().unwrap_or(0);
        if let Some(code) = from_ledger_debit(amount, from_balance, None) {
            return Err(to_error(code).with_context("account", from).with_context("amount", amount));
        }
        if from == to {
            return Ok(());
        }
        let to_balance = checked_add(balances.get(to).copied().unwrap_or(0), amount)?;
        balances.insert(from.clone(), from_balance - amount);
        balances.insert(to.clone(), to_balance);
        Ok(())
    }
}
