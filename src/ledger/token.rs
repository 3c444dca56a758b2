//! Ledger fungível em memória: saldos, allowances, mint restrito ao admin.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::AssetLedger;
use crate::amm::error::Result;
use crate::amm::error_catalog::PoolErrorCode;
use crate::amm::error_map::{from_ledger_debit, to_error};
use crate::amm::guardrails::checked_add;
use crate::amm::types::{AccountId, Amount};
use crate::pool_err;

#[derive(Debug, Default)]
struct Book {
    balances: HashMap<AccountId, Amount>,
    allowances: HashMap<(AccountId, AccountId), Amount>,
    total_supply: Amount,
    mint_disabled: bool,
}

impl Book {
    fn balance(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Valida tudo antes de mexer em qualquer saldo.
    fn move_funds(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<()> {
        let from_balance = self.balance(from);
        if let Some(code) = from_ledger_debit(amount, from_balance, None) {
            return Err(to_error(code).with_context("account", from).with_context("amount", amount));
        }
        if from == to {
            return Ok(());
        }
        let to_balance = checked_add(self.balance(to), amount)?;
        self.balances.insert(from.clone(), from_balance - amount);
        self.balances.insert(to.clone(), to_balance);
        Ok(())
    }
}

/// Ledger do token. Sincronizado internamente; compartilhe via `Arc`.
#[derive(Debug)]
pub struct TokenLedger {
    name: String,
    symbol: String,
    admin: AccountId,
    book: Mutex<Book>,
}

impl TokenLedger {
    pub fn new(admin: AccountId, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            admin,
            book: Mutex::new(Book::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn admin(&self) -> &AccountId {
        &self.admin
    }

    fn book(&self) -> MutexGuard<'_, Book> {
        self.book.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_admin(&self, caller: &AccountId) -> Result<()> {
        if caller != &self.admin {
            return Err(pool_err!(PoolErrorCode::Unauthorized, caller => caller));
        }
        Ok(())
    }

    /// Emite `amount` para o admin. Só o admin, e só enquanto o mint estiver ativo.
    pub fn mint(&self, caller: &AccountId, amount: Amount) -> Result<()> {
        self.ensure_admin(caller)?;
        let mut book = self.book();
        if book.mint_disabled {
            return Err(pool_err!(PoolErrorCode::MintDisabled));
        }
        let supply = checked_add(book.total_supply, amount)?;
        let balance = checked_add(book.balance(caller), amount)?;
        book.total_supply = supply;
        book.balances.insert(caller.clone(), balance);
        debug!(target: "ledger", symbol = %self.symbol, %caller, amount, "mint");
        Ok(())
    }

    /// Desliga o mint de forma permanente.
    pub fn disable_mint(&self, caller: &AccountId) -> Result<()> {
        self.ensure_admin(caller)?;
        self.book().mint_disabled = true;
        debug!(target: "ledger", symbol = %self.symbol, "mint desabilitado");
        Ok(())
    }

    pub fn mint_enabled(&self) -> bool {
        !self.book().mint_disabled
    }

    pub fn total_supply(&self) -> Amount {
        self.book().total_supply
    }

    /// Define (sobrescreve) a allowance de `spender` sobre os fundos de `owner`.
    pub fn approve(&self, owner: &AccountId, spender: &AccountId, amount: Amount) {
        self.book()
            .allowances
            .insert((owner.clone(), spender.clone()), amount);
    }
}

impl AssetLedger for TokenLedger {
    fn balance_of(&self, account: &AccountId) -> Amount {
        self.book().balance(account)
    }

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.book()
            .allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(&self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<()> {
        self.book().move_funds(from, to, amount)
    }

    fn transfer_from(&self, owner: &AccountId, spender: &AccountId, amount: Amount) -> Result<()> {
        let mut book = self.book();
        let key = (owner.clone(), spender.clone());
        let allowance = book.allowances.get(&key).copied().unwrap_or(0);
        if let Some(code) = from_ledger_debit(amount, book.balance(owner), Some(allowance)) {
            return Err(to_error(code)
                .with_context("owner", owner)
                .with_context("spender", spender)
                .with_context("amount", amount));
        }
        book.move_funds(owner, spender, amount)?;
        book.allowances.insert(key, allowance - amount);
        Ok(())
    }
}
