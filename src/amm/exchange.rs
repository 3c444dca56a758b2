//! Pool + swap engine sobre um único estado compartilhado.
//!
//! Toda operação pública segura o lock do [`PoolState`] do começo ao fim, então
//! nenhuma outra operação observa estado parcial. Ordem fixa em cada operação:
//!
//! 1. planejar e validar (funções puras de `liquidity`/`swap`);
//! 2. pré-checar saldos e allowances de todas as pernas no ledger;
//! 3. mover os ativos (perna que falhar desfaz as anteriores);
//! 4. aplicar o plano ao estado (infalível).
//!
//! Erro em qualquer passo deixa reservas, shares e saldos como estavam.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{error, info, info_span, warn};

use super::error::Result;
use super::error_map::{from_ledger_debit, to_error};
use super::guardrails::{checked_add, ensure_active};
use super::liquidity::{plan_add, plan_create, plan_remove};
use super::pool::PoolState;
use super::pricing::{self, k_drift_rel};
use super::swap::{plan_swap, Direction};
use super::types::{
    AccountId, Amount, Bounds, LiquidityReceipt, PoolSnapshot, PoolStatus, Reserves, SwapReceipt, U256,
};
use super::error_catalog::PoolErrorCode;
use crate::ledger::{AssetLedger, NativeTransfer};
use crate::obs::wrap;
use crate::pool_bail;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Asset {
    Base,
    Token,
}

impl Asset {
    const fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Token => "token",
        }
    }
}

/// Uma perna de liquidação: `Pull` entra no pool vindo do chamador, `Push` sai.
#[derive(Clone, Copy, Debug)]
enum Leg {
    Pull(Asset, Amount),
    Push(Asset, Amount),
}

impl Leg {
    fn amount(&self) -> Amount {
        match *self {
            Leg::Pull(_, a) | Leg::Push(_, a) => a,
        }
    }
}

/// Exchange base ↔ token com ledger de shares.
pub struct Exchange<L, N> {
    address: AccountId,
    tokens: L,
    native: N,
    state: Mutex<PoolState>,
}

impl<L: AssetLedger, N: NativeTransfer> Exchange<L, N> {
    /// `address` é a conta do próprio pool nos ledgers; `admin` fica fixo para sempre.
    pub fn new(address: AccountId, admin: AccountId, tokens: L, native: N) -> Self {
        Self {
            address,
            tokens,
            native,
            state: Mutex::new(PoolState::new(admin)),
        }
    }

    fn state(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serializa `f` sob o lock, mede e registra o desfecho.
    fn run<T, F>(&self, op: &'static str, caller: &AccountId, f: F) -> Result<T>
    where
        T: core::fmt::Debug,
        F: FnOnce(&mut PoolState) -> Result<T>,
    {
        let span = info_span!(target: "exchange", "pool_op", op, caller = %caller);
        let _guard = span.enter();
        wrap::time(op, || {
            let mut state = self.state();
            let out = f(&mut *state);
            let r = state.reserves();
            match &out {
                Ok(receipt) => info!(target: "exchange", ?receipt, base = r.base, token = r.token, "ok"),
                Err(err) => {
                    warn!(target: "exchange", code = %err.code, error = %err, "rejeitada");
                    wrap::record_rejection(op, err.code);
                }
            }
            debug_assert!(state.reserves_consistent(), "reservas inconsistentes: {:?}", r);
            out
        })
    }

    // -------------------------
    // Liquidação nos ledgers
    // -------------------------

    fn precheck(&self, caller: &AccountId, leg: Leg) -> Result<()> {
        let (asset, amount, code) = match leg {
            Leg::Pull(Asset::Base, a) => (Asset::Base, a, from_ledger_debit(a, self.native.balance_of(caller), None)),
            Leg::Pull(Asset::Token, a) => (
                Asset::Token,
                a,
                from_ledger_debit(
                    a,
                    self.tokens.balance_of(caller),
                    Some(self.tokens.allowance(caller, &self.address)),
                ),
            ),
            Leg::Push(Asset::Base, a) => (Asset::Base, a, from_ledger_debit(a, self.native.balance_of(&self.address), None)),
            Leg::Push(Asset::Token, a) => (Asset::Token, a, from_ledger_debit(a, self.tokens.balance_of(&self.address), None)),
        };
        match code {
            None => Ok(()),
            Some(code) => Err(to_error(code)
                .with_context("asset", asset.as_str())
                .with_context("amount", amount)),
        }
    }

    fn execute(&self, caller: &AccountId, leg: Leg) -> Result<()> {
        match leg {
            Leg::Pull(Asset::Base, a) => self.native.transfer(caller, &self.address, a),
            Leg::Pull(Asset::Token, a) => self.tokens.transfer_from(caller, &self.address, a),
            Leg::Push(Asset::Base, a) => self.native.transfer(&self.address, caller, a),
            Leg::Push(Asset::Token, a) => self.tokens.transfer(&self.address, caller, a),
        }
    }

    /// Desfaz uma perna já executada. `Pull(Token)` (o único `transfer_from`) é
    /// sempre a última perna, então nunca precisa ser desfeita.
    fn revert(&self, caller: &AccountId, leg: Leg) {
        let res = match leg {
            Leg::Pull(Asset::Base, a) => self.native.transfer(&self.address, caller, a),
            Leg::Pull(Asset::Token, a) => self.tokens.transfer(&self.address, caller, a),
            Leg::Push(Asset::Base, a) => self.native.transfer(caller, &self.address, a),
            Leg::Push(Asset::Token, a) => self.tokens.transfer(caller, &self.address, a),
        };
        if let Err(err) = res {
            error!(target: "exchange", ?leg, %caller, error = %err, "falha ao desfazer perna");
        }
    }

    /// Tudo ou nada: pré-checa todas as pernas, executa em ordem, desfaz em ordem inversa.
    /// `Pull(Token)` vai por último: allowance consumida não tem como voltar.
    fn settle(&self, caller: &AccountId, legs: &[Leg]) -> Result<()> {
        let legs: Vec<Leg> = legs.iter().copied().filter(|l| l.amount() > 0).collect();
        for leg in &legs {
            self.precheck(caller, *leg)?;
        }
        for (i, leg) in legs.iter().enumerate() {
            if let Err(err) = self.execute(caller, *leg) {
                for done in legs[..i].iter().rev() {
                    self.revert(caller, *done);
                }
                return Err(err);
            }
        }
        Ok(())
    }

    // -------------------------
    // Liquidez
    // -------------------------

    /// Semente única do pool, só pelo admin. `base_amount` é o valor nativo anexado.
    pub fn create_pool(&self, caller: &AccountId, token_amount: Amount, base_amount: Amount) -> Result<LiquidityReceipt> {
        self.run("create_pool", caller, |st| {
            if caller != st.admin() {
                pool_bail!(PoolErrorCode::Unauthorized, caller => caller);
            }
            if st.status() == PoolStatus::Active {
                pool_bail!(PoolErrorCode::AlreadyInitialized);
            }
            let plan = plan_create(token_amount, base_amount)?;
            let share = checked_add(st.share_of(caller), plan.base_in)?;
            self.settle(caller, &[Leg::Pull(Asset::Base, plan.base_in), Leg::Pull(Asset::Token, plan.token_in)])?;
            st.commit_deposit(caller, &plan, share);
            st.activate();
            Ok(LiquidityReceipt { base: plan.base_in, token: plan.token_in, share })
        })
    }

    /// Deposita `base_amount` (payable) mais o token proporcional às reservas atuais.
    pub fn add_liquidity(&self, caller: &AccountId, base_amount: Amount, bounds: Bounds) -> Result<LiquidityReceipt> {
        self.run("add_liquidity", caller, |st| {
            ensure_active(st.status())?;
            let plan = plan_add(st.reserves(), base_amount, bounds)?;
            let share = checked_add(st.share_of(caller), plan.base_in)?;
            self.settle(caller, &[Leg::Pull(Asset::Base, plan.base_in), Leg::Pull(Asset::Token, plan.token_in)])?;
            st.commit_deposit(caller, &plan, share);
            Ok(LiquidityReceipt { base: plan.base_in, token: plan.token_in, share })
        })
    }

    /// Retira `base_amount` da share do chamador e o token proporcional.
    pub fn remove_liquidity(&self, caller: &AccountId, base_amount: Amount, bounds: Bounds) -> Result<LiquidityReceipt> {
        self.run("remove_liquidity", caller, |st| self.withdraw(st, caller, base_amount, bounds))
    }

    /// Retira toda a share do chamador, sem limites de slippage.
    pub fn remove_all_liquidity(&self, caller: &AccountId) -> Result<LiquidityReceipt> {
        self.run("remove_all_liquidity", caller, |st| {
            let share = st.share_of(caller);
            self.withdraw(st, caller, share, Bounds::ANY)
        })
    }

    fn withdraw(&self, st: &mut PoolState, caller: &AccountId, base_amount: Amount, bounds: Bounds) -> Result<LiquidityReceipt> {
        ensure_active(st.status())?;
        let share = st.share_of(caller);
        let plan = plan_remove(st.reserves(), share, base_amount, bounds)?;
        let share = share - plan.base_out;
        self.settle(caller, &[Leg::Push(Asset::Token, plan.token_out), Leg::Push(Asset::Base, plan.base_out)])?;
        st.commit_withdraw(caller, &plan, share);
        Ok(LiquidityReceipt { base: plan.base_out, token: plan.token_out, share })
    }

    // -------------------------
    // Swaps
    // -------------------------

    /// Vende `tokens_in` por base ao preço spot atual.
    pub fn swap_token_for_base(&self, caller: &AccountId, tokens_in: Amount, min_base_out: Option<Amount>) -> Result<SwapReceipt> {
        self.swap(caller, tokens_in, min_base_out, Direction::TokenForBase)
    }

    /// Compra token com `base_in` (payable) ao preço spot atual.
    pub fn swap_base_for_token(&self, caller: &AccountId, base_in: Amount, min_token_out: Option<Amount>) -> Result<SwapReceipt> {
        self.swap(caller, base_in, min_token_out, Direction::BaseForToken)
    }

    fn swap(&self, caller: &AccountId, amount_in: Amount, min_out: Option<Amount>, dir: Direction) -> Result<SwapReceipt> {
        let op = dir.as_str();
        self.run(op, caller, |st| {
            ensure_active(st.status())?;
            let before = st.reserves();
            let plan = plan_swap(before, amount_in, min_out, dir)?;
            let legs = match dir {
                Direction::TokenForBase => [Leg::Push(Asset::Base, plan.amount_out), Leg::Pull(Asset::Token, plan.amount_in)],
                Direction::BaseForToken => [Leg::Pull(Asset::Base, plan.amount_in), Leg::Push(Asset::Token, plan.amount_out)],
            };
            self.settle(caller, &legs)?;
            st.commit_swap(&plan);
            wrap::record_k_drift(op, k_drift_rel(before, plan.reserves_after));
            Ok(SwapReceipt {
                amount_in: plan.amount_in,
                amount_out: plan.amount_out,
                reserves: plan.reserves_after,
            })
        })
    }

    // -------------------------
    // Leituras (puras)
    // -------------------------

    pub fn address(&self) -> &AccountId {
        &self.address
    }

    pub fn admin(&self) -> AccountId {
        self.state().admin().clone()
    }

    pub fn status(&self) -> PoolStatus {
        self.state().status()
    }

    pub fn reserves(&self) -> Reserves {
        self.state().reserves()
    }

    pub fn token_reserves(&self) -> Amount {
        self.reserves().token
    }

    /// Reserva do ativo base (nativo).
    pub fn base_reserves(&self) -> Amount {
        self.reserves().base
    }

    pub fn k(&self) -> U256 {
        self.reserves().k()
    }

    /// Share registrada da conta, em unidades de base.
    pub fn balance_of_pool(&self, account: &AccountId) -> Amount {
        self.state().share_of(account)
    }

    pub fn total_shares(&self) -> Amount {
        self.state().total_shares()
    }

    /// Base por token, inteiro; 0 com reserva de token zerada.
    pub fn price_token(&self) -> Amount {
        pricing::price_token(self.reserves())
    }

    /// Token por base, inteiro; 0 com reserva base zerada.
    pub fn price_base(&self) -> Amount {
        pricing::price_base(self.reserves())
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        self.state().snapshot()
    }
}
