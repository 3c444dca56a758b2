//! Liquidez: criação, add e remove. Funções puras que só planejam.
//! Políticas:
//! - token exigido/devolvido: **floor** de `base * token / base_reserve`
//! - share é denominada em unidades de base contribuídas
//! - resultado zero por arredondamento é aceito (sem erro especial)
//!
//! Nada aqui toca estado: o `Exchange` aplica o plano só depois que as
//! transferências no ledger deram certo.

use super::error::Result;
use super::error_catalog::PoolErrorCode;
use super::guardrails::{checked_add, ensure_nonzero, ensure_reserves, ensure_within};
use super::pricing::proportional;
use super::types::{Amount, Bounds, Reserves};
use crate::pool_err;

/// Deltas de um depósito (create ou add).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositPlan {
    pub base_in: Amount,
    pub token_in: Amount,
    pub reserves_after: Reserves,
}

/// Deltas de uma retirada.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawPlan {
    pub base_out: Amount,
    pub token_out: Amount,
    pub reserves_after: Reserves,
}

/// Semente do pool: reservas passam a ser exatamente os valores fornecidos.
pub fn plan_create(token_amount: Amount, base_amount: Amount) -> Result<DepositPlan> {
    ensure_nonzero(token_amount)?;
    ensure_nonzero(base_amount)?;
    Ok(DepositPlan {
        base_in: base_amount,
        token_in: token_amount,
        reserves_after: Reserves::new(base_amount, token_amount),
    })
}

/// Add proporcional: `token_in = floor(base_in * token / base)`.
pub fn plan_add(reserves: Reserves, base_in: Amount, bounds: Bounds) -> Result<DepositPlan> {
    ensure_nonzero(base_in)?;
    ensure_reserves(reserves)?;
    let token_in = proportional(base_in, reserves.token, reserves.base)?;
    ensure_within(token_in, bounds, "token_in")?;
    let reserves_after = Reserves::new(
        checked_add(reserves.base, base_in)?,
        checked_add(reserves.token, token_in)?,
    );
    Ok(DepositPlan { base_in, token_in, reserves_after })
}

/// Remove proporcional limitado à share **da própria conta**.
/// `token_out = floor(base_out * token / base)`; retirar toda a reserva base zera as duas.
pub fn plan_remove(
    reserves: Reserves,
    share: Amount,
    base_out: Amount,
    bounds: Bounds,
) -> Result<WithdrawPlan> {
    ensure_nonzero(base_out)?;
    if base_out > share {
        return Err(pool_err!(
            PoolErrorCode::InsufficientShare,
            requested => base_out,
            share => share,
        ));
    }
    // swaps token→base podem deixar a reserva base abaixo da soma das shares
    if base_out > reserves.base {
        return Err(pool_err!(
            PoolErrorCode::SupplyExhausted,
            requested => base_out,
            base_reserve => reserves.base,
        ));
    }
    let token_out = proportional(base_out, reserves.token, reserves.base)?;
    ensure_within(token_out, bounds, "token_out")?;
    // base_out <= base e token_out <= token por construção
    let reserves_after = Reserves::new(reserves.base - base_out, reserves.token - token_out);
    Ok(WithdrawPlan { base_out, token_out, reserves_after })
}
