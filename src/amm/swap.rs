//! Cotação dos swaps a preço spot **linear** (não é curva x·y=k):
//! `out = floor(amount_in * reserva_entrada / reserva_saída)`, sem taxa.
//! `k` deriva após cada trade; isso é esperado.

use super::error::Result;
use super::error_map::{from_swap_inputs, from_swap_output};
use super::guardrails::{checked_add, ensure_within};
use super::pricing::proportional;
use super::types::{Amount, Bounds, Reserves};
use crate::pool_err;

/// Direção do swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    TokenForBase,
    BaseForToken,
}

impl Direction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TokenForBase => "swap_token_for_base",
            Self::BaseForToken => "swap_base_for_token",
        }
    }

    /// (reserva de entrada, reserva de saída)
    pub(crate) fn sides(&self, r: Reserves) -> (Amount, Amount) {
        match self {
            Self::TokenForBase => (r.token, r.base),
            Self::BaseForToken => (r.base, r.token),
        }
    }
}

/// Resultado planejado de um swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapPlan {
    pub amount_in: Amount,
    pub amount_out: Amount,
    pub reserves_after: Reserves,
}

/// Quantidade de saída sem checar slippage. Falha em entrada zero, pool
/// drenado ou quando a saída esgotaria o lado de saída (`out >= reserva`).
pub fn get_amount_out(reserves: Reserves, amount_in: Amount, dir: Direction) -> Result<Amount> {
    let (reserve_in, reserve_out) = dir.sides(reserves);
    if let Some(code) = from_swap_inputs(amount_in, (reserve_in, reserve_out)) {
        return Err(pool_err!(code, amount_in => amount_in, reserve_in => reserve_in, reserve_out => reserve_out));
    }
    let out = proportional(amount_in, reserve_in, reserve_out)?;
    if let Some(code) = from_swap_output(out, reserve_out) {
        return Err(pool_err!(code, amount_out => out, reserve_out => reserve_out));
    }
    Ok(out)
}

/// Planeja o swap completo: cotação, limite mínimo de saída e reservas finais.
pub fn plan_swap(reserves: Reserves, amount_in: Amount, min_out: Option<Amount>, dir: Direction) -> Result<SwapPlan> {
    let amount_out = get_amount_out(reserves, amount_in, dir)?;
    let bounds = min_out.map_or(Bounds::ANY, Bounds::at_least);
    ensure_within(amount_out, bounds, "amount_out")?;
    // amount_out < reserva de saída (checado acima)
    let reserves_after = match dir {
        Direction::TokenForBase => Reserves::new(reserves.base - amount_out, checked_add(reserves.token, amount_in)?),
        Direction::BaseForToken => Reserves::new(checked_add(reserves.base, amount_in)?, reserves.token - amount_out),
    };
    Ok(SwapPlan { amount_in, amount_out, reserves_after })
}
