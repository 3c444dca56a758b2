//! Validações e helpers numéricos seguros para o pool.
//! Toda multiplicação seguida de divisão passa por U256; nada de clamp silencioso.

use super::error::Result;
use super::error_catalog::PoolErrorCode;
use super::types::{Amount, Bounds, PoolStatus, Reserves, U256};
use crate::pool_err;

#[inline]
pub fn ensure_nonzero(amount: Amount) -> Result<()> {
    if amount == 0 {
        return Err(pool_err!(PoolErrorCode::InvalidAmount, amount => amount));
    }
    Ok(())
}

#[inline]
pub fn ensure_active(status: PoolStatus) -> Result<()> {
    match status {
        PoolStatus::Active => Ok(()),
        PoolStatus::Uninitialized => Err(pool_err!(PoolErrorCode::NotInitialized)),
    }
}

/// Reservas precisam ser ambas positivas para haver preço.
#[inline]
pub fn ensure_reserves(reserves: Reserves) -> Result<()> {
    if reserves.base == 0 || reserves.token == 0 {
        return Err(pool_err!(
            PoolErrorCode::ZeroReserve,
            base => reserves.base,
            token => reserves.token,
        ));
    }
    Ok(())
}

/// `value` precisa estar dentro de `bounds`; `what` nomeia o valor no contexto.
#[inline]
pub fn ensure_within(value: Amount, bounds: Bounds, what: &str) -> Result<()> {
    if bounds.contains(value) {
        return Ok(());
    }
    let mut err = pool_err!(PoolErrorCode::SlippageExceeded, { what => value });
    if let Some(min) = bounds.min {
        err = err.with_context("min", min);
    }
    if let Some(max) = bounds.max {
        err = err.with_context("max", max);
    }
    Err(err)
}

#[inline]
pub fn checked_add(a: Amount, b: Amount) -> Result<Amount> {
    a.checked_add(b)
        .ok_or_else(|| pool_err!(PoolErrorCode::OverflowNumeric, op => "add"))
}

#[inline]
pub fn u256_to_amount(v: U256) -> Result<Amount> {
    if v > U256::from(u128::MAX) {
        return Err(pool_err!(PoolErrorCode::OverflowNumeric, op => "downcast"));
    }
    Ok(v.as_u128())
}

/// `floor(a * b / d)` com produto em 256 bits. `d == 0` é erro, nunca pânico.
pub fn mul_div_floor(a: Amount, b: Amount, d: Amount) -> Result<Amount> {
    if d == 0 {
        return Err(pool_err!(PoolErrorCode::OverflowNumeric, op => "div_zero"));
    }
    u256_to_amount((U256::from(a) * U256::from(b)) / U256::from(d))
}

/// Divisão com arredondamento *nearest (ties-to-even)*. Só para cotações de exibição.
pub fn div_nearest_even(n: U256, d: U256) -> Result<Amount> {
    if d.is_zero() {
        return Err(pool_err!(PoolErrorCode::OverflowNumeric, op => "div_zero"));
    }
    let (q, r) = n.div_mod(d);
    let two_r = r << 1;
    let one = U256::from(1u8);
    let q = if two_r > d || (two_r == d && (q & one) == one) { q + one } else { q };
    u256_to_amount(q)
}
