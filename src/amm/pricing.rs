//! Preços e cotações derivadas das reservas. Leituras puras: nunca falham,
//! lado com reserva zero cota 0 por convenção.

use super::error::Result;
use super::guardrails::{div_nearest_even, mul_div_floor};
use super::types::{Amount, Reserves, U256, WAD};

/// `floor(amount * numer / denom)`: regra de proporção usada em liquidez e swaps.
#[inline]
pub fn proportional(amount: Amount, numer: Amount, denom: Amount) -> Result<Amount> {
    mul_div_floor(amount, numer, denom)
}

// --------- Preços inteiros (getters públicos) ---------
/// Unidades de base por token: `floor(base / token)`.
pub fn price_token(r: Reserves) -> Amount {
    if r.token == 0 { 0 } else { r.base / r.token }
}

/// Unidades de token por base: `floor(token / base)`.
pub fn price_base(r: Reserves) -> Amount {
    if r.base == 0 { 0 } else { r.token / r.base }
}

// --------- Spot em WAD (exibição) ---------
/// `base/token` em WAD, nearest-even.
pub fn spot_price_token_wad(r: Reserves) -> Amount {
    if r.token == 0 {
        return 0;
    }
    div_nearest_even(U256::from(r.base) * U256::from(WAD), U256::from(r.token)).unwrap_or(Amount::MAX)
}

/// `token/base` em WAD, nearest-even.
pub fn spot_price_base_wad(r: Reserves) -> Amount {
    if r.base == 0 {
        return 0;
    }
    div_nearest_even(U256::from(r.token) * U256::from(WAD), U256::from(r.base)).unwrap_or(Amount::MAX)
}

// --------- k ---------
/// Desvio relativo `|k1 - k0| / k0`. Swaps lineares não preservam k; isto só mede.
pub fn k_drift_rel(before: Reserves, after: Reserves) -> f64 {
    let (k0, k1) = (before.k(), after.k());
    if k0.is_zero() {
        return 0.0;
    }
    let delta = if k1 >= k0 { k1 - k0 } else { k0 - k1 };
    u256_to_f64(delta) / u256_to_f64(k0)
}

fn u256_to_f64(v: U256) -> f64 {
    // 4 limbs little-endian
    v.0.iter().rev().fold(0.0, |acc, limb| acc * 18_446_744_073_709_551_616.0 + *limb as f64)
}
