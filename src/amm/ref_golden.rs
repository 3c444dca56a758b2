//! Referência de alta precisão ("goldens") baseada em **BigInt/BigRational**
//! para as cotações lineares do pool e para a regra de proporção da liquidez.
//!
//! 1. Calcula o resultado **exato** (racional, sem quantização).
//! 2. Reproduz a política de arredondamento do core (floor) em BigUint, como
//!    oráculo independente da aritmética U256.
//! 3. Mede `|Δk/k|` do core, exato.
//!
//! Não entra no caminho de produção; serve para testes e benches.

use super::error::Result;
use super::error_catalog::PoolErrorCode;
use super::error_map::{from_swap_inputs, from_swap_output};
use super::swap::{self, Direction};
use super::types::{Amount, Reserves};
use crate::pool_err;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

#[inline]
fn bu(v: Amount) -> BigUint {
    BigUint::from(v)
}

#[inline]
fn q(n: &BigUint, d: &BigUint) -> BigRational {
    BigRational::new(BigInt::from(n.clone()), BigInt::from(d.clone()))
}

fn to_amount(v: &BigUint) -> Result<Amount> {
    v.to_u128()
        .ok_or_else(|| pool_err!(PoolErrorCode::OverflowNumeric, value => v))
}

fn check_inputs(r: Reserves, amount_in: Amount, dir: Direction) -> Result<(Amount, Amount)> {
    let (r_in, r_out) = dir.sides(r);
    match from_swap_inputs(amount_in, (r_in, r_out)) {
        Some(code) => Err(pool_err!(code)),
        None => Ok((r_in, r_out)),
    }
}

// -------------------------
// Exato
// -------------------------
/// `amount_in * reserva_entrada / reserva_saída` sem quantização.
pub fn exact_out(r: Reserves, amount_in: Amount, dir: Direction) -> Result<BigRational> {
    let (r_in, r_out) = check_inputs(r, amount_in, dir)?;
    Ok(q(&(bu(amount_in) * bu(r_in)), &bu(r_out)))
}

// -------------------------
// Política (floor em BigUint)
// -------------------------
/// Mesma cotação do core: floor, com esgotamento quando `out >= reserva_saída`.
pub fn policy_out(r: Reserves, amount_in: Amount, dir: Direction) -> Result<Amount> {
    let (r_in, r_out) = check_inputs(r, amount_in, dir)?;
    let (out, _rem) = (bu(amount_in) * bu(r_in)).div_rem(&bu(r_out));
    let out = to_amount(&out)?;
    match from_swap_output(out, r_out) {
        Some(code) => Err(pool_err!(code)),
        None => Ok(out),
    }
}

/// `|k1 - k0| / k0` exato; zero quando `k0 == 0`.
pub fn dk_over_k(before: Reserves, after: Reserves) -> BigRational {
    let k0 = bu(before.base) * bu(before.token);
    if k0.is_zero() {
        return BigRational::zero();
    }
    let k1 = bu(after.base) * bu(after.token);
    let delta = if k1 >= k0 { &k1 - &k0 } else { &k0 - &k1 };
    q(&delta, &k0)
}

// -------------------------
// Goldens
// -------------------------
#[derive(Debug, Clone)]
pub struct RefQuote {
    pub out_core: Amount,
    pub out_policy: Amount,
    pub out_exact: BigRational,
    pub dk_over_k: BigRational,
}

impl RefQuote {
    /// Erro de quantização do core: `exato - core`, sempre em `[0, 1)`.
    pub fn rounding_gap(&self) -> BigRational {
        self.out_exact.clone() - BigRational::from_integer(BigInt::from(self.out_core))
    }
}

/// Compara o core com a referência para um swap.
pub fn golden_quote(r: Reserves, amount_in: Amount, dir: Direction) -> Result<RefQuote> {
    let plan = swap::plan_swap(r, amount_in, None, dir)?;
    let out_policy = policy_out(r, amount_in, dir)?;
    let out_exact = exact_out(r, amount_in, dir)?;
    Ok(RefQuote {
        out_core: plan.amount_out,
        out_policy,
        out_exact,
        dk_over_k: dk_over_k(r, plan.reserves_after),
    })
}
