//! Mapeamento entre condições de domínio e códigos de erro do pool.
use crate::amm::error::PoolError;
use crate::amm::error_catalog::PoolErrorCode;
use crate::amm::types::Amount;

/// Código de erro de um swap a partir dos inputs brutos
/// (`reserves = (reserva de entrada, reserva de saída)`).
pub fn from_swap_inputs(amount_in: Amount, reserves: (Amount, Amount)) -> Option<PoolErrorCode> {
    if amount_in == 0 {
        return Some(PoolErrorCode::InvalidAmount);
    }
    if reserves.0 == 0 || reserves.1 == 0 {
        return Some(PoolErrorCode::ZeroReserve);
    }
    if reserves.0.checked_add(amount_in).is_none() {
        return Some(PoolErrorCode::OverflowNumeric);
    }
    None
}

/// Saída que levaria o lado de saída a zero (ou abaixo) esgota o pool.
pub fn from_swap_output(amount_out: Amount, reserve_out: Amount) -> Option<PoolErrorCode> {
    (amount_out >= reserve_out).then_some(PoolErrorCode::SupplyExhausted)
}

/// Código de erro de um débito no ledger. Allowance é checada antes do saldo.
/// `allowance = None` para débitos feitos pelo próprio dono.
pub fn from_ledger_debit(amount: Amount, balance: Amount, allowance: Option<Amount>) -> Option<PoolErrorCode> {
    if allowance.is_some_and(|a| a < amount) {
        return Some(PoolErrorCode::InsufficientAllowance);
    }
    if balance < amount {
        return Some(PoolErrorCode::InsufficientBalance);
    }
    None
}

/// Constrói um [`PoolError`] diretamente de um código.
pub fn to_error(code: PoolErrorCode) -> PoolError {
    PoolError::new(code)
}
