//! Tipos básicos do pool (unidades inteiras) + U256 para intermediários.

use core::fmt;

use uint::construct_uint;
construct_uint! {
    /// Inteiro de 256 bits para produtos intermediários (`a * b` antes da divisão).
    pub struct U256(4);
}

/// Quantidade em unidades inteiras do ativo (base ou token).
pub type Amount = u128;

/// Escala fixa usada só nas cotações de exibição.
pub const WAD: Amount = 1_000_000_000_000_000_000u128; // 1e18

/// Identidade opaca de uma conta.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reservas do pool: `base` (ativo nativo) e `token`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reserves {
    pub base: Amount,
    pub token: Amount,
}

impl Reserves {
    pub fn new(base: Amount, token: Amount) -> Self {
        Self { base, token }
    }

    /// `k = base * token`. Informativo: swaps não preservam `k`.
    pub fn k(&self) -> U256 {
        U256::from(self.base) * U256::from(self.token)
    }

    pub fn is_empty(&self) -> bool {
        self.base == 0 && self.token == 0
    }
}

/// Ciclo de vida do pool: só `create_pool` leva a `Active`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PoolStatus {
    #[default]
    Uninitialized,
    Active,
}

/// Janela de slippage informada pelo chamador. Lados `None` não são checados.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    pub min: Option<Amount>,
    pub max: Option<Amount>,
}

impl Bounds {
    pub const ANY: Bounds = Bounds { min: None, max: None };

    pub fn between(min: Amount, max: Amount) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    pub fn at_least(min: Amount) -> Self {
        Self { min: Some(min), max: None }
    }

    pub fn contains(&self, value: Amount) -> bool {
        self.min.map_or(true, |m| value >= m) && self.max.map_or(true, |m| value <= m)
    }
}

/// Resultado de create/add/remove: quantidades movidas e share final da conta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquidityReceipt {
    pub base: Amount,
    pub token: Amount,
    pub share: Amount,
}

/// Resultado de um swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapReceipt {
    pub amount_in: Amount,
    pub amount_out: Amount,
    pub reserves: Reserves,
}

/// Cópia consistente do estado, lida sob um único lock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub status: PoolStatus,
    pub admin: AccountId,
    pub reserves: Reserves,
    pub total_shares: Amount,
}
