//! Catálogo imutável de erros do pool.
use core::fmt;

/// Código de erro do pool e do ledger.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum PoolErrorCode {
    /// Operação antes de `create_pool`.
    NotInitialized,
    /// Segunda chamada de `create_pool`.
    AlreadyInitialized,
    /// Conta sem o papel exigido (admin).
    Unauthorized,
    /// Montante zero ou fora do domínio.
    InvalidAmount,
    /// Saldo do ledger insuficiente.
    InsufficientBalance,
    /// Allowance do ledger insuficiente.
    InsufficientAllowance,
    /// Retirada acima da contribuição da própria conta.
    InsufficientShare,
    /// Valor calculado fora da janela min/max.
    SlippageExceeded,
    /// Swap ou retirada esgotaria uma reserva.
    SupplyExhausted,
    /// Pool drenado: preço indefinido.
    ZeroReserve,
    /// Overflow ou underflow em cálculos numéricos.
    OverflowNumeric,
    /// Mint desabilitado no ledger.
    MintDisabled,
}

impl PoolErrorCode {
    /// Código textual estável do erro.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotInitialized => "POOL-0001",
            Self::AlreadyInitialized => "POOL-0002",
            Self::Unauthorized => "POOL-0003",
            Self::InvalidAmount => "POOL-0004",
            Self::InsufficientBalance => "POOL-0005",
            Self::InsufficientAllowance => "POOL-0006",
            Self::InsufficientShare => "POOL-0007",
            Self::SlippageExceeded => "POOL-0008",
            Self::SupplyExhausted => "POOL-0009",
            Self::ZeroReserve => "POOL-0010",
            Self::OverflowNumeric => "POOL-0011",
            Self::MintDisabled => "POOL-0012",
        }
    }

    /// Título curto em português.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::NotInitialized => "Pool não inicializado",
            Self::AlreadyInitialized => "Pool já inicializado",
            Self::Unauthorized => "Acesso negado",
            Self::InvalidAmount => "Quantidade inválida",
            Self::InsufficientBalance => "Saldo insuficiente",
            Self::InsufficientAllowance => "Allowance insuficiente",
            Self::InsufficientShare => "Participação insuficiente",
            Self::SlippageExceeded => "Slippage excedido",
            Self::SupplyExhausted => "Reserva esgotada",
            Self::ZeroReserve => "Reserva zerada",
            Self::OverflowNumeric => "Overflow numérico",
            Self::MintDisabled => "Mint desabilitado",
        }
    }

    /// Mensagem base em português.
    pub const fn message_pt(&self) -> &'static str {
        match self {
            Self::NotInitialized => "pool ainda não foi criado",
            Self::AlreadyInitialized => "pool já foi criado",
            Self::Unauthorized => "operação restrita ao admin",
            Self::InvalidAmount => "amount deve ser > 0",
            Self::InsufficientBalance => "saldo insuficiente para a transferência",
            Self::InsufficientAllowance => "allowance insuficiente para a transferência",
            Self::InsufficientShare => "retirada excede a participação da conta",
            Self::SlippageExceeded => "valor calculado fora dos limites informados",
            Self::SupplyExhausted => "operação esgotaria a reserva do pool",
            Self::ZeroReserve => "reservas zeradas, preço indefinido",
            Self::OverflowNumeric => "overflow/underflow numérico",
            Self::MintDisabled => "mint foi desabilitado",
        }
    }

    /// Todas as variantes em ordem estável.
    pub fn all() -> &'static [PoolErrorCode] {
        const ALL: &[PoolErrorCode] = &[
            PoolErrorCode::NotInitialized,
            PoolErrorCode::AlreadyInitialized,
            PoolErrorCode::Unauthorized,
            PoolErrorCode::InvalidAmount,
            PoolErrorCode::InsufficientBalance,
            PoolErrorCode::InsufficientAllowance,
            PoolErrorCode::InsufficientShare,
            PoolErrorCode::SlippageExceeded,
            PoolErrorCode::SupplyExhausted,
            PoolErrorCode::ZeroReserve,
            PoolErrorCode::OverflowNumeric,
            PoolErrorCode::MintDisabled,
        ];
        ALL
    }
}

impl fmt::Display for PoolErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Mensagem padrão na localidade ativa (pt-BR).
pub fn default_locale_message(code: PoolErrorCode) -> &'static str {
    code.message_pt()
}
