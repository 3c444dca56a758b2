//! Pool de liquidez de dois ativos: base (valor nativo) ↔ token fungível.
//!
//! O núcleo fica em [`amm`]: estado compartilhado do pool, provisão/retirada
//! proporcional de liquidez e swaps a preço spot com limites de slippage.
//! O ledger do token e o primitivo de valor nativo são colaboradores externos
//! consumidos pelas traits de [`ledger`].

pub mod amm;
pub mod config;
pub mod ledger;
pub mod obs;
pub mod telemetry;

pub use amm::error::{PoolError, Result};
pub use amm::error_catalog::PoolErrorCode;
pub use amm::exchange::Exchange;
pub use amm::types::{AccountId, Amount, Bounds, PoolStatus, Reserves, U256};
pub use ledger::{AssetLedger, NativeBank, NativeTransfer, TokenLedger};
