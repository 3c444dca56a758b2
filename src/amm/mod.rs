pub mod types;
pub mod guardrails;
pub mod pricing;
pub mod liquidity;    // planejamento de add/remove
pub mod swap;         // cotações dos swaps
pub mod pool;         // estado agregado (reservas + shares)
pub mod exchange;     // operações públicas serializadas

pub mod error_catalog;
pub mod error;
pub mod error_map;

pub mod ref_golden;
