//! Swaps a preço spot sobre o pool 20 base : 10 token.

mod common;

use common::{seeded, world};
use exchange_core::{AccountId, Bounds, PoolErrorCode, Reserves};

#[test]
fn swap_token_for_base_moves_both_ledgers() {
    let w = seeded();
    let r = w.ex.swap_token_for_base(&w.owner, 2, Some(1)).unwrap();
    assert_eq!((r.amount_in, r.amount_out), (2, 1));
    assert_eq!(r.reserves, Reserves::new(19, 12));
    assert_eq!(w.ex.reserves(), Reserves::new(19, 12));
    assert_eq!(w.tokens_of(&w.owner), 988);
    assert_eq!(w.tokens_of(&w.pool), 12);
    assert_eq!(w.native_of(&w.owner), 9_981);
    assert_eq!(w.pool_holdings(), w.ex.reserves());
    // swaps não mexem em shares
    assert_eq!(w.ex.balance_of_pool(&w.owner), 20);
}

#[test]
fn swap_base_for_token_moves_both_ledgers() {
    let w = seeded();
    let r = w.ex.swap_base_for_token(&w.owner, 2, Some(4)).unwrap();
    assert_eq!((r.amount_in, r.amount_out), (2, 4));
    assert_eq!(w.ex.reserves(), Reserves::new(22, 6));
    assert_eq!(w.tokens_of(&w.owner), 994);
    assert_eq!(w.tokens_of(&w.pool), 6);
    assert_eq!(w.native_of(&w.owner), 9_978);
    assert_eq!(w.pool_holdings(), w.ex.reserves());
}

#[test]
fn swap_that_would_drain_a_side_is_rejected() {
    let w = seeded();
    // 40 tokens -> 20 base: a reserva base inteira
    let err = w.ex.swap_token_for_base(&w.owner, 40, None).unwrap_err();
    assert_eq!(err.code, PoolErrorCode::SupplyExhausted);
    // 5 base -> 10 tokens: a reserva de token inteira
    let err = w.ex.swap_base_for_token(&w.owner, 5, None).unwrap_err();
    assert_eq!(err.code, PoolErrorCode::SupplyExhausted);
    assert_eq!(w.ex.reserves(), Reserves::new(20, 10));
    assert_eq!(w.tokens_of(&w.owner), 990);
    assert_eq!(w.native_of(&w.owner), 9_980);
}

#[test]
fn min_out_is_enforced() {
    let w = seeded();
    let err = w.ex.swap_token_for_base(&w.owner, 2, Some(2)).unwrap_err();
    assert_eq!(err.code, PoolErrorCode::SlippageExceeded);
    assert_eq!(err.context["amount_out"], "1");
    let err = w.ex.swap_base_for_token(&w.owner, 2, Some(5)).unwrap_err();
    assert_eq!(err.code, PoolErrorCode::SlippageExceeded);
    assert_eq!(w.ex.reserves(), Reserves::new(20, 10));
}

#[test]
fn rounding_to_zero_output_still_succeeds() {
    let w = seeded();
    let r = w.ex.swap_token_for_base(&w.owner, 1, None).unwrap();
    assert_eq!(r.amount_out, 0);
    assert_eq!(w.ex.reserves(), Reserves::new(20, 11));
    assert_eq!(w.native_of(&w.owner), 9_980);
}

#[test]
fn trader_without_funds_is_rejected() {
    let w = seeded();
    // addr2 não tem token nem allowance
    let err = w.ex.swap_token_for_base(&w.addr2, 2, None).unwrap_err();
    assert_eq!(err.code, PoolErrorCode::InsufficientAllowance);

    // allowance sem saldo
    w.token.approve(&w.addr2, &w.pool, 50);
    let err = w.ex.swap_token_for_base(&w.addr2, 2, None).unwrap_err();
    assert_eq!(err.code, PoolErrorCode::InsufficientBalance);

    // conta sem valor nativo
    let poor = AccountId::from("poor");
    let err = w.ex.swap_base_for_token(&poor, 2, None).unwrap_err();
    assert_eq!(err.code, PoolErrorCode::InsufficientBalance);

    assert_eq!(w.ex.reserves(), Reserves::new(20, 10));
    assert_eq!(w.native_of(&w.addr2), 10_000);
}

#[test]
fn zero_amounts_and_uninitialized_pool() {
    let w = world();
    assert_eq!(w.ex.swap_token_for_base(&w.owner, 2, None).unwrap_err().code, PoolErrorCode::NotInitialized);
    assert_eq!(w.ex.swap_base_for_token(&w.owner, 2, None).unwrap_err().code, PoolErrorCode::NotInitialized);

    w.ex.create_pool(&w.owner, 10, 20).unwrap();
    assert_eq!(w.ex.swap_token_for_base(&w.owner, 0, None).unwrap_err().code, PoolErrorCode::InvalidAmount);
    assert_eq!(w.ex.swap_base_for_token(&w.owner, 0, None).unwrap_err().code, PoolErrorCode::InvalidAmount);
}

#[test]
fn swaps_on_a_drained_pool_report_zero_reserve() {
    let w = seeded();
    w.ex.remove_all_liquidity(&w.owner).unwrap();
    assert_eq!(w.ex.swap_base_for_token(&w.owner, 2, None).unwrap_err().code, PoolErrorCode::ZeroReserve);
    assert_eq!(w.ex.swap_token_for_base(&w.owner, 2, None).unwrap_err().code, PoolErrorCode::ZeroReserve);
}

#[test]
fn withdrawal_after_swaps_cannot_exceed_base_reserve() {
    let w = seeded();
    w.ex.add_liquidity(&w.addr1, 20, Bounds::ANY).unwrap(); // (40, 20)
    // 72 tokens * 20 / 40 = 36 base
    let r = w.ex.swap_token_for_base(&w.owner, 72, None).unwrap();
    assert_eq!(r.amount_out, 36);
    assert_eq!(w.ex.reserves(), Reserves::new(4, 92));
    // share do owner (20) > reserva base (4)
    let err = w.ex.remove_all_liquidity(&w.owner).unwrap_err();
    assert_eq!(err.code, PoolErrorCode::SupplyExhausted);
    // dentro da reserva ainda funciona
    let r = w.ex.remove_liquidity(&w.addr1, 4, Bounds::ANY).unwrap();
    assert_eq!((r.base, r.token), (4, 92));
    assert!(w.ex.reserves().is_empty());
}
