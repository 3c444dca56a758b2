mod common;

use proptest::prelude::*;

use common::{funded, seeded, World};
use exchange_core::{AccountId, Bounds, PoolStatus};

#[derive(Clone, Debug)]
enum Op {
    Add(usize, u128),
    Remove(usize, u128),
    RemoveAll(usize),
    SellToken(usize, u128),
    BuyToken(usize, u128),
}

fn liquidity_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..3usize, 0..60u128).prop_map(|(a, x)| Op::Add(a, x)),
        (0..3usize, 0..40u128).prop_map(|(a, x)| Op::Remove(a, x)),
        (0..3usize).prop_map(Op::RemoveAll),
    ]
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => liquidity_op(),
        1 => (0..3usize, 0..30u128).prop_map(|(a, x)| Op::SellToken(a, x)),
        1 => (0..3usize, 0..12u128).prop_map(|(a, x)| Op::BuyToken(a, x)),
    ]
}

/// Contas com saldo e allowance folgados para que a maioria das ops passe.
fn arena() -> World {
    let w = seeded();
    w.token.approve(&w.owner, &w.pool, u128::MAX);
    w.token.approve(&w.addr1, &w.pool, u128::MAX);
    w
}

fn actor(w: &World, idx: usize) -> AccountId {
    w.accounts()[idx].clone()
}

fn apply(w: &World, op: &Op) -> bool {
    let res = match *op {
        Op::Add(a, x) => w.ex.add_liquidity(&actor(w, a), x, Bounds::ANY).map(|_| ()),
        Op::Remove(a, x) => w.ex.remove_liquidity(&actor(w, a), x, Bounds::ANY).map(|_| ()),
        Op::RemoveAll(a) => w.ex.remove_all_liquidity(&actor(w, a)).map(|_| ()),
        Op::SellToken(a, x) => w.ex.swap_token_for_base(&actor(w, a), x, None).map(|_| ()),
        Op::BuyToken(a, x) => w.ex.swap_base_for_token(&actor(w, a), x, None).map(|_| ()),
    };
    res.is_ok()
}

fn balances(w: &World) -> Vec<(u128, u128)> {
    w.accounts().iter().map(|a| (w.tokens_of(a), w.native_of(a))).collect()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    /// (P1) Nenhuma sequência cria ou destrói ativos; ledgers do pool espelham as reservas.
    #[test]
    fn assets_are_conserved(ops in prop::collection::vec(any_op(), 1..40)) {
        let w = arena();
        let (tokens0, native0) = (w.total_tokens(), w.total_native());
        for op in &ops {
            apply(&w, op);
            prop_assert_eq!(w.total_tokens(), tokens0);
            prop_assert_eq!(w.total_native(), native0);
            prop_assert_eq!(w.pool_holdings(), w.ex.reserves());
            let r = w.ex.reserves();
            prop_assert_eq!(r.base == 0, r.token == 0, "reservas inconsistentes: {:?}", r);
            prop_assert_eq!(w.ex.status(), PoolStatus::Active);
        }
    }

    /// (P2) Sem swaps, a soma das shares é a reserva base.
    #[test]
    fn shares_track_base_reserve_without_swaps(ops in prop::collection::vec(liquidity_op(), 1..40)) {
        let w = arena();
        for op in &ops {
            apply(&w, op);
            prop_assert_eq!(w.ex.total_shares(), w.ex.base_reserves());
            let sum: u128 = w.accounts().iter().map(|a| w.ex.balance_of_pool(a)).sum();
            prop_assert_eq!(sum, w.ex.total_shares());
        }
    }

    /// (P3) Se todos saem, as duas reservas zeram juntas.
    #[test]
    fn full_exit_drains_both_sides(ops in prop::collection::vec(liquidity_op(), 0..30)) {
        let w = arena();
        for op in &ops {
            apply(&w, op);
        }
        for idx in 0..3 {
            let acc = actor(&w, idx);
            if w.ex.balance_of_pool(&acc) > 0 {
                prop_assert!(w.ex.remove_all_liquidity(&acc).is_ok());
            }
        }
        prop_assert!(w.ex.reserves().is_empty());
        prop_assert_eq!(w.pool_holdings(), w.ex.reserves());
        prop_assert_eq!(w.ex.total_shares(), 0);
    }

    /// (P4) Operação rejeitada não deixa rastro em reservas, shares nem saldos.
    #[test]
    fn rejected_ops_leave_no_trace(
        warmup in prop::collection::vec(any_op(), 0..20),
        op in any_op(),
    ) {
        let w = arena();
        for o in &warmup {
            apply(&w, o);
        }
        let (snap, bals) = (w.ex.snapshot(), balances(&w));
        if !apply(&w, &op) {
            prop_assert_eq!(w.ex.snapshot(), snap);
            prop_assert_eq!(balances(&w), bals);
        }
    }

    /// (P6) Add de `x` seguido de remove de `x` devolve as reservas exatas:
    /// `floor(x·(T+t)/(B+x)) = t` com `t = floor(x·T/B)`.
    #[test]
    fn add_then_remove_same_amount_restores_reserves(
        base in 1u128..=1_000_000_000_000u128,
        token in 1u128..=1_000_000_000_000u128,
        x in 1u128..=1_000_000_000_000u128,
    ) {
        let w = funded(base, token);
        let before = w.ex.reserves();
        let tokens_before = w.tokens_of(&w.owner);
        let added = w.ex.add_liquidity(&w.owner, x, Bounds::ANY).unwrap();
        let removed = w.ex.remove_liquidity(&w.owner, x, Bounds::ANY).unwrap();
        prop_assert_eq!(removed.token, added.token);
        prop_assert_eq!(w.ex.reserves(), before);
        prop_assert_eq!(w.tokens_of(&w.owner), tokens_before);
        prop_assert_eq!(w.ex.balance_of_pool(&w.owner), base);
    }

    /// (P5) Swap aceito nunca esgota o lado de saída e leituras são idempotentes.
    #[test]
    fn swaps_stay_inside_reserves(who in 0..3usize, amount in 1..200u128, sell in any::<bool>()) {
        let w = arena();
        let before = w.ex.reserves();
        let acc = actor(&w, who);
        let res = if sell {
            w.ex.swap_token_for_base(&acc, amount, None)
        } else {
            w.ex.swap_base_for_token(&acc, amount, None)
        };
        if let Ok(receipt) = res {
            let limit = if sell { before.base } else { before.token };
            prop_assert!(receipt.amount_out < limit);
            prop_assert_eq!(receipt.reserves, w.ex.reserves());
        }
        prop_assert_eq!(w.ex.snapshot(), w.ex.snapshot());
        prop_assert_eq!(w.ex.price_token(), w.ex.price_token());
    }
}
