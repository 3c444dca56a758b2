#![allow(dead_code)]

use std::sync::Arc;

use exchange_core::{AccountId, AssetLedger, Exchange, NativeBank, NativeTransfer, Reserves, TokenLedger};

const RICH: u128 = 1_000_000_000_000_000_000_000_000_000_000; // 1e30

pub type TestExchange = Exchange<Arc<TokenLedger>, Arc<NativeBank>>;

/// Cenário de referência: owner com 1000 tokens (200 já repassados ao addr1),
/// allowances para o pool e 10_000 de valor nativo por conta.
pub struct World {
    pub ex: TestExchange,
    pub token: Arc<TokenLedger>,
    pub bank: Arc<NativeBank>,
    pub owner: AccountId,
    pub addr1: AccountId,
    pub addr2: AccountId,
    pub pool: AccountId,
}

pub fn world() -> World {
    world_with(1_200, 10_000)
}

/// Mesmo cenário com `minted` tokens emitidos ao owner e `native` por conta.
pub fn world_with(minted: u128, native: u128) -> World {
    let owner = AccountId::from("owner");
    let addr1 = AccountId::from("addr1");
    let addr2 = AccountId::from("addr2");
    let pool = AccountId::from("pool");

    let token = Arc::new(TokenLedger::new(owner.clone(), "DlimToken", "DLIM"));
    token.mint(&owner, minted).unwrap();
    token.transfer(&owner, &addr1, 200).unwrap();
    token.approve(&owner, &pool, 1_000);
    token.approve(&addr1, &pool, 200);

    let bank = Arc::new(NativeBank::new());
    for acc in [&owner, &addr1, &addr2] {
        bank.fund(acc, native).unwrap();
    }

    let ex = Exchange::new(pool.clone(), owner.clone(), token.clone(), bank.clone());
    World { ex, token, bank, owner, addr1, addr2, pool }
}

/// `world()` com o pool criado em 20 base : 10 token.
pub fn seeded() -> World {
    let w = world();
    w.ex.create_pool(&w.owner, 10, 20).unwrap();
    w
}

/// Pool criado em `base : token` com owner de fundos e allowance folgados.
pub fn funded(base: u128, token: u128) -> World {
    let w = world_with(RICH, RICH);
    w.token.approve(&w.owner, &w.pool, u128::MAX);
    w.ex.create_pool(&w.owner, token, base).unwrap();
    w
}

impl World {
    pub fn accounts(&self) -> [&AccountId; 3] {
        [&self.owner, &self.addr1, &self.addr2]
    }

    pub fn tokens_of(&self, acc: &AccountId) -> u128 {
        self.token.balance_of(acc)
    }

    pub fn native_of(&self, acc: &AccountId) -> u128 {
        self.bank.balance_of(acc)
    }

    /// Saldos do pool nos ledgers espelham as reservas.
    pub fn pool_holdings(&self) -> Reserves {
        Reserves::new(self.bank.balance_of(&self.pool), self.token.balance_of(&self.pool))
    }

    pub fn total_tokens(&self) -> u128 {
        self.accounts().iter().map(|a| self.tokens_of(a)).sum::<u128>() + self.tokens_of(&self.pool)
    }

    pub fn total_native(&self) -> u128 {
        self.accounts().iter().map(|a| self.native_of(a)).sum::<u128>() + self.native_of(&self.pool)
    }
}
