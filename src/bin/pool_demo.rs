use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use exchange_core::config::{DemoConfig, TelemetryConfig};
use exchange_core::{telemetry, AccountId, Bounds, Exchange, NativeBank, TokenLedger};

type DemoExchange = Exchange<Arc<TokenLedger>, Arc<NativeBank>>;

#[tokio::main]
async fn main() -> Result<()> {
    let tel_cfg = TelemetryConfig::from_env()?;
    let demo = DemoConfig::from_env()?;
    // exporter OTLP usa cliente HTTP bloqueante: fica fora das threads do runtime
    let init_cfg = tel_cfg.clone();
    let tel = tokio::task::spawn_blocking(move || telemetry::init(&init_cfg)).await??;
    info!(exporting = tel.exporting(), traders = demo.traders, rounds = demo.rounds, "pool_demo iniciado");

    let admin = AccountId::from("admin");
    let pool = AccountId::from("pool");
    let tokens = Arc::new(TokenLedger::new(admin.clone(), "DlimToken", "DLIM"));
    let bank = Arc::new(NativeBank::new());

    // gênese: admin semeia 20 base : 10 token e distribui para os traders
    let traders: Vec<AccountId> = (0..demo.traders).map(|i| AccountId::new(format!("trader-{i}"))).collect();
    tokens.mint(&admin, 1_000 + 100 * traders.len() as u128)?;
    tokens.disable_mint(&admin)?;
    bank.fund(&admin, 1_000)?;
    tokens.approve(&admin, &pool, 1_000);
    for t in &traders {
        exchange_core::AssetLedger::transfer(tokens.as_ref(), &admin, t, 100)?;
        tokens.approve(t, &pool, 100);
        bank.fund(t, 100)?;
    }

    let exchange: Arc<DemoExchange> = Arc::new(Exchange::new(pool, admin.clone(), tokens.clone(), bank.clone()));
    exchange.create_pool(&admin, 10, 20)?;
    exchange.add_liquidity(&admin, 2, Bounds::between(1, 2))?;

    let mut handles = Vec::with_capacity(traders.len());
    for (i, trader) in traders.into_iter().enumerate() {
        let ex = exchange.clone();
        let rounds = demo.rounds;
        let commit = tel_cfg.commit_sha.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            for round in 0..rounds {
                let span = telemetry::make_info_span("trade", round as u32, "pool_demo", &commit);
                let _g = span.enter();
                let res = if (i + round) % 2 == 0 {
                    ex.swap_token_for_base(&trader, 2, None).map(|r| r.amount_out)
                } else {
                    ex.swap_base_for_token(&trader, 1, None).map(|r| r.amount_out)
                };
                match res {
                    Ok(out) => info!(%trader, round, out, "trade executado"),
                    Err(err) => warn!(%trader, round, error = %err, "trade recusado"),
                }
            }
        }));
    }
    for h in handles {
        h.await?;
    }

    let snap = exchange.snapshot();
    info!(
        base = snap.reserves.base,
        token = snap.reserves.token,
        k = %snap.reserves.k(),
        total_shares = snap.total_shares,
        price_token = exchange.price_token(),
        price_base = exchange.price_base(),
        "estado final"
    );
    let exit = exchange.remove_all_liquidity(&admin)?;
    info!(base = exit.base, token = exit.token, "admin retirou toda a liquidez");

    tokio::task::spawn_blocking(move || tel.shutdown()).await??;
    Ok(())
}
