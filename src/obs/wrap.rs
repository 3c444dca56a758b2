//! Instrumentos do pool sobre o meter global. Sem provider instalado
//! (testes), o meter global é no-op.

use once_cell::sync::OnceCell;
use opentelemetry::metrics::{Counter, Histogram};
use opentelemetry::{global, KeyValue};
use std::time::Instant;

use crate::amm::error_catalog::PoolErrorCode;

struct Instruments {
    op_duration: Histogram<f64>,
    rejections: Counter<u64>,
    k_drift: Histogram<f64>,
}

static INSTRUMENTS: OnceCell<Instruments> = OnceCell::new();

fn instruments() -> &'static Instruments {
    INSTRUMENTS.get_or_init(|| {
        let meter = global::meter("exchange_core");
        Instruments {
            op_duration: meter
                .f64_histogram("pool_op_duration_seconds")
                .with_unit("s")
                .with_description("Duração das operações do pool")
                .build(),
            rejections: meter
                .u64_counter("pool_op_rejections_total")
                .with_description("Operações rejeitadas por código de erro")
                .build(),
            k_drift: meter
                .f64_histogram("pool_k_drift_rel")
                .with_unit("1")
                .with_description("Desvio relativo |Δk/k| após cada swap")
                .build(),
        }
    })
}

/// Executa `f` e registra a duração com o atributo `op`.
pub fn time<F, T>(op: &'static str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let out = f();
    instruments()
        .op_duration
        .record(start.elapsed().as_secs_f64(), &[KeyValue::new("op", op)]);
    out
}

pub fn record_rejection(op: &'static str, code: PoolErrorCode) {
    instruments().rejections.add(
        1,
        &[KeyValue::new("op", op), KeyValue::new("code", code.code())],
    );
}

pub fn record_k_drift(op: &'static str, rel: f64) {
    instruments().k_drift.record(rel, &[KeyValue::new("op", op)]);
}
