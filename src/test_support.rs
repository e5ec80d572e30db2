//! One-time `tracing` log init for tests, mirroring the teacher's declared
//! but unexercised `tracing-subscriber` + `ctor` dev-dependency pair.
//!
//! Every unit test in this crate runs under the same process, so installing
//! a global subscriber more than once would panic; `#[ctor]` runs this
//! exactly once before `main` (or before the test harness starts), gated
//! entirely behind `RUST_LOG` via `EnvFilter` so normal test runs stay quiet.

#![cfg(test)]

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
