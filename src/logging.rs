//! Logging configuration for this crate.
//!
//! Thin wrapper around the `log`/`env_logger` crates, following this
//! codebase's usual logging conventions.
//!
//! # Log levels
//!
//! - `error!` - not used by this crate; all failures are internal panics.
//! - `warn!` - recoverable-but-unusual input, e.g. a block with an empty
//!   live-in set reaching φ placement.
//! - `info!` - pass-level progress (entering/leaving `make_ssa::run`).
//! - `debug!` - phase boundaries within the pass (placement, renaming,
//!   degenerate-φ removal).
//! - `trace!` - per-block, per-instruction detail.
//!
//! # Environment variable
//!
//! ```bash
//! RUST_LOG=debug cargo test
//! RUST_LOG=ssa_construct::passes::make_ssa=trace cargo test
//! ```

use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging with sensible defaults (Warn level). Only initializes
/// once; later calls are no-ops.
pub fn init() {
    init_with_level(LevelFilter::Warn);
}

/// Initialize logging at a specific level. Only initializes once.
pub fn init_with_level(level: LevelFilter) {
    INIT.call_once(|| {
        Builder::new()
            .filter_level(level)
            .format(|buf, record| {
                writeln!(
                    buf,
                    "[{:5}] {}:{} - {}",
                    record.level(),
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0),
                    record.args()
                )
            })
            .init();
    });
}

/// Initialize logging from `RUST_LOG`, defaulting to Warn if unset.
pub fn init_from_env() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    });
}

/// Initialize logging for tests; safe to call from every test function.
pub fn init_test() {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .is_test(true)
        .try_init();
}
