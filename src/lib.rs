#![doc(test(attr(deny(warnings))))]

//! Rent Core offers the ledger, schedule, and reminder primitives that power
//! rental-property tracking workflows and their shells.

pub mod config;
pub mod engine;
pub mod errors;
pub mod money;
pub mod notify;
pub mod portfolio;
pub mod services;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Rent Core tracing initialized.");
    });
}
