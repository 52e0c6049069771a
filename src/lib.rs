#![doc(test(attr(deny(warnings))))]

//! Uplink Core drives a themed terminal "uplink" simulation: a login gate,
//! a scripted boot sequence, a dashboard, a transaction ledger, a command
//! console, and a canned virtual assistant, all sharing one session state
//! machine and one command rule table.

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod ledger;
pub mod session;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("uplink_core=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("Uplink Core tracing initialized.");
    });
}
