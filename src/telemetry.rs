//! Explicit tracing setup for embedding applications
//!
//! Nothing in this crate installs a subscriber as an import-time side effect.
//! An embedder that wants the provider's debug events on stdout calls
//! [`init`] once during process initialization; repeated calls are no-ops,
//! as is calling it when a subscriber is already installed.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a formatting subscriber honoring `RUST_LOG`
///
/// Idempotent; defers to any subscriber the application installed first.
pub fn init() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
