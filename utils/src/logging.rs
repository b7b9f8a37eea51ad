//! Tracing subscriber setup shared by binaries and test harnesses.

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG`. Setting `SCHOLARPASS_LOG_FORMAT=json`
/// switches to machine-readable output for log shippers. Later calls are
/// no-ops, so test harnesses can initialize unconditionally.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::from_default_env();
    let json = std::env::var("SCHOLARPASS_LOG_FORMAT")
        .is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        let _ = tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialization_is_harmless() {
        init_tracing();
        init_tracing();
    }
}
