use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str =
    "keycheck=info,keycheck_cli=info,keycheck_validator=info,keycheck_registry=info";

/// Install the global `tracing` subscriber.
///
/// Respects `RUST_LOG`; defaults to `info` for the keycheck crates. Output
/// goes to stderr so `keycheck check` can print results on stdout.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
