use tracing_subscriber::EnvFilter;

/// stderrへのログ出力を初期化する
///
/// `RUST_LOG` があればそれを使い、なければ `--verbose` でdebug、通常はwarn。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
