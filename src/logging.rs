use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日志输出到 stderr，`RUST_LOG` 优先于 `--verbose`
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "chef_mentor=debug,chef_mentor_common=debug"
    } else {
        "chef_mentor=warn"
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
