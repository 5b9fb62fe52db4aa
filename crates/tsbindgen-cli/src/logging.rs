//! Logging setup.
//!
//! `--verbose` switches the hierarchical tree layer on and lowers the
//! default filter to debug; `--log-category` narrows output to the given
//! tracing-target prefixes. `RUST_LOG` still wins when set.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub fn init(verbose: bool, categories: &[String]) {
    let default_level = if verbose { "debug" } else { "warn" };
    let directives = if categories.is_empty() {
        default_level.to_string()
    } else {
        categories
            .iter()
            .map(|c| format!("{c}={default_level}"))
            .collect::<Vec<_>>()
            .join(",")
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives));

    if verbose {
        let tree = tracing_tree::HierarchicalLayer::new(2)
            .with_targets(true)
            .with_filter(filter);
        let _ = tracing_subscriber::registry().with(tree).try_init();
    } else {
        let fmt = tracing_subscriber::fmt::layer()
            .with_target(false)
            .compact()
            .with_filter(filter);
        let _ = tracing_subscriber::registry().with(fmt).try_init();
    }
}
