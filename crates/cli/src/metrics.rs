//! Process-wide metrics registry.

use once_cell::sync::Lazy;
use prometheus::Registry;
use tracing::warn;

use vidpipe_core::metrics::{gather_text, register_metrics};

/// Global metrics registry holding every core metric.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    if let Err(e) = register_metrics(&registry) {
        warn!("Failed to register metrics: {}", e);
    }
    registry
});

/// Renders all metrics in the Prometheus text format.
pub fn render() -> String {
    gather_text(&REGISTRY)
}
