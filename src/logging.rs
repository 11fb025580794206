use tracing_subscriber::EnvFilter;

use crate::config::LoggingSection;

/// Install the global tracing subscriber. `RUST_LOG` takes precedence over
/// the configured level and module directives.
pub fn init(cfg: &LoggingSection) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => {
            let mut directives = cfg.level.clone();
            if let Some(modules) = &cfg.module_levels {
                directives.push(',');
                directives.push_str(modules);
            }
            EnvFilter::try_new(directives)?
        }
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match cfg.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))
}
