use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub level: Level,
    pub json_format: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            json_format: false,
        }
    }
}

impl TracingConfig {
    pub fn from_flags(debug: bool, json_format: bool) -> Self {
        let level = if debug { Level::DEBUG } else { Level::WARN };
        Self { level, json_format }
    }
}

/// Keeps the subscriber installed for the current thread until dropped.
#[derive(Debug)]
pub struct TracingGuard {
    _default_guard: tracing::subscriber::DefaultGuard,
}

/// Installs a stderr subscriber. Log output never goes to stdout, which
/// carries command output.
pub fn init_tracing(config: &TracingConfig) -> TracingGuard {
    let env_filter = resolve_env_filter(config);

    let default_guard = if config.json_format {
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_timer(tracing_subscriber::fmt::time::SystemTime);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer)
            .set_default()
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .without_time();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer)
            .set_default()
    };

    TracingGuard {
        _default_guard: default_guard,
    }
}

fn resolve_env_filter(config: &TracingConfig) -> EnvFilter {
    if config.level == Level::DEBUG {
        EnvFilter::new(Level::DEBUG.as_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.as_str()))
    }
}
