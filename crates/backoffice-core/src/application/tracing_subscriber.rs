use crate::{extension::TomlTableExt, state::State};
use std::sync::OnceLock;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    layer::SubscriberExt,
};

/// Initializes the global tracing subscriber according to the `[tracing]` config
/// of the shared state.
///
/// It uses a `Pretty` formatter in the `dev` environment and a `Json` formatter otherwise.
/// Returns `false` if a global subscriber has already been set.
pub fn init_tracing() -> bool {
    if TRACING_INITIALIZED.get().is_some() {
        tracing::warn!("the tracing subscriber has already been initialized");
        return false;
    }

    let state = State::shared();
    let app_env = state.env();
    let in_dev_mode = app_env.is_dev();
    let mut env_filter = if in_dev_mode {
        "info,backoffice_core=trace,backoffice_ui=trace"
    } else {
        "info"
    };
    let mut display_target = true;
    let mut display_filename = false;
    let mut display_line_number = false;
    let mut display_thread_names = false;
    if let Some(config) = state.get_config("tracing") {
        if let Some(filter) = config.get_str("filter") {
            env_filter = filter;
        }
        display_target = config.get_bool("display-target").unwrap_or(true);
        display_filename = config.get_bool("display-filename").unwrap_or(in_dev_mode);
        display_line_number = config
            .get_bool("display-line-number")
            .unwrap_or(in_dev_mode);
        display_thread_names = config.get_bool("display-thread-names").unwrap_or(false);
    }

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(display_target)
        .with_file(display_filename)
        .with_line_number(display_line_number)
        .with_thread_names(display_thread_names);
    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(env_filter);
    let result = if in_dev_mode {
        let subscriber = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer.pretty());
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer.json().with_current_span(true));
        tracing::subscriber::set_global_default(subscriber)
    };
    if let Err(err) = result {
        tracing::error!("fail to set the default subscriber: {err}");
        return false;
    }
    TRACING_INITIALIZED.get_or_init(|| app_env.as_str());
    tracing::info!(app_env = app_env.as_str(), "tracing subscriber initialized");
    true
}

/// The environment in which the tracing subscriber was initialized.
static TRACING_INITIALIZED: OnceLock<&'static str> = OnceLock::new();

#[cfg(test)]
mod tests {
    use super::init_tracing;

    #[test]
    fn it_initializes_tracing_once() {
        let initialized = init_tracing();
        assert!(!init_tracing());
        if initialized {
            tracing::info!("tracing enabled for tests");
        }
    }
}
