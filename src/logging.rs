use env_logger::{Builder, Env};

/// The filter used when the filter variable is unset.
pub const DEFAULT_FILTER: &str = "info";
/// Environment variable holding the log filter directives.
pub const FILTER_VAR: &str = "RUST_LOG";

/// Reads the log filter from `var`, falling back to `DEFAULT_FILTER`.
pub fn env_for(var: &str) -> Env<'_> {
    Env::default().filter_or(var, DEFAULT_FILTER)
}

/// Installs the global logger, filtered by `RUST_LOG` or at info level when it's unset.
pub fn init() {
    Builder::from_env(env_for(FILTER_VAR)).init();
}
