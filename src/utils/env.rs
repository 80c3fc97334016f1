use std::env;

/// Whether we are running in a development build.
pub fn is_development() -> bool {
    // CLIPKEEP_ENV overrides the compile-time default
    if let Ok(env_val) = env::var("CLIPKEEP_ENV") {
        return env_val == "development";
    }
    cfg!(debug_assertions)
}
