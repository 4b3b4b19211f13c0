pub mod format;

use std::path::PathBuf;

/// Get directory holding the static page shell from environment variable or use default
pub fn get_public_dir() -> PathBuf {
    std::env::var("PUBLIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("public"))
}

/// Read a string setting from the environment, falling back to `default`
pub fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Read a numeric setting from the environment.
///
/// Unparseable values are reported and replaced by `default`.
pub fn env_parse_or<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Invalid value '{}' for {}, using default {}", raw, name, default);
                default
            }
        },
        Err(_) => default,
    }
}
