use std::env;

/// Name echoed in every response envelope.
pub fn service_name() -> String {
    env::var("SERVICE_NAME").unwrap_or_else(|_| "Unknown".to_string())
}

/// Reads `name`, falling back to `default` when it is unset or blank.
pub fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
