//! Browser origins allowed to call the API (`ALLOWED_ORIGINS`, comma separated).

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Splits a comma separated list, dropping blanks and trailing slashes so
/// `http://school.example/` matches the `Origin` header browsers send.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

impl CorsConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let raw = std::env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGINS.to_string());
        Self {
            allowed_origins: parse_origins(&raw),
        }
    }
}
