//! Client configuration.
//!
//! # Design
//! `ClientConfig` is built once and then only read. Per-call headers are
//! merged into a fresh copy of the defaults by `merged_headers`, so one call
//! can never change the headers another call sends.

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// What `ApiClient::get`/`post`/`put`/`delete` do with a 4xx/5xx response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Log the error and return `Ok(None)`.
    Swallow,
    /// Return `ApiError::HttpError` to the caller.
    #[default]
    Surface,
}

impl ErrorPolicy {
    /// Parse `swallow` / `surface`, ignoring case. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "swallow" => Some(ErrorPolicy::Swallow),
            "surface" => Some(ErrorPolicy::Surface),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub default_headers: Vec<(String, String)>,
    pub error_policy: ErrorPolicy,
}

impl ClientConfig {
    /// The base URL is kept verbatim; endpoints are appended to it as-is.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            default_headers: Vec::new(),
            error_policy: ErrorPolicy::default(),
        }
    }

    /// Read `API_BASE_URL`, `API_TOKEN` and `API_ERROR_POLICY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, resolving each variable through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let error_policy = lookup("API_ERROR_POLICY")
            .and_then(|p| ErrorPolicy::parse(&p))
            .unwrap_or_default();

        let mut config = Self::new(&base_url)
            .with_header("Content-Type", "application/json")
            .with_error_policy(error_policy);
        if let Some(token) = lookup("API_TOKEN") {
            config = config.with_bearer_token(&token);
        }
        config
    }

    /// Add or replace a default header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        upsert(&mut self.default_headers, name, value);
        self
    }

    pub fn with_bearer_token(self, token: &str) -> Self {
        self.with_header("Authorization", &format!("Bearer {token}"))
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Defaults overlaid with `extra`, returned as a new list.
    ///
    /// A per-call header replaces a default of the same name (compared
    /// case-insensitively) in place; new names are appended in call order.
    pub fn merged_headers(&self, extra: &[(String, String)]) -> Vec<(String, String)> {
        let mut merged = self.default_headers.clone();
        for (name, value) in extra {
            upsert(&mut merged, name, value);
        }
        merged
    }
}

fn upsert(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
        Some(slot) => slot.1 = value.to_string(),
        None => headers.push((name.to_string(), value.to_string())),
    }
}
