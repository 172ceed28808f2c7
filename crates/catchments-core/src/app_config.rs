use std::path::PathBuf;

/// Process-wide settings read from the environment.
///
/// None of these are secrets, but provider base URLs can carry tokens in
/// self-hosted proxies, so they are redacted from `Debug` output.
#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub output_dir: PathBuf,
    /// `None` leaves the HTTP client's own default in place.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub skobbler_base_url: Option<String>,
    pub here_base_url: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("output_dir", &self.output_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field(
                "skobbler_base_url",
                &self.skobbler_base_url.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "here_base_url",
                &self.here_base_url.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
