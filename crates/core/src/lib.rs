pub mod client;
pub mod domain;
pub mod subscription;
pub mod view;

pub mod config {
    use anyhow::Context;
    use std::time::Duration;

    pub const DEFAULT_PUBLIC_API_URL: &str = "http://localhost:8000";
    pub const DEFAULT_WATCHLIST: [&str; 5] = ["AAPL", "MSFT", "NVDA", "GOOGL", "AMZN"];

    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_REFRESH_SECS: u64 = 30;
    const DEFAULT_PORT: u16 = 3000;

    /// Where a request to the risk API is issued from.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ExecutionContext {
        Server,
        Browser,
    }

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub public_api_url: Option<String>,
        pub internal_api_url: Option<String>,
        pub api_timeout_secs: Option<String>,
        pub watchlist: Option<String>,
        pub watchlist_refresh_secs: Option<String>,
        pub port: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
        where
            F: Fn(&str) -> Option<String>,
        {
            let settings = Self {
                public_api_url: lookup("RISK_API_PUBLIC_URL"),
                internal_api_url: lookup("RISK_API_INTERNAL_URL"),
                api_timeout_secs: lookup("RISK_API_TIMEOUT_SECS"),
                watchlist: lookup("WATCHLIST"),
                watchlist_refresh_secs: lookup("WATCHLIST_REFRESH_SECS"),
                port: lookup("PORT"),
                sentry_dsn: lookup("SENTRY_DSN").filter(|s| !s.trim().is_empty()),
            };
            settings.validate()?;
            Ok(settings)
        }

        fn validate(&self) -> anyhow::Result<()> {
            parse_optional::<u64>(self.api_timeout_secs.as_deref())
                .context("RISK_API_TIMEOUT_SECS must be a whole number of seconds")?;
            parse_optional::<u64>(self.watchlist_refresh_secs.as_deref())
                .context("WATCHLIST_REFRESH_SECS must be a whole number of seconds")?;
            parse_optional::<u16>(self.port.as_deref()).context("PORT must be a valid port")?;
            Ok(())
        }

        /// Resolves the risk API base URL for the given execution context.
        ///
        /// The server prefers the internal URL when one is configured, the browser always uses
        /// the public one. Trailing slashes are stripped.
        pub fn api_base_url(&self, context: ExecutionContext) -> &str {
            let internal = match context {
                ExecutionContext::Server => non_blank(self.internal_api_url.as_deref()),
                ExecutionContext::Browser => None,
            };
            internal
                .or_else(|| non_blank(self.public_api_url.as_deref()))
                .unwrap_or(DEFAULT_PUBLIC_API_URL)
                .trim_end_matches('/')
        }

        pub fn api_timeout(&self) -> Duration {
            let secs = parse_optional(self.api_timeout_secs.as_deref())
                .ok()
                .flatten()
                .unwrap_or(DEFAULT_TIMEOUT_SECS);
            Duration::from_secs(secs)
        }

        pub fn watchlist_refresh_interval(&self) -> Duration {
            let secs = parse_optional(self.watchlist_refresh_secs.as_deref())
                .ok()
                .flatten()
                .filter(|&s| s > 0)
                .unwrap_or(DEFAULT_REFRESH_SECS);
            Duration::from_secs(secs)
        }

        pub fn port(&self) -> u16 {
            parse_optional(self.port.as_deref())
                .ok()
                .flatten()
                .unwrap_or(DEFAULT_PORT)
        }

        pub fn watchlist(&self) -> Vec<String> {
            let configured: Vec<String> = self
                .watchlist
                .as_deref()
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_uppercase)
                .collect();

            if configured.is_empty() {
                DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect()
            } else {
                configured
            }
        }
    }

    fn non_blank(value: Option<&str>) -> Option<&str> {
        value.filter(|s| !s.trim().is_empty()).map(str::trim)
    }

    fn parse_optional<T: std::str::FromStr>(value: Option<&str>) -> anyhow::Result<Option<T>>
    where
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match non_blank(value) {
            Some(s) => Ok(Some(s.parse::<T>()?)),
            None => Ok(None),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::collections::HashMap;

        fn settings(vars: &[(&str, &str)]) -> Settings {
            let vars: HashMap<String, String> = vars
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            Settings::from_lookup(|key| vars.get(key).cloned()).unwrap()
        }

        #[test]
        fn server_prefers_internal_url() {
            let s = settings(&[
                ("RISK_API_PUBLIC_URL", "https://api.example.com/"),
                ("RISK_API_INTERNAL_URL", "http://backend:8000/"),
            ]);
            assert_eq!(s.api_base_url(ExecutionContext::Server), "http://backend:8000");
            assert_eq!(
                s.api_base_url(ExecutionContext::Browser),
                "https://api.example.com"
            );
        }

        #[test]
        fn server_falls_back_to_public_url() {
            let s = settings(&[
                ("RISK_API_PUBLIC_URL", "https://api.example.com"),
                ("RISK_API_INTERNAL_URL", "  "),
            ]);
            assert_eq!(
                s.api_base_url(ExecutionContext::Server),
                "https://api.example.com"
            );
        }

        #[test]
        fn defaults_when_unset() {
            let s = settings(&[]);
            assert_eq!(s.api_base_url(ExecutionContext::Server), DEFAULT_PUBLIC_API_URL);
            assert_eq!(s.api_timeout(), Duration::from_secs(30));
            assert_eq!(s.watchlist_refresh_interval(), Duration::from_secs(30));
            assert_eq!(s.port(), 3000);
            assert_eq!(s.watchlist(), vec!["AAPL", "MSFT", "NVDA", "GOOGL", "AMZN"]);
            assert!(s.sentry_dsn.is_none());
        }

        #[test]
        fn parses_watchlist_override() {
            let s = settings(&[("WATCHLIST", " tsla, ,meta ")]);
            assert_eq!(s.watchlist(), vec!["TSLA", "META"]);
        }

        #[test]
        fn rejects_malformed_numbers() {
            let res = Settings::from_lookup(|key| (key == "PORT").then(|| "http".to_string()));
            assert!(res.is_err());
        }
    }
}
