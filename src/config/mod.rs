use crate::cli::Args;
use crate::error::ConfigError;
use url::Url;

/// Validated settings for one chat session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub endpoint: Url,
    pub greeting: String,
    pub health_check: bool,
}

impl SessionConfig {
    pub fn new(endpoint: &str, greeting: &str) -> Result<Self, ConfigError> {
        let endpoint = parse_endpoint(endpoint)?;
        if greeting.trim().is_empty() {
            return Err(ConfigError::EmptyGreeting);
        }

        Ok(Self {
            endpoint,
            greeting: greeting.to_string(),
            health_check: true,
        })
    }

    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let mut config = Self::new(&args.endpoint, &args.greeting)?;
        config.health_check = !args.skip_health_check;
        Ok(config)
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidEndpoint {
        endpoint: raw.to_string(),
        source: e,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_are_valid() {
        let args = Args::parse_from(["chat-session"]);
        let config = SessionConfig::from_args(&args).unwrap();
        assert_eq!(config.endpoint.as_str(), "http://127.0.0.1:10000/chat");
        assert!(config.greeting.starts_with("Hello!"));
        assert!(config.health_check);
    }

    #[test]
    fn rejects_bad_endpoints() {
        assert!(matches!(
            SessionConfig::new("not a url", "hi"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            SessionConfig::new("ftp://example.com/chat", "hi"),
            Err(ConfigError::UnsupportedScheme(s)) if s == "ftp"
        ));
    }

    #[test]
    fn rejects_blank_greeting() {
        assert!(matches!(
            SessionConfig::new("http://localhost/chat", "   "),
            Err(ConfigError::EmptyGreeting)
        ));
    }
}
