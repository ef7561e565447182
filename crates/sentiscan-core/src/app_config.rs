use std::path::PathBuf;

use crate::ConfigError;

/// Which sentiment classifier scores the aggregated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierBackend {
    /// Pretrained sequence-classification model served by TEI.
    Tei,
    /// Offline word-weight lexicon.
    Lexicon,
}

impl std::fmt::Display for ClassifierBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierBackend::Tei => write!(f, "tei"),
            ClassifierBackend::Lexicon => write!(f, "lexicon"),
        }
    }
}

impl std::str::FromStr for ClassifierBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tei" => Ok(ClassifierBackend::Tei),
            "lexicon" => Ok(ClassifierBackend::Lexicon),
            other => Err(format!(
                "unknown classifier '{other}' (expected 'tei' or 'lexicon')"
            )),
        }
    }
}

/// Script-app credentials for the Reddit password grant.
#[derive(Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// OAuth 1.0a consumer credentials for the Twitter PIN flow.
#[derive(Clone)]
pub struct TwitterCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
}

impl std::fmt::Debug for TwitterCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterCredentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub output_path: PathBuf,
    pub classifier: ClassifierBackend,
    pub tei_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub source_limit: usize,
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    pub reddit_username: Option<String>,
    pub reddit_password: Option<String>,
    pub twitter_consumer_key: Option<String>,
    pub twitter_consumer_secret: Option<String>,
}

impl AppConfig {
    /// Reddit credentials, if all four variables were set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] naming the first absent variable.
    pub fn reddit_credentials(&self) -> Result<RedditCredentials, ConfigError> {
        Ok(RedditCredentials {
            client_id: required(self.reddit_client_id.as_deref(), "REDDIT_CLIENT_ID")?,
            client_secret: required(self.reddit_client_secret.as_deref(), "REDDIT_CLIENT_SECRET")?,
            username: required(self.reddit_username.as_deref(), "REDDIT_USERNAME")?,
            password: required(self.reddit_password.as_deref(), "REDDIT_PASSWORD")?,
        })
    }

    /// Twitter consumer credentials, if both variables were set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] naming the first absent variable.
    pub fn twitter_credentials(&self) -> Result<TwitterCredentials, ConfigError> {
        Ok(TwitterCredentials {
            consumer_key: required(self.twitter_consumer_key.as_deref(), "TWITTER_CONSUMER_KEY")?,
            consumer_secret: required(self.twitter_consumer_secret.as_deref(), "TWITTER_CONSUMER_SECRET")?,
        })
    }
}

fn required(value: Option<&str>, var: &str) -> Result<String, ConfigError> {
    value
        .map(ToString::to_string)
        .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[redacted]");
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("output_path", &self.output_path)
            .field("classifier", &self.classifier)
            .field("tei_url", &self.tei_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("source_limit", &self.source_limit)
            .field("reddit_client_id", &self.reddit_client_id)
            .field("reddit_client_secret", &redact(&self.reddit_client_secret))
            .field("reddit_username", &self.reddit_username)
            .field("reddit_password", &redact(&self.reddit_password))
            .field("twitter_consumer_key", &self.twitter_consumer_key)
            .field(
                "twitter_consumer_secret",
                &redact(&self.twitter_consumer_secret),
            )
            .finish()
    }
}
