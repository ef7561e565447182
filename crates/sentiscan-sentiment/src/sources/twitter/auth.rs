//! Out-of-band PIN authorization capability.

use std::io::{BufRead, Write};

use async_trait::async_trait;

use crate::error::SentimentError;

/// An OAuth 1.0a token pair (request token or access token).
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub secret: String,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &self.token)
            .field("secret", &"[redacted]")
            .finish()
    }
}

/// Obtains the verifier PIN after the user approves access at `authorize_url`.
///
/// The terminal implementation asks a human; tests substitute a fixed PIN.
#[async_trait]
pub trait PinAuthorizer: Send + Sync {
    async fn pin(&self, authorize_url: &str) -> Result<String, SentimentError>;
}

/// Opens the authorization URL in the default browser, prints it to stderr
/// as a fallback, and reads the PIN from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPinPrompt;

#[async_trait]
impl PinAuthorizer for TerminalPinPrompt {
    async fn pin(&self, authorize_url: &str) -> Result<String, SentimentError> {
        let url = authorize_url.to_string();
        tokio::task::spawn_blocking(move || {
            prompt_pin(
                &url,
                webbrowser::open,
                std::io::stdin().lock(),
                std::io::stderr().lock(),
            )
        })
        .await
        .map_err(|e| SentimentError::Authorization(format!("PIN prompt aborted: {e}")))?
    }
}

/// Launch `authorize_url`, echo it to `output`, then read one PIN line from `input`.
///
/// A browser launch failure is logged and the printed URL is used instead.
pub(crate) fn prompt_pin<R, W, F>(
    authorize_url: &str,
    open_browser: F,
    mut input: R,
    mut output: W,
) -> Result<String, SentimentError>
where
    R: BufRead,
    W: Write,
    F: FnOnce(&str) -> std::io::Result<()>,
{
    let io_err = |e: std::io::Error| SentimentError::Authorization(format!("PIN prompt failed: {e}"));

    if let Err(err) = open_browser(authorize_url) {
        tracing::warn!(error = %err, "could not open browser for Twitter authorization");
    }

    writeln!(output, "Authorize sentiscan in your browser:\n  {authorize_url}").map_err(io_err)?;
    write!(output, "What's the pin value? ").map_err(io_err)?;
    output.flush().map_err(io_err)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(io_err)?;
    let pin = line.trim();
    if pin.is_empty() {
        return Err(SentimentError::Authorization("no PIN entered".to_string()));
    }
    Ok(pin.to_string())
}
