//! OAuth 1.0a request signing (HMAC-SHA1), as used by the Twitter v1.1 API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distr::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

use crate::error::SentimentError;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters stay literal; everything else is escaped.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub(crate) fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// Encode `params` as a query string using OAuth percent-encoding.
pub(crate) fn encode_query(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Parse an `application/x-www-form-urlencoded` token response body.
pub(crate) fn parse_form(body: &str) -> Vec<(String, String)> {
    body.trim()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            let decode = |s: &str| percent_decode_str(&s.replace('+', " ")).decode_utf8_lossy().into_owned();
            (decode(k), decode(v))
        })
        .collect()
}

/// Signature base string: `METHOD&enc(url)&enc(sorted params)`.
pub(crate) fn signature_base_string(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    encoded.sort();
    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(url),
        encode(&param_string)
    )
}

/// Base64 HMAC-SHA1 of `base` keyed by `enc(consumer_secret)&enc(token_secret)`.
pub(crate) fn sign(
    base: &str,
    consumer_secret: &str,
    token_secret: &str,
) -> Result<String, SentimentError> {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| SentimentError::Authorization(format!("invalid signing key: {e}")))?;
    mac.update(base.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

fn nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Consumer credentials plus an optional (request or access) token.
#[derive(Clone)]
pub(crate) struct Signer {
    consumer_key: String,
    consumer_secret: String,
    token: Option<String>,
    token_secret: String,
}

impl Signer {
    pub(crate) fn consumer(consumer_key: &str, consumer_secret: &str) -> Self {
        Self {
            consumer_key: consumer_key.to_string(),
            consumer_secret: consumer_secret.to_string(),
            token: None,
            token_secret: String::new(),
        }
    }

    pub(crate) fn with_token(&self, token: &str, token_secret: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            token_secret: token_secret.to_string(),
            ..self.clone()
        }
    }

    /// `Authorization` header value for one request.
    ///
    /// `query` holds the request's query/body parameters (signed but not sent
    /// in the header); `extra` holds additional `oauth_*` parameters such as
    /// `oauth_callback` or `oauth_verifier`.
    pub(crate) fn authorization(
        &self,
        method: &str,
        url: &str,
        query: &[(&str, &str)],
        extra: &[(&str, &str)],
    ) -> Result<String, SentimentError> {
        let timestamp = chrono::Utc::now().timestamp();
        self.authorization_at(method, url, query, extra, &nonce(), timestamp)
    }

    fn authorization_at(
        &self,
        method: &str,
        url: &str,
        query: &[(&str, &str)],
        extra: &[(&str, &str)],
        nonce: &str,
        timestamp: i64,
    ) -> Result<String, SentimentError> {
        let timestamp = timestamp.to_string();
        let mut oauth: Vec<(&str, &str)> = vec![
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_version", "1.0"),
        ];
        if let Some(token) = &self.token {
            oauth.push(("oauth_token", token.as_str()));
        }
        oauth.extend_from_slice(extra);

        let mut signed = oauth.clone();
        signed.extend_from_slice(query);
        let base = signature_base_string(method, url, &signed);
        let signature = sign(&base, &self.consumer_secret, &self.token_secret)?;

        oauth.push(("oauth_signature", signature.as_str()));
        oauth.sort_unstable();
        let fields = oauth
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("OAuth {fields}"))
    }
}
