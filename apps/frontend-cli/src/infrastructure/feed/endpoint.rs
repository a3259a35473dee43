//! Feed URL construction.

use url::Url;

use super::FeedClientError;
use crate::infrastructure::config::FrontendConfig;

const PRIVATE_SUFFIX: &str = "/ws";
const PUBLIC_SUFFIX: &str = "/ws/public";

/// Which feed to subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ConnectionMode {
    /// Private feed, authenticated with a signed token.
    #[default]
    Auth,
    /// Public feed, no token.
    Public,
}

impl ConnectionMode {
    /// Mode for an answer to the startup prompt: `2` is public, anything else auth.
    #[must_use]
    pub fn from_answer(answer: &str) -> Self {
        if answer.trim() == "2" {
            Self::Public
        } else {
            Self::Auth
        }
    }

    /// Label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Public => "public",
        }
    }
}

/// Feed URL for `mode`, with an optional `channel` query parameter.
///
/// The private URL is `ws_url` plus a `token` signed at `now_secs`. The public
/// URL swaps a trailing `/ws` path for `/ws/public`, or failing that the first
/// `/ws` anywhere in the URL.
pub fn feed_url(
    config: &FrontendConfig,
    mode: ConnectionMode,
    channel: Option<&str>,
    now_secs: i64,
) -> Result<Url, FeedClientError> {
    let mut url = match mode {
        ConnectionMode::Auth => {
            let mut url = parse(&config.ws_url)?;
            let token = config.sign_token(now_secs)?;
            url.query_pairs_mut().append_pair("token", &token);
            url
        }
        ConnectionMode::Public => public_url(&config.ws_url)?,
    };

    if let Some(channel) = channel.filter(|c| !c.is_empty()) {
        url.query_pairs_mut().append_pair("channel", channel);
    }

    Ok(url)
}

fn public_url(ws_url: &str) -> Result<Url, FeedClientError> {
    let mut url = parse(ws_url)?;
    if url.path().ends_with(PRIVATE_SUFFIX) {
        let path = format!("{}/public", url.path());
        url.set_path(&path);
        return Ok(url);
    }
    parse(&ws_url.replacen(PRIVATE_SUFFIX, PUBLIC_SUFFIX, 1))
}

fn parse(raw: &str) -> Result<Url, FeedClientError> {
    Url::parse(raw).map_err(|e| FeedClientError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}
