//! HTTP order publisher.
//!
//! One POST per order, no retries. A fresh time-window token is minted for
//! every request so long-running sessions survive window rollovers.

use std::time::Duration;

use async_trait::async_trait;
use relay_core::{API_TOKEN_HEADER, Order, TimeTokenSigner, TokenError};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::application::ports::{OrderPublisher, PublishOutcome, PublishTarget};
use crate::infrastructure::config::SimulatorConfig;

/// Publish failure, folded into [`PublishOutcome::Failed`] at the port.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Token could not be minted.
    #[error("token generation failed: {0}")]
    Token(#[from] TokenError),

    /// Endpoint URL is not valid.
    #[error("invalid endpoint URL {url}: {reason}")]
    InvalidUrl {
        /// Configured URL.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// Connection, timeout, or body read failure.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Relay answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Rejected {
        /// Status code.
        status: u16,
        /// Trimmed response body, possibly empty.
        body: String,
    },
}

impl PublishError {
    /// Text shown to the operator: the relay's body when it sent one.
    #[must_use]
    pub fn operator_message(&self) -> String {
        match self {
            Self::Rejected { body, .. } if !body.is_empty() => body.clone(),
            Self::Rejected { status, .. } => reqwest::StatusCode::from_u16(*status)
                .map_or_else(|_| format!("HTTP {status}"), |s| format!("HTTP {s}")),
            other => other.to_string(),
        }
    }
}

/// reqwest-backed [`OrderPublisher`].
#[derive(Debug, Clone)]
pub struct HttpOrderPublisher {
    client: Client,
    signer: TimeTokenSigner,
    private_url: String,
    public_url: String,
}

impl HttpOrderPublisher {
    /// Build a publisher for the configured endpoints.
    pub fn from_config(config: &SimulatorConfig) -> Result<Self, PublishError> {
        Self::new(
            config.signer()?,
            &config.api_url,
            &config.publish_url,
            config.request_timeout,
        )
    }

    /// Build a publisher for explicit endpoints.
    pub fn new(
        signer: TimeTokenSigner,
        private_url: &str,
        public_url: &str,
        timeout: Duration,
    ) -> Result<Self, PublishError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            signer,
            private_url: private_url.to_string(),
            public_url: public_url.to_string(),
        })
    }

    /// Request URL for `target` and `channel`.
    ///
    /// The private endpoint only carries `channel` when it is non-empty;
    /// the public endpoint always does.
    pub fn endpoint(&self, target: PublishTarget, channel: &str) -> Result<Url, PublishError> {
        let base = match target {
            PublishTarget::Private => &self.private_url,
            PublishTarget::Public => &self.public_url,
        };

        let mut url = Url::parse(base).map_err(|e| PublishError::InvalidUrl {
            url: base.clone(),
            reason: e.to_string(),
        })?;

        if target == PublishTarget::Public || !channel.is_empty() {
            url.query_pairs_mut().append_pair("channel", channel);
        }

        Ok(url)
    }

    async fn try_publish(
        &self,
        order: &Order,
        target: PublishTarget,
        channel: &str,
    ) -> Result<Option<Value>, PublishError> {
        let token = self.signer.current_token()?;
        let url = self.endpoint(target, channel)?;

        let response = self
            .client
            .post(url)
            .header(API_TOKEN_HEADER, token)
            .json(order)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(
            serde_json::from_str(&body).unwrap_or(Value::String(body)),
        ))
    }
}

#[async_trait]
impl OrderPublisher for HttpOrderPublisher {
    async fn publish(&self, order: &Order, target: PublishTarget, channel: &str) -> PublishOutcome {
        match self.try_publish(order, target, channel).await {
            Ok(response) => {
                tracing::info!(
                    order_id = %order.id,
                    target = target.as_str(),
                    channel = %channel,
                    "Order published"
                );
                PublishOutcome::Sent { response }
            }
            Err(e) => {
                tracing::warn!(
                    order_id = %order.id,
                    target = target.as_str(),
                    channel = %channel,
                    error = %e,
                    "Order publish failed"
                );
                PublishOutcome::Failed {
                    error: e.operator_message(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn publisher() -> HttpOrderPublisher {
        HttpOrderPublisher::new(
            TimeTokenSigner::new("secret", 3600).unwrap(),
            "http://localhost:8080/update",
            "http://localhost:8080/publish",
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test_case(PublishTarget::Private, "", "http://localhost:8080/update" ; "private without channel")]
    #[test_case(PublishTarget::Private, "vip", "http://localhost:8080/update?channel=vip" ; "private with channel")]
    #[test_case(PublishTarget::Public, "", "http://localhost:8080/publish?channel=" ; "public without channel")]
    #[test_case(PublishTarget::Public, "vip", "http://localhost:8080/publish?channel=vip" ; "public with channel")]
    fn endpoint_query(target: PublishTarget, channel: &str, expected: &str) {
        let url = publisher().endpoint(target, channel).unwrap();
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn channel_is_encoded() {
        let url = publisher()
            .endpoint(PublishTarget::Public, "a&b=c")
            .unwrap();
        assert_eq!(url.query(), Some("channel=a%26b%3Dc"));
        let (_, value) = url.query_pairs().next().unwrap();
        assert_eq!(value, "a&b=c");
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let publisher = HttpOrderPublisher::new(
            TimeTokenSigner::new("secret", 3600).unwrap(),
            "not a url",
            "http://localhost:8080/publish",
            Duration::from_secs(1),
        )
        .unwrap();
        assert!(matches!(
            publisher.endpoint(PublishTarget::Private, "x"),
            Err(PublishError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn operator_message_prefers_body() {
        let with_body = PublishError::Rejected {
            status: 401,
            body: "Invalid or expired token".into(),
        };
        assert_eq!(with_body.operator_message(), "Invalid or expired token");

        let without_body = PublishError::Rejected {
            status: 503,
            body: String::new(),
        };
        assert_eq!(without_body.operator_message(), "HTTP 503 Service Unavailable");
    }
}
