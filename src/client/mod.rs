//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    AccountSid, AuthToken, DeliveryReceipt, ErrorCode, OutboundSms, ValidationError,
};

const DEFAULT_API_BASE: &str = "https://api.twilio.com";
const MESSAGES_API_VERSION: &str = "2010-04-01";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        auth: (&'a str, &'a str),
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        auth: (&'a str, &'a str),
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .basic_auth(auth.0, Some(auth.1))
                .form(&params)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Twilio API credentials: account SID (basic-auth username) and auth token
/// (basic-auth password).
pub struct Credentials {
    account_sid: AccountSid,
    auth_token: AuthToken,
}

impl Credentials {
    /// Create credentials from already-validated domain values.
    pub fn new(account_sid: AccountSid, auth_token: AuthToken) -> Self {
        Self {
            account_sid,
            auth_token,
        }
    }

    /// Create credentials from raw strings, validating that both parts are
    /// non-empty.
    pub fn from_parts(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            account_sid: AccountSid::new(account_sid)?,
            auth_token: AuthToken::new(auth_token)?,
        })
    }

    /// Borrow the account SID.
    pub fn account_sid(&self) -> &AccountSid {
        &self.account_sid
    }

    fn basic_auth(&self) -> (&str, &str) {
        (self.account_sid.as_str(), self.auth_token.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`TwilioClient`].
///
/// This error preserves:
/// - HTTP-level failures (transport failures, or non-2xx responses whose
///   body could not be decoded),
/// - API-level failures (provider error code + message, verbatim),
/// - validation/parse failures.
pub enum TwilioError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-2xx HTTP response whose body did not decode as a provider error.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The provider rejected the message-create call with an error object.
    #[error("API error {}: {}", .code.as_i64(), .message)]
    Api {
        code: ErrorCode,
        message: String,
        more_info: Option<String>,
    },

    /// A 2xx response body could not be parsed as a message resource.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// The configured API base URL is not a valid URL.
    #[error("invalid API base URL: {0}")]
    InvalidApiBase(#[from] url::ParseError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`TwilioClient`].
///
/// Use this when you need to customize the API base URL (tests point it at a
/// local mock server), timeout, or user-agent.
pub struct TwilioClientBuilder {
    credentials: Credentials,
    api_base: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TwilioClientBuilder {
    /// Create a builder with the default API base and no timeout/user-agent
    /// override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base: DEFAULT_API_BASE.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API base URL (everything before `/2010-04-01/...`).
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`TwilioClient`].
    pub fn build(self) -> Result<TwilioClient, TwilioError> {
        let api_base = url::Url::parse(&self.api_base)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| TwilioError::Transport(Box::new(err)))?;

        Ok(TwilioClient {
            credentials: self.credentials,
            api_base: api_base.as_str().trim_end_matches('/').to_owned(),
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Twilio message-create client.
///
/// This type orchestrates form encoding, the single outbound HTTP call, and
/// response decoding. By default it talks to `https://api.twilio.com`; the
/// builder can point it elsewhere. One call is made per message; failures
/// are never retried here.
pub struct TwilioClient {
    credentials: Credentials,
    api_base: String,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for TwilioClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioClient")
            .field("credentials", &self.credentials)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl TwilioClient {
    /// Create a client for the default API base.
    ///
    /// For more customization, use [`TwilioClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base: DEFAULT_API_BASE.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> TwilioClientBuilder {
        TwilioClientBuilder::new(credentials)
    }

    /// Send one SMS through the provider's message-create endpoint.
    ///
    /// Errors:
    /// - [`TwilioError::Api`] when the provider returns an error object
    ///   (invalid number, auth failure, rate limit, ...); the code and
    ///   message are preserved verbatim,
    /// - [`TwilioError::HttpStatus`] for non-2xx responses without a
    ///   decodable error body,
    /// - [`TwilioError::Transport`] / [`TwilioError::Parse`] for connection
    ///   and decoding failures.
    pub async fn send_message(&self, sms: OutboundSms) -> Result<DeliveryReceipt, TwilioError> {
        let url = self.messages_endpoint();
        let params = crate::transport::encode_send_message_form(&sms);

        let response = self
            .http
            .post_form(&url, self.credentials.basic_auth(), params)
            .await
            .map_err(TwilioError::Transport)?;

        if (200..=299).contains(&response.status) {
            return crate::transport::decode_send_message_response(&response.body)
                .map_err(|err| TwilioError::Parse(Box::new(err)));
        }

        match crate::transport::decode_error_response(&response.body) {
            Ok(failure) => Err(TwilioError::Api {
                code: failure.code,
                message: failure.message,
                more_info: failure.more_info,
            }),
            Err(_) => {
                let body = if response.body.trim().is_empty() {
                    None
                } else {
                    Some(response.body)
                };
                Err(TwilioError::HttpStatus {
                    status: response.status,
                    body,
                })
            }
        }
    }

    fn messages_endpoint(&self) -> String {
        format!(
            "{}/{}/Accounts/{}/Messages.json",
            self.api_base,
            MESSAGES_API_VERSION,
            self.credentials.account_sid().as_str()
        )
    }
}
