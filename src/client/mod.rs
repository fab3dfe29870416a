//! Multilogin API client.
//!
//! [`MultiloginClient`] owns one identity (or none, for automation-delegated
//! clients), one [`TokenStore`] and one HTTP transport. Every authorized call
//! goes through [`MultiloginClient::ensure_authorized`], which decides lazily
//! whether to sign in, refresh or mint an automation token. There is no
//! background refresh.

pub mod launcher;
pub mod request;

use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::adapters::{ReqwestHttpClient, SystemClock};
use crate::auth::flows;
use crate::auth::{
    plan_access, plan_authorization, AuthStep, Identity, IssuedToken, TokenPolicy, TokenStatus,
    TokenStore,
};
use crate::config::ClientConfig;
use crate::error::{MultiloginError, MultiloginResult};
use crate::models::Envelope;
use crate::traits::{Clock, HttpClient};

pub use request::{ApiRequest, ApiTransport, QueryParams, Target};

/// Client for the Multilogin API and launcher.
///
/// The token store sits behind an async mutex that is held for the whole
/// authorization decision, including any flows it triggers. Concurrent callers
/// sharing one client therefore never run two refreshes at once. The lock is
/// released before the business request itself is sent.
pub struct MultiloginClient {
    identity: Option<Identity>,
    tokens: Mutex<TokenStore>,
    transport: ApiTransport,
    clock: Arc<dyn Clock>,
    policy: TokenPolicy,
    automation_period: String,
}

impl MultiloginClient {
    /// Interactive client using the default configuration. No network call
    /// is made until the first authorized request.
    pub fn new(email: &str, password: &str) -> MultiloginResult<Self> {
        Self::with_config(email, password, ClientConfig::default())
    }

    /// Interactive client with an explicit configuration.
    pub fn with_config(email: &str, password: &str, config: ClientConfig) -> MultiloginResult<Self> {
        let identity = Identity::new(email, password)?;
        Self::build(Some(identity), TokenStore::new(), &config)
    }

    /// Interactive client that signs in before returning.
    pub async fn authenticated(email: &str, password: &str) -> MultiloginResult<Self> {
        Self::authenticated_with_config(email, password, ClientConfig::default()).await
    }

    pub async fn authenticated_with_config(
        email: &str,
        password: &str,
        config: ClientConfig,
    ) -> MultiloginResult<Self> {
        let client = Self::with_config(email, password, config)?;
        client.ensure_authorized().await?;
        Ok(client)
    }

    /// Automation-delegated client holding only a pre-issued automation token.
    pub fn from_automation_token(token: &str) -> MultiloginResult<Self> {
        Self::from_automation_token_with_config(token, ClientConfig::default())
    }

    pub fn from_automation_token_with_config(
        token: &str,
        config: ClientConfig,
    ) -> MultiloginResult<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(MultiloginError::Configuration(
                "automation token cannot be empty".to_string(),
            ));
        }
        let token = IssuedToken::parse(token)?;
        tracing::debug!(
            token = %token.preview(),
            expires_at = %token.expires_at(),
            "Using pre-issued automation token"
        );
        Self::build(None, TokenStore::with_automation(token), &config)
    }

    fn build(
        identity: Option<Identity>,
        store: TokenStore,
        config: &ClientConfig,
    ) -> MultiloginResult<Self> {
        let http: Arc<dyn HttpClient> =
            Arc::new(ReqwestHttpClient::with_timeout(config.request_timeout)?);
        Ok(Self {
            identity,
            tokens: Mutex::new(store),
            transport: ApiTransport::new(http, config),
            clock: Arc::new(SystemClock),
            policy: config.token_policy(),
            automation_period: config.automation_expiration_period.clone(),
        })
    }

    /// Replace the HTTP client (tests, proxies).
    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.transport = self.transport.with_http_client(http);
        self
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Email of the password identity, if any.
    pub fn email(&self) -> Option<&str> {
        self.identity.as_ref().map(Identity::email)
    }

    pub fn transport(&self) -> &ApiTransport {
        &self.transport
    }

    /// Whether this client was built from an automation token or has minted one.
    pub async fn is_automation_delegated(&self) -> bool {
        self.tokens.lock().await.is_automation_delegated()
    }

    /// Make sure a usable token exists, running sign-in, refresh or
    /// automation-token minting as needed.
    ///
    /// A failed flow leaves the stored tokens untouched and is returned as is;
    /// nothing is retried.
    pub async fn ensure_authorized(&self) -> MultiloginResult<()> {
        let mut store = self.tokens.lock().await;
        self.authorize_locked(&mut store).await
    }

    /// Token that would be attached to a request right now, if any.
    pub async fn best_token(&self) -> Option<String> {
        let store = self.tokens.lock().await;
        store
            .best_token(self.clock.now(), &self.policy)
            .map(str::to_string)
    }

    /// Snapshot of the held tokens and their expiries.
    pub async fn token_status(&self) -> TokenStatus {
        let store = self.tokens.lock().await;
        store.status(self.clock.now(), &self.policy)
    }

    /// Perform a request and decode its envelope into `T`.
    ///
    /// Authorized requests fail with
    /// [`MultiloginError::AuthorizationUnavailable`] without touching the
    /// network when no usable token remains after authorization. The
    /// envelope status is not checked here; see [`Envelope::into_data`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> MultiloginResult<Envelope<T>> {
        let bearer = if request.requires_auth {
            let mut store = self.tokens.lock().await;
            self.authorize_locked(&mut store).await?;
            match store.best_token(self.clock.now(), &self.policy) {
                Some(token) => Some(token.to_string()),
                None => {
                    tracing::warn!(endpoint = %request.endpoint, "No usable token after authorization");
                    return Err(MultiloginError::AuthorizationUnavailable);
                }
            }
        } else {
            None
        };

        self.transport.execute(&request, bearer.as_deref()).await
    }

    /// Mint a new automation token from the interactive session and return it.
    ///
    /// From then on the client follows the automation path and re-mints the
    /// token on its own once it expires.
    pub async fn issue_automation_token(&self) -> MultiloginResult<String> {
        let mut store = self.tokens.lock().await;
        let mut steps = plan_access(&store, self.clock.now(), &self.policy);
        steps.push(AuthStep::MintAutomation);
        self.run_steps(&mut store, &steps).await?;

        store
            .automation()
            .map(|token| token.value().to_string())
            .ok_or(MultiloginError::AuthorizationUnavailable)
    }

    async fn authorize_locked(&self, store: &mut TokenStore) -> MultiloginResult<()> {
        let steps = plan_authorization(store, self.clock.now(), &self.policy);
        if steps.is_empty() {
            tracing::debug!("Stored token is usable");
            return Ok(());
        }
        self.run_steps(store, &steps).await
    }

    async fn run_steps(&self, store: &mut TokenStore, steps: &[AuthStep]) -> MultiloginResult<()> {
        tracing::debug!(
            steps = ?steps.iter().map(AuthStep::as_str).collect::<Vec<_>>(),
            "Authorization required"
        );
        for step in steps {
            self.run_step(store, *step).await?;
        }
        Ok(())
    }

    async fn run_step(&self, store: &mut TokenStore, step: AuthStep) -> MultiloginResult<()> {
        match step {
            AuthStep::SignIn => {
                let identity = self.require_identity(step)?;
                let session = flows::sign_in(&self.transport, identity).await?;
                store.set_session(session.access, session.refresh);
            }
            AuthStep::Refresh => {
                let identity = self.require_identity(step)?;
                let refresh_token = store
                    .refresh()
                    .ok_or_else(|| {
                        MultiloginError::Configuration("no refresh token to refresh with".to_string())
                    })?
                    .to_string();
                let session = flows::refresh(&self.transport, identity, &refresh_token).await?;
                store.set_session(session.access, session.refresh);
            }
            AuthStep::MintAutomation => {
                let access = store
                    .access()
                    .filter(|t| t.is_usable_at(self.clock.now(), self.policy.access_margin))
                    .map(|t| t.value().to_string())
                    .ok_or(MultiloginError::AuthorizationUnavailable)?;
                let token =
                    flows::mint_automation(&self.transport, &access, &self.automation_period)
                        .await?;
                store.set_automation(token);
            }
        }
        Ok(())
    }

    fn require_identity(&self, step: AuthStep) -> MultiloginResult<&Identity> {
        self.identity.as_ref().ok_or_else(|| {
            MultiloginError::Configuration(format!(
                "{} requires an email and password; this client only holds an automation token",
                step.as_str()
            ))
        })
    }
}

impl fmt::Debug for MultiloginClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiloginClient")
            .field("identity", &self.identity)
            .field("transport", &self.transport)
            .field("policy", &self.policy)
            .field("automation_period", &self.automation_period)
            .finish_non_exhaustive()
    }
}
