// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP gateway for Elkron panels.

use std::time::Duration;

use parking_lot::Mutex;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, ParseError, ProtocolError};
use crate::protocol::Gateway;
use crate::response::{DetailedState, LoginResponse, PlantStructure};
use crate::types::{ZoneId, ZoneSet};

const LOGIN_PATH: &str = "/api/login";
const STATES_PATH: &str = "/api/states";
const SYSINFO_PATH: &str = "/api/sysinfo";
const STRUCTURE_PATH: &str = "/api/structure";
const ACTIVATE_PATH: &str = "/api/activate";
const DEACTIVATE_PATH: &str = "/api/deactivate";

/// Header carrying the session token.
pub(crate) const SESSION_HEADER: &str = "X-Session-Token";

// ============================================================================
// HttpConfig
// ============================================================================

/// Connection parameters for an Elkron panel.
///
/// # Examples
///
/// ```
/// use elkron_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.20")
///     .with_port(8080)
///     .with_credentials("installer", "secret")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "http://192.168.1.20:8080");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    use_https: bool,
    credentials: Option<Credentials>,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given host.
    ///
    /// The host may carry an explicit `http://` or `https://` scheme, in
    /// which case it is used verbatim as the base URL.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            credentials: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    ///
    /// If port hasn't been explicitly set, it will be changed to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Sets the login credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the credentials if set.
    #[must_use]
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            return self.host.trim_end_matches('/').to_string();
        }

        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix =
            if (self.use_https && self.port == 443) || (!self.use_https && self.port == 80) {
                String::new()
            } else {
                format!(":{}", self.port)
            };
        format!("{scheme}://{}{port_suffix}", self.host)
    }

    /// Creates an [`HttpGateway`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be created.
    pub fn into_gateway(self) -> Result<HttpGateway, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }

        let base_url = self.base_url();
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpGateway {
            base_url,
            client,
            credentials: self.credentials,
            session: Mutex::new(None),
        })
    }
}

/// Panel login credentials.
#[derive(Clone)]
pub struct Credentials {
    /// Username for the panel web interface.
    pub username: String,
    /// Password for the panel web interface.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// HttpGateway
// ============================================================================

/// [`Gateway`] speaking the panel's JSON web API.
///
/// A session token obtained by [`login`](Gateway::login) is attached to every
/// following request.
///
/// # Examples
///
/// ```no_run
/// use elkron_lib::protocol::{Gateway, HttpConfig};
///
/// # async fn example() -> elkron_lib::Result<()> {
/// let gateway = HttpConfig::new("192.168.1.20")
///     .with_credentials("installer", "secret")
///     .into_gateway()?;
///
/// gateway.login().await?;
/// let state = gateway.fetch_detailed_state().await?;
/// println!("active zones: {:?}", state.active_zones());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpGateway {
    base_url: String,
    client: Client,
    credentials: Option<Credentials>,
    session: Mutex<Option<String>>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ZoneCommand<'a> {
    code: Option<&'a str>,
    zones: &'a [ZoneId],
}

impl HttpGateway {
    /// Returns the base URL of the panel.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns `true` once a session token has been obtained.
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.session.lock().is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn with_session(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self.session.lock().clone();
        match token {
            Some(token) => request.header(SESSION_HEADER, token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        tracing::debug!(url = %url, "Sending HTTP request");

        let response = self
            .with_session(self.client.get(&url))
            .send()
            .await
            .map_err(ProtocolError::Http)?;
        let body = read_body(response).await?;

        tracing::debug!(body = %body, "Received HTTP response");
        serde_json::from_str(&body).map_err(|e| Error::Parse(ParseError::Json(e)))
    }

    async fn post_zones(&self, path: &str, code: Option<&str>, zones: &ZoneSet) -> Result<(), Error> {
        let url = self.url(path);
        tracing::debug!(url = %url, zones = %zones, "Sending zone command");

        let payload = ZoneCommand {
            code,
            zones: zones.as_slice(),
        };
        let response = self
            .with_session(self.client.post(&url).json(&payload))
            .send()
            .await
            .map_err(ProtocolError::Http)?;
        read_body(response).await?;
        Ok(())
    }
}

async fn read_body(response: Response) -> Result<String, ProtocolError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        return Err(ProtocolError::AuthenticationFailed);
    }

    if !status.is_success() {
        return Err(ProtocolError::ConnectionFailed(format!(
            "HTTP {} - {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }

    response.text().await.map_err(ProtocolError::Http)
}

impl Gateway for HttpGateway {
    async fn login(&self) -> Result<(), Error> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(ProtocolError::MissingCredentials)?;
        let url = self.url(LOGIN_PATH);
        tracing::debug!(url = %url, username = %credentials.username, "Logging in");

        let request = LoginRequest {
            username: &credentials.username,
            password: &credentials.password,
        };
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(ProtocolError::Http)?;
        let body = read_body(response).await?;
        let login: LoginResponse =
            serde_json::from_str(&body).map_err(|e| Error::Parse(ParseError::Json(e)))?;

        *self.session.lock() = Some(login.token);
        Ok(())
    }

    async fn fetch_detailed_state(&self) -> Result<DetailedState, Error> {
        self.get_json(STATES_PATH).await
    }

    async fn fetch_system_info(&self) -> Result<Value, Error> {
        self.get_json(SYSINFO_PATH).await
    }

    async fn fetch_structure(&self) -> Result<PlantStructure, Error> {
        let raw: Value = self.get_json(STRUCTURE_PATH).await?;
        Ok(PlantStructure::from_value(raw)?)
    }

    async fn activate(&self, code: Option<&str>, zones: &ZoneSet) -> Result<(), Error> {
        self.post_zones(ACTIVATE_PATH, code, zones).await
    }

    async fn deactivate(&self, code: Option<&str>, zones: &ZoneSet) -> Result<(), Error> {
        self.post_zones(DEACTIVATE_PATH, code, zones).await
    }
}
