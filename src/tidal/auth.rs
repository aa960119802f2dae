use std::{
    thread,
    time::{Duration, Instant},
};

use reqwest::blocking::Client;

use crate::{
    config,
    error::ExtractorError,
    info, success,
    tidal::{Session, TidalError, client::TidalClient},
    types::{DeviceAuthorization, SessionInfo, Token, TokenErrorResponse},
    warning,
};

const DEVICE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// Produces an authenticated [`Session`].
///
/// The extractor is generic over this trait so that tests can hand it a
/// pre-built session instead of running a real login.
pub trait AuthProvider {
    fn connect(&self) -> Result<Session, ExtractorError>;
}

/// OAuth device-code login against the Tidal auth service.
///
/// The user is shown (and, where possible, the browser is pointed at) a
/// verification URL. The token endpoint is polled until the login is
/// confirmed or the device code expires.
pub struct DeviceAuthProvider {
    silent: bool,
}

impl DeviceAuthProvider {
    pub fn new(silent: bool) -> Self {
        Self { silent }
    }
}

impl AuthProvider for DeviceAuthProvider {
    fn connect(&self) -> Result<Session, ExtractorError> {
        let client_id = config::tidal_client_id()?;
        let client_secret = config::tidal_client_secret()?;
        let auth_url = config::tidal_auth_url();
        let api_url = config::tidal_api_url();
        let scope = config::tidal_scope();

        let http = Client::builder()
            .timeout(config::request_timeout())
            .build()
            .map_err(TidalError::from)?;

        let device = start_device_login(&http, &auth_url, &client_id, &scope)?;
        let url = login_url(&device);

        if self.silent {
            tracing::info!(url = %url, user_code = %device.user_code, "waiting for device login");
        } else {
            info!("Log in to Tidal at {} (code: {})", url, device.user_code);
        }

        if webbrowser::open(&url).is_err() && !self.silent {
            warning!("Failed to open browser. Please navigate to the URL above manually.");
        }

        let token = wait_for_token(&http, &auth_url, &client_id, &client_secret, &scope, &device)?;
        let session = fetch_session_info(&http, &api_url, &token.access_token)?;

        tracing::debug!(user_id = session.user_id, country = %session.country_code, "session established");
        if !self.silent {
            success!("Authentication successful!");
        }

        Ok(Box::new(TidalClient::new(
            http,
            api_url,
            token.access_token,
            session,
        )))
    }
}

/// Requests a device code and the verification URL the user has to visit.
pub fn start_device_login(
    http: &Client,
    auth_url: &str,
    client_id: &str,
    scope: &str,
) -> Result<DeviceAuthorization, TidalError> {
    let response = http
        .post(format!("{}/device_authorization", auth_url.trim_end_matches('/')))
        .form(&[("client_id", client_id), ("scope", scope)])
        .send()?;

    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(TidalError::Auth(format!(
            "device authorization rejected ({}): {}",
            status, body
        )));
    }

    Ok(serde_json::from_str(&body)?)
}

/// Polls the token endpoint every `interval` seconds until the user has
/// confirmed the login or the device code has expired.
pub fn wait_for_token(
    http: &Client,
    auth_url: &str,
    client_id: &str,
    client_secret: &str,
    scope: &str,
    device: &DeviceAuthorization,
) -> Result<Token, TidalError> {
    let deadline = Instant::now() + Duration::from_secs(device.expires_in);
    let mut interval = Duration::from_secs(device.interval.max(1));
    let token_url = format!("{}/token", auth_url.trim_end_matches('/'));

    while Instant::now() < deadline {
        let response = http
            .post(&token_url)
            .form(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("device_code", device.device_code.as_str()),
                ("grant_type", DEVICE_GRANT_TYPE),
                ("scope", scope),
            ])
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        let failure: TokenErrorResponse =
            serde_json::from_str(&body).map_err(|_| TidalError::Status {
                status: status.as_u16(),
                body: body.clone(),
            })?;

        match failure.error.as_str() {
            "authorization_pending" => {}
            "slow_down" => interval += Duration::from_secs(1),
            "expired_token" => {
                return Err(TidalError::Auth("device code expired".to_string()));
            }
            _ => {
                return Err(TidalError::Auth(
                    failure.error_description.unwrap_or(failure.error),
                ));
            }
        }

        thread::sleep(interval);
    }

    Err(TidalError::Auth("device login timed out".to_string()))
}

/// Looks up the user id and country code bound to `access_token`.
pub fn fetch_session_info(
    http: &Client,
    api_url: &str,
    access_token: &str,
) -> Result<SessionInfo, TidalError> {
    let response = http
        .get(format!("{}/sessions", api_url.trim_end_matches('/')))
        .bearer_auth(access_token)
        .send()?;

    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(TidalError::Auth(format!(
            "session lookup failed ({}): {}",
            status, body
        )));
    }

    Ok(serde_json::from_str(&body)?)
}

/// The URL shown to the user. Tidal returns it without a scheme.
pub fn login_url(device: &DeviceAuthorization) -> String {
    let uri = device
        .verification_uri_complete
        .as_deref()
        .unwrap_or(&device.verification_uri);

    if uri.starts_with("http://") || uri.starts_with("https://") {
        uri.to_string()
    } else {
        format!("https://{}", uri)
    }
}
