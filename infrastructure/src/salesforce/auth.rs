//! Login flows
//!
//! Two ways in, picked by configuration:
//!
//! | Credentials | Flow |
//! |-------------|------|
//! | consumer key + secret | OAuth2 username-password (`/services/oauth2/token`) |
//! | otherwise | SOAP partner `login` (`/services/Soap/u/{version}`) |
//!
//! Both append the security token to the password.

use super::error::{api_error, decode, transport};
use crate::config::FileSalesforceConfig;
use regex::Regex;
use serde::Deserialize;
use sfmcp_application::ConnectionError;
use tracing::debug;

/// An authenticated session
#[derive(Clone)]
pub struct Session {
    pub access_token: String,
    /// Org-specific host, e.g. `https://acme.my.salesforce.com`
    pub instance_url: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("instance_url", &self.instance_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    instance_url: String,
}

pub async fn login(
    http: &reqwest::Client,
    config: &FileSalesforceConfig,
) -> Result<Session, ConnectionError> {
    let username = config
        .username
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConnectionError::Config("SALESFORCE_USERNAME is not set".into()))?;
    let password = config
        .password
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConnectionError::Config("SALESFORCE_PASSWORD is not set".into()))?;
    let secret = format!("{}{}", password, config.token.as_deref().unwrap_or_default());
    let login_url = config.instance_url.trim_end_matches('/');

    if config.uses_oauth() {
        debug!(login_url = %login_url, "Logging in with OAuth2 password flow");
        oauth_login(http, config, login_url, username, &secret).await
    } else {
        debug!(login_url = %login_url, "Logging in with SOAP partner login");
        soap_login(http, &config.api_version, login_url, username, &secret).await
    }
}

async fn oauth_login(
    http: &reqwest::Client,
    config: &FileSalesforceConfig,
    login_url: &str,
    username: &str,
    secret: &str,
) -> Result<Session, ConnectionError> {
    let form = [
        ("grant_type", "password"),
        ("client_id", config.consumer_key.as_deref().unwrap_or_default()),
        ("client_secret", config.consumer_secret.as_deref().unwrap_or_default()),
        ("username", username),
        ("password", secret),
    ];
    let response = http
        .post(format!("{}/services/oauth2/token", login_url))
        .form(&form)
        .send()
        .await
        .map_err(transport)?;

    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    if !status.is_success() {
        return Err(match api_error(status.as_u16(), &body) {
            auth @ ConnectionError::Auth(_) => auth,
            other => ConnectionError::Auth(other.to_string()),
        });
    }

    let token: TokenResponse = serde_json::from_str(&body).map_err(|e| decode("token response", e))?;
    Ok(Session {
        access_token: token.access_token,
        instance_url: token.instance_url,
    })
}

async fn soap_login(
    http: &reqwest::Client,
    api_version: &str,
    login_url: &str,
    username: &str,
    secret: &str,
) -> Result<Session, ConnectionError> {
    let response = http
        .post(format!("{}/services/Soap/u/{}", login_url, api_version))
        .header("Content-Type", "text/xml; charset=UTF-8")
        .header("SOAPAction", "login")
        .body(login_envelope(username, secret))
        .send()
        .await
        .map_err(transport)?;

    let body = response.text().await.map_err(transport)?;
    parse_login_response(&body)
}

fn login_envelope(username: &str, secret: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            r#"<env:Envelope xmlns:xsd="http://www.w3.org/2001/XMLSchema" "#,
            r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
            r#"xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">"#,
            r#"<env:Body><n1:login xmlns:n1="urn:partner.soap.sforce.com">"#,
            "<n1:username>{}</n1:username><n1:password>{}</n1:password>",
            "</n1:login></env:Body></env:Envelope>"
        ),
        xml_escape(username),
        xml_escape(secret)
    )
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn element<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
    let re = Regex::new(&format!(r"<(?:\w+:)?{tag}>([^<]*)</(?:\w+:)?{tag}>")).ok()?;
    re.captures(xml)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract the session from a `loginResponse`, or the fault text
fn parse_login_response(xml: &str) -> Result<Session, ConnectionError> {
    if let Some(fault) = element(xml, "faultstring") {
        return Err(ConnectionError::Auth(fault.to_string()));
    }

    let session_id = element(xml, "sessionId")
        .ok_or_else(|| decode("login response", "missing sessionId"))?;
    let server_url = element(xml, "serverUrl")
        .ok_or_else(|| decode("login response", "missing serverUrl"))?;
    let instance_url = server_url
        .find("/services/")
        .map(|idx| &server_url[..idx])
        .unwrap_or(server_url);

    Ok(Session {
        access_token: session_id.to_string(),
        instance_url: instance_url.to_string(),
    })
}
