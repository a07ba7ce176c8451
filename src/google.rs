//! Google Sheets client authenticated with a service-account key.
//!
//! Authentication is the two-legged JWT bearer flow: sign a short-lived
//! assertion with the key's RSA private key, exchange it for an access token,
//! then call the Sheets v4 `values` endpoints with that token.

use crate::config::RunConfig;
use crate::constants::{
    ASSERTION_LIFETIME_SECS, DEFAULT_TOKEN_URI, JWT_BEARER_GRANT, SHEETS_API_BASE,
};
use crate::sheet::SheetStore;
use anyhow::Context;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;

#[derive(Debug, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read credential file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid credential file {}", path.display()))
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

impl<'a> Claims<'a> {
    fn new(key: &'a ServiceAccountKey, scope: &'a str, now: u64) -> Self {
        Self {
            iss: &key.client_email,
            scope,
            aud: &key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeBody<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: Vec<[&'a str; 1]>,
}

/// Authenticated connection to one spreadsheet.
pub struct GoogleSheets {
    agent: ureq::Agent,
    spreadsheet_id: String,
    access_token: String,
}

impl GoogleSheets {
    /// Loads the credential file and exchanges it for an access token.
    ///
    /// Any failure here is fatal: no rows are read without a working connection.
    pub fn connect(config: &RunConfig) -> anyhow::Result<Self> {
        let key = ServiceAccountKey::load(&config.credential_file)?;
        let agent = ureq::AgentBuilder::new().build();
        let access_token = fetch_access_token(&agent, &key, config.scope)?;
        log::debug!("Authenticated as {}", key.client_email);

        Ok(Self {
            agent,
            spreadsheet_id: config.spreadsheet_id.clone(),
            access_token,
        })
    }

    fn values_url(&self, range: &str) -> anyhow::Result<Url> {
        let mut url = Url::parse(SHEETS_API_BASE)?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Sheets API base URL cannot have a path"))?
            .pop_if_empty()
            .push(&self.spreadsheet_id)
            .push("values")
            .push(range);
        Ok(url)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl SheetStore for GoogleSheets {
    fn read_rows(&self, range: &str) -> anyhow::Result<Vec<Vec<String>>> {
        let url = self.values_url(range)?;
        log::debug!("GET {}", url);
        let response = self
            .agent
            .get(url.as_str())
            .set("Authorization", &self.bearer())
            .call()
            .map_err(http_error)
            .context("Failed to read spreadsheet values")?;
        let body: ValueRange = response
            .into_json()
            .context("Invalid values response from Sheets API")?;
        Ok(rows_to_strings(body.values))
    }

    fn write_column(&self, range: &str, values: &[String]) -> anyhow::Result<()> {
        let mut url = self.values_url(range)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let body = ValueRangeBody {
            range,
            major_dimension: "ROWS",
            values: values.iter().map(|v| [v.as_str()]).collect(),
        };
        log::debug!("PUT {} ({} values)", url, values.len());
        self.agent
            .put(url.as_str())
            .set("Authorization", &self.bearer())
            .send_json(&body)
            .map_err(http_error)
            .context("Failed to write spreadsheet values")?;
        Ok(())
    }
}

fn fetch_access_token(
    agent: &ureq::Agent,
    key: &ServiceAccountKey,
    scope: &str,
) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let assertion = sign_assertion(key, scope, now)?;
    let response = agent
        .post(&key.token_uri)
        .send_form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .map_err(http_error)
        .context("Failed to obtain access token")?;
    let token: TokenResponse = response
        .into_json()
        .context("Invalid token response")?;
    Ok(token.access_token)
}

fn sign_assertion(key: &ServiceAccountKey, scope: &str, now: u64) -> anyhow::Result<String> {
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .context("Credential file private_key is not a valid RSA PEM key")?;
    let claims = Claims::new(key, scope, now);
    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .context("Failed to sign token assertion")
}

fn http_error(err: ureq::Error) -> anyhow::Error {
    match err {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            anyhow::anyhow!("HTTP {}: {}", code, body.trim())
        }
        other => anyhow::Error::new(other),
    }
}

fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn rows_to_strings(rows: Vec<Vec<Value>>) -> Vec<Vec<String>> {
    rows.into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect())
        .collect()
}
