use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;
use crate::api::error::ApiError;
use crate::api::RegistryConfig;
use crate::config::Credentials;

/// Scope of the directory token which gets exchanged for a registry refresh token
pub const AUDIENCE_SCOPE: &str = "https://management.azure.com/.default";
/// Username the registry expects when a refresh token is used as password
pub const NULL_USERNAME: &str = "00000000-0000-0000-0000-000000000000";

#[derive(Deserialize, Debug)]
struct DirectoryToken {
    access_token: String,
}

#[derive(Deserialize, Debug)]
struct RefreshToken {
    refresh_token: String,
}

/// Authenticate the service principal from `credentials` against the registry at `host`.
/// The directory access token is exchanged for a registry refresh token which is then used
/// as basic auth password on every registry request
pub async fn authenticate(host: &str, credentials: &Credentials) -> Result<RegistryConfig, ApiError> {
    info!("Authenticating against the {host} container registry");
    let client = Client::new();

    let token_url = format!("https://login.microsoftonline.com/{}/oauth2/v2.0/token", credentials.tenant_id);
    let directory_token = client
        .post(token_url.as_str())
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("scope", AUDIENCE_SCOPE),
        ])
        .send()
        .await?;
    let directory_token = parse_token::<DirectoryToken>(&token_url, directory_token).await?;
    debug!("Obtained directory token for client '{}'", credentials.client_id);

    let exchange_url = format!("https://{host}/oauth2/exchange");
    let refresh_token = client
        .post(exchange_url.as_str())
        .form(&[
            ("grant_type", "access_token"),
            ("service", host),
            ("tenant", credentials.tenant_id.as_str()),
            ("access_token", directory_token.access_token.as_str()),
        ])
        .send()
        .await?;
    let refresh_token = parse_token::<RefreshToken>(&exchange_url, refresh_token).await?;
    debug!("Exchanged directory token for a refresh token of registry '{host}'");

    Ok(RegistryConfig::new(
        host.to_string(),
        Some(NULL_USERNAME.to_string()),
        Some(refresh_token.refresh_token),
    ))
}

async fn parse_token<T: for<'de> Deserialize<'de>>(url: &str, response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await?;
        return Err(ApiError::TokenExchange(url.to_string(), format!("{status}: {}", body.trim())))
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::TokenExchange(url.to_string(), err.to_string()))
}
