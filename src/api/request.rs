use crate::api::error::ApiError;
use log::debug;
use reqwest::header::HeaderMap;
use reqwest::Response;

/// For an reqwest response check the registry version as well as map errors to `ApiError`s
pub async fn handle_response(response: Response) -> Result<Response, ApiError> {
    validate_registry_version(response.headers())?;

    let status = response.status();
    if !status.is_success() {
        let url = response.url().to_string();
        let body = response.text().await?;
        debug!("Request to '{url}' failed with status {status}");
        Err(ApiError::RegistryError(format!("{status}: {}", body.trim())))
    } else {
        Ok(response)
    }
}

/// Validate that the `Docker-Distribution-API-Version` header, if present, announces registry v2
pub fn validate_registry_version(headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(version) = headers.get("Docker-Distribution-API-Version") else {
        return Ok(())
    };
    let parsed = version
        .to_str()
        .map_err(|_| ApiError::InvalidHeaderValue(String::from("Docker-Distribution-API-Version")))?;
    if parsed.ends_with("/2.0") {
        Ok(())
    } else {
        Err(ApiError::UnsupportedRegistry)
    }
}

/// For responses which use the `Link` header for pagination the header value
/// is read and parsed as proposed in RFC 5988. Only the `next` relation is followed
pub fn get_follow_path(headers: &HeaderMap) -> Result<Option<String>, ApiError> {
    let Some(link) = headers.get(reqwest::header::LINK) else {
        return Ok(None)
    };
    let link_str = link
        .to_str()
        .map_err(|_| ApiError::InvalidHeaderValue(String::from("Link")))?;

    for entry in link_str.split(',') {
        let mut parts = entry.split(';');
        let target = parts.next().unwrap_or_default().trim();
        let is_next = parts.any(|param| {
            let param = param.trim().replace(' ', "");
            param == "rel=\"next\"" || param == "rel=next"
        });
        if !is_next {
            continue
        }
        if let Some(path) = target.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
            return Ok(Some(String::from(path)))
        }
    }
    Ok(None)
}
