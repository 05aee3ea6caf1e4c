//! Conversion of garment and user image URLs into base64 payloads.
//!
//! The try-on server accepts raw base64 only. `data:` URLs are unwrapped in
//! place; `http(s)` URLs are downloaded and encoded, but only from hosts on
//! the configured allow-list and only up to the configured size. Anything
//! else is skipped with a warning so one bad image does not sink the whole
//! request.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures::future::join_all;

use crate::config::TryOnConfig;
use crate::error::TryOnError;

const DATA_URL_MARKER: &str = ";base64,";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// Already-encoded payload from a `data:` URL.
    DataUrl(&'a str),
    /// Remote image that must be downloaded.
    Remote(&'a str),
    Unsupported,
}

/// Payload of a `data:<mime>;base64,<payload>` URL, if `url` is one.
pub fn data_url_payload(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("data:")?;
    let (_, payload) = rest.split_once(DATA_URL_MARKER)?;
    Some(payload)
}

/// Wrap a raw base64 payload as a `data:` URL.
pub fn to_data_url(mime: &str, payload: &str) -> String {
    format!("data:{mime}{DATA_URL_MARKER}{payload}")
}

pub fn classify(url: &str) -> ImageSource<'_> {
    let url = url.trim();
    if let Some(payload) = data_url_payload(url) {
        ImageSource::DataUrl(payload)
    } else if url.starts_with("http://") || url.starts_with("https://") {
        ImageSource::Remote(url)
    } else {
        ImageSource::Unsupported
    }
}

/// True if `url`'s host equals, or is a subdomain of, an allowed host.
pub fn host_allowed(url: &str, allowed: &[String]) -> bool {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str().map(str::to_ascii_lowercase) else {
        return false;
    };
    allowed.iter().any(|entry| {
        let entry = entry.as_str();
        !entry.is_empty()
            && (host == entry
                || host
                    .strip_suffix(entry)
                    .is_some_and(|prefix| prefix.ends_with('.')))
    })
}

/// Download a remote image and return it base64-encoded.
///
/// The host must be on `config.allowed_image_hosts`. The body is read in
/// chunks and the download is abandoned once it passes
/// `config.max_image_bytes`.
pub async fn fetch_base64(
    client: &reqwest::Client,
    url: &str,
    config: &TryOnConfig,
) -> Result<String, TryOnError> {
    if !host_allowed(url, &config.allowed_image_hosts) {
        return Err(TryOnError::ImageRejected(format!(
            "host of {url} is not an allowed image host"
        )));
    }

    let mut response = client
        .get(url)
        .timeout(config.image_timeout)
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(TryOnError::ApiError {
            status: status.as_u16(),
            body: format!("failed to download {url}"),
        });
    }

    let max = config.max_image_bytes;
    let too_large = || TryOnError::ImageRejected(format!("{url} is larger than {max} bytes"));

    if response.content_length().is_some_and(|len| len > max as u64) {
        return Err(too_large());
    }

    let mut bytes = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if bytes.len() + chunk.len() > max {
            return Err(too_large());
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(STANDARD.encode(&bytes))
}

/// Convert every URL to a base64 payload, preserving input order.
///
/// Downloads run concurrently. Unsupported URLs and failed or refused
/// downloads are dropped from the result.
pub async fn prepare_images(
    client: &reqwest::Client,
    urls: &[String],
    config: &TryOnConfig,
) -> Vec<String> {
    let tasks = urls.iter().map(|url| async move {
        match classify(url) {
            ImageSource::DataUrl(payload) => Some(payload.to_string()),
            ImageSource::Remote(remote) => match fetch_base64(client, remote, config).await {
                Ok(encoded) => Some(encoded),
                Err(e) => {
                    tracing::warn!(url = %remote, error = %e, "Skipping image that failed to download");
                    None
                }
            },
            ImageSource::Unsupported => {
                tracing::warn!(url = %url, "Skipping image with unsupported URL scheme");
                None
            }
        }
    });

    join_all(tasks).await.into_iter().flatten().collect()
}
