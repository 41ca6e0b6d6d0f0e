//! Supporting resource URLs

use base64::{engine::general_purpose::STANDARD, Engine as _};
use url::Url;

use crate::{
    config::AssetConfig,
    error::{AppError, AppResult},
    models::onix::SupportingResource,
};

/// Query parameter carrying the encoded asset credentials
pub const CREDENTIAL_PARAM: &str = "authcred";

/// Cache-busting parameter added by the asset search API
const CACHE_BUSTER_PARAM: &str = "_";

/// Add base64 `username:password` as a query parameter, replacing any earlier
/// credential and dropping the `_` cache buster. Other parameters keep their
/// order.
pub fn inject_credentials(url: &str, username: &str, password: &str) -> AppResult<String> {
    let mut parsed =
        Url::parse(url).map_err(|e| AppError::Validation(format!("Invalid resource URL {}: {}", url, e)))?;

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| key != CACHE_BUSTER_PARAM && key != CREDENTIAL_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let credential = STANDARD.encode(format!("{}:{}", username, password));

    parsed
        .query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(CREDENTIAL_PARAM, &credential);

    Ok(parsed.to_string())
}

/// Front cover image resource for a raw asset URL
pub fn cover_image(url: Option<&str>, assets: &AssetConfig) -> AppResult<Option<SupportingResource>> {
    let Some(url) = url else {
        return Ok(None);
    };
    Ok(Some(SupportingResource {
        content_type: "01".to_string(),
        content_audience: "00".to_string(),
        mode: "03".to_string(),
        url: inject_credentials(url, &assets.username, &assets.password)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injects_credentials() {
        let url = inject_credentials("https://dam.example.fi/file/123/cover.jpg", "user", "pass").unwrap();
        assert_eq!(url, "https://dam.example.fi/file/123/cover.jpg?authcred=dXNlcjpwYXNz");
    }

    #[test]
    fn test_strips_cache_buster_and_keeps_other_params() {
        let url = inject_credentials(
            "https://dam.example.fi/preview/123?version=2&_=1700000000&size=large",
            "user",
            "pass",
        )
        .unwrap();
        assert_eq!(
            url,
            "https://dam.example.fi/preview/123?version=2&size=large&authcred=dXNlcjpwYXNz"
        );
    }

    #[test]
    fn test_replaces_existing_credential() {
        let url = inject_credentials("https://dam.example.fi/a?authcred=b2xkOm9sZA%3D%3D", "user", "pass").unwrap();
        assert_eq!(url.matches("authcred=").count(), 1);
        assert!(url.ends_with("authcred=dXNlcjpwYXNz"));
    }

    #[test]
    fn test_padding_is_encoded() {
        let url = inject_credentials("https://dam.example.fi/a", "ab", "c").unwrap();
        // "ab:c" encodes with padding
        assert!(url.ends_with("authcred=YWI6Yw%3D%3D"));
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            inject_credentials("not a url", "u", "p"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_cover_image_resource() {
        let assets = AssetConfig {
            username: "user".to_string(),
            password: "pass".to_string(),
        };
        let resource = cover_image(Some("https://dam.example.fi/c.jpg"), &assets).unwrap().unwrap();
        assert_eq!(resource.content_type, "01");
        assert_eq!(resource.mode, "03");
        assert!(resource.url.contains("authcred="));
        assert!(cover_image(None, &assets).unwrap().is_none());
    }
}
