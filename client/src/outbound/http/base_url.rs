//! Backend base address selection.
//!
//! Android emulators cannot reach the host through `localhost`; they use
//! the `10.0.2.2` loopback alias instead. Every other platform talks to the
//! local development server directly.

use url::Url;

use crate::domain::Platform;

/// Base address used by every platform except Android.
pub const LOCAL_BASE_URL: &str = "http://localhost:8000/api/";
/// Base address used on Android emulators.
pub const ANDROID_EMULATOR_BASE_URL: &str = "http://10.0.2.2:8000/api/";

/// Default base address for `platform`.
pub fn base_address(platform: Platform) -> &'static str {
    match platform {
        Platform::Android => ANDROID_EMULATOR_BASE_URL,
        Platform::Ios | Platform::Web | Platform::Desktop => LOCAL_BASE_URL,
    }
}

/// Parse the base URL, preferring an explicit override over the platform
/// default.
///
/// A trailing `/` is added when missing so relative endpoint paths join
/// below the base rather than replacing its last segment.
///
/// # Examples
/// ```
/// use mycollegebook::domain::Platform;
/// use mycollegebook::outbound::http::resolve_base_url;
///
/// let url = resolve_base_url(Platform::Android, None).unwrap();
/// assert_eq!(url.as_str(), "http://10.0.2.2:8000/api/");
///
/// let url = resolve_base_url(Platform::Ios, Some("https://books.example/api")).unwrap();
/// assert_eq!(url.as_str(), "https://books.example/api/");
/// ```
pub fn resolve_base_url(
    platform: Platform,
    override_url: Option<&str>,
) -> Result<Url, url::ParseError> {
    let raw = override_url
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| base_address(platform));
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
