use log::{debug, trace};
use oauth2::AccessToken;
use url::form_urlencoded;
use url::Url;

/// Name of the fragment parameter carrying the bearer token
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Literal sent after `Bearer ` when the page was loaded without a token
pub const MISSING_TOKEN: &str = "null";

/// The access token captured from the page location at load time.
///
/// The token is read exactly once and never refreshed. A page loaded without an
/// `access_token` parameter still yields a `CapturedToken`, it just holds nothing.
#[derive(Clone, Debug)]
pub struct CapturedToken(Option<AccessToken>);

impl CapturedToken {
    /// Capture the token from a page location (between the first and a second `#`)
    pub fn from_location(location: &str) -> Self {
        let fragment = location.split('#').nth(1);
        trace!("Capturing access token from location fragment");
        Self::from_fragment(fragment.unwrap_or_default())
    }

    /// Capture the token from an already parsed page url
    pub fn from_url(url: &Url) -> Self {
        Self::from_fragment(url.fragment().unwrap_or_default())
    }

    /// Capture the token from a query-string style fragment, leading `#` excluded.
    ///
    /// Anything from a further `#` on is not part of the parameters.
    pub fn from_fragment(fragment: &str) -> Self {
        let fragment = fragment.split('#').next().unwrap_or_default();
        // A leading '?' is ignored, the same way a query string parser would
        let fragment = fragment.strip_prefix('?').unwrap_or(fragment);

        let token = form_urlencoded::parse(fragment.as_bytes())
            .find(|(key, _)| key == ACCESS_TOKEN_PARAM)
            .map(|(_, value)| AccessToken::new(value.into_owned()));

        match token {
            Some(_) => debug!("Captured access token from the page fragment"),
            None => debug!("Page fragment carries no access token"),
        }

        CapturedToken(token)
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn secret(&self) -> Option<&str> {
        self.0.as_ref().map(|token| token.secret().as_str())
    }

    /// Value of the `Authorization` header sent with every call.
    ///
    /// The header is never omitted: a missing token is sent as `Bearer null`.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.secret().unwrap_or(MISSING_TOKEN))
    }
}
