//! One-shot status messages carried across a redirect in a cookie.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::extract::{FromRequest, RequestParts};
use axum::headers::Cookie;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Redirect, Response};
use axum::TypedHeader;

const COOKIE_NAME: &str = "flash";
/// Sent along with any page that displayed a message, so it shows only once.
pub const CLEAR_COOKIE: &str = "flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    /// The CSS class the message is shown with.
    pub fn css_class(&self) -> &'static str {
        match self {
            FlashLevel::Success => "alert-success",
            FlashLevel::Error => "alert-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            text: text.into(),
        }
    }

    fn encode(&self) -> String {
        let tag = match self.level {
            FlashLevel::Success => 's',
            FlashLevel::Error => 'e',
        };

        base64::encode_config(&format!("{}{}", tag, self.text), base64::URL_SAFE_NO_PAD)
    }

    fn decode(value: &str) -> Option<Self> {
        let bytes = base64::decode_config(value, base64::URL_SAFE_NO_PAD).ok()?;
        let decoded = String::from_utf8(bytes).ok()?;
        let mut chars = decoded.chars();

        let level = match chars.next()? {
            's' => FlashLevel::Success,
            'e' => FlashLevel::Error,
            _ => return None,
        };

        Some(Self {
            level,
            text: chars.as_str().to_owned(),
        })
    }

    pub fn set_cookie(&self) -> String {
        format!(
            "{}={}; Path=/; Max-Age=60; HttpOnly; SameSite=Lax",
            COOKIE_NAME,
            self.encode()
        )
    }

    /// Sends the browser to `to` with this message waiting there.
    pub fn redirect(self, to: &str) -> Response {
        ([(SET_COOKIE, self.set_cookie())], Redirect::to(to)).into_response()
    }

    /// Answers a scripted request with the path to go to next, as plain text.
    ///
    /// `fetch` follows redirects on its own, so a redirect would render the
    /// next page out of sight and use the message up there. The page's script
    /// navigates to the returned path itself instead.
    pub fn navigate(self, to: &str) -> Response {
        ([(SET_COOKIE, self.set_cookie())], to.to_owned()).into_response()
    }
}

/// The message left by the previous request, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flash(pub Option<FlashMessage>);

#[async_trait]
impl<B: Send> FromRequest<B> for Flash {
    type Rejection = Infallible;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let cookies = Option::<TypedHeader<Cookie>>::from_request(req).await?;
        let message = cookies
            .as_ref()
            .and_then(|TypedHeader(cookies)| cookies.get(COOKIE_NAME))
            .and_then(FlashMessage::decode);

        Ok(Flash(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_survive_the_cookie() {
        for message in [
            FlashMessage::success("Venue The Musical Hop was successfully listed!"),
            FlashMessage::error("An error occurred. Venue R&B; \"Café\" could not be listed."),
        ] {
            assert_eq!(FlashMessage::decode(&message.encode()), Some(message));
        }
    }

    #[test]
    fn cookie_values_are_header_safe() {
        let cookie = FlashMessage::success("Show was successfully listed!; Path=/evil").set_cookie();

        let value = cookie
            .strip_prefix("flash=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        assert!(value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn scripted_requests_get_the_target_not_a_redirect() {
        let response = FlashMessage::success("Venue was successfully deleted!").navigate("/");

        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert!(response.headers().get("location").is_none());
        assert!(response.headers()[SET_COOKIE]
            .to_str()
            .unwrap()
            .starts_with("flash="));
    }

    #[test]
    fn tampered_cookies_are_ignored() {
        assert_eq!(FlashMessage::decode("!!!"), None);
        assert_eq!(FlashMessage::decode(""), None);
        assert_eq!(FlashMessage::decode(&base64::encode("xhello")), None);
    }

    #[test]
    fn redirects_carry_the_cookie() {
        let response = FlashMessage::success("done").redirect("/venues/1");

        assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/venues/1");
        assert!(response.headers()[SET_COOKIE]
            .to_str()
            .unwrap()
            .starts_with("flash="));
    }
}
