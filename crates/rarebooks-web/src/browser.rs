//! Browser adapters: image handles and the session cookie.
//!
//! On wasm, thumbnails become blob object URLs that must be revoked, and the
//! session lives in a cookie. Elsewhere (tests, native builds) data URLs and
//! an in-memory store stand in.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rarebooks_search::{ImageData, ImageFactory};

/// Inline `data:` URLs. Nothing to release.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUrlFactory;

impl ImageFactory for DataUrlFactory {
    type Handle = String;

    fn create(&self, image: &ImageData) -> Result<String, String> {
        if image.bytes.is_empty() {
            return Err("empty image body".to_string());
        }
        let content_type = image
            .content_type
            .as_deref()
            .unwrap_or("application/octet-stream");
        Ok(format!(
            "data:{content_type};base64,{}",
            STANDARD.encode(&image.bytes)
        ))
    }

    fn release(&self, _handle: String) {}
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{BlobUrlFactory, CookieTokenStore};

#[cfg(target_arch = "wasm32")]
pub type PlatformImageFactory = BlobUrlFactory;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformImageFactory = DataUrlFactory;

/// Value of cookie `name` in a `document.cookie` string.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| {
            urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
    })
}

/// `Set-Cookie`-style assignment for `document.cookie`.
pub fn cookie_assignment(name: &str, value: &str, max_age_secs: u64) -> String {
    format!(
        "{name}={}; path=/; max-age={max_age_secs}; SameSite=Lax",
        urlencoding::encode(value)
    )
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use rarebooks_auth::{AuthError, StoredSession, TokenStore};
    use rarebooks_search::{ImageData, ImageFactory};
    use tracing::debug;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Blob, BlobPropertyBag, HtmlDocument, Url};

    use super::{cookie_assignment, cookie_value};

    fn js_error(e: JsValue) -> String {
        e.as_string().unwrap_or_else(|| format!("{e:?}"))
    }

    /// Blob object URLs, revoked on release.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BlobUrlFactory;

    impl ImageFactory for BlobUrlFactory {
        type Handle = String;

        fn create(&self, image: &ImageData) -> Result<String, String> {
            if image.bytes.is_empty() {
                return Err("empty image body".to_string());
            }
            let bytes = js_sys::Uint8Array::from(image.bytes.as_slice());
            let parts = js_sys::Array::of1(&bytes);
            let options = BlobPropertyBag::new();
            if let Some(content_type) = &image.content_type {
                options.set_type(content_type);
            }
            let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                .map_err(js_error)?;
            Url::create_object_url_with_blob(&blob).map_err(js_error)
        }

        fn release(&self, handle: String) {
            if let Err(e) = Url::revoke_object_url(&handle) {
                debug!(error = %js_error(e), "failed to revoke object url");
            }
        }
    }

    /// Session persisted in a first-party cookie.
    #[derive(Debug, Clone)]
    pub struct CookieTokenStore {
        name: String,
        max_age_secs: u64,
    }

    impl CookieTokenStore {
        pub fn new(name: impl Into<String>, days: u32) -> Self {
            Self {
                name: name.into(),
                max_age_secs: u64::from(days) * 24 * 60 * 60,
            }
        }

        fn document(&self) -> Result<HtmlDocument, AuthError> {
            web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
                .ok_or_else(|| AuthError::Store("document unavailable".to_string()))
        }

        fn write(&self, assignment: &str) -> Result<(), AuthError> {
            self.document()?
                .set_cookie(assignment)
                .map_err(|e| AuthError::Store(js_error(e)))
        }
    }

    impl TokenStore for CookieTokenStore {
        fn load(&self) -> Result<Option<StoredSession>, AuthError> {
            let cookies = self
                .document()?
                .cookie()
                .map_err(|e| AuthError::Store(js_error(e)))?;
            cookie_value(&cookies, &self.name)
                .map(|raw| StoredSession::from_json(&raw))
                .transpose()
        }

        fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
            self.write(&cookie_assignment(&self.name, &session.to_json()?, self.max_age_secs))
        }

        fn clear(&self) -> Result<(), AuthError> {
            self.write(&cookie_assignment(&self.name, "", 0))
        }
    }
}
