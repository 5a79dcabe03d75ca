//! Download URL resolution
//!
//! Joins a package base URL with a rendered archive file name using standard
//! URL-reference resolution. Pure string work, no network access.

use url::Url;

use crate::error::UrlError;

/// Resolve `relative` against `base`
///
/// `base` must be an absolute URL. `relative` is any URL reference: a plain
/// file name lands next to the last `/` of the base path, an absolute URL
/// replaces the base entirely.
pub fn resolve(base: &str, relative: &str) -> Result<Url, UrlError> {
    let base_url = Url::parse(base).map_err(|e| UrlError::InvalidBase {
        url: base.to_string(),
        error: e.to_string(),
    })?;

    base_url
        .join(relative)
        .map_err(|e| UrlError::InvalidReference {
            base: base.to_string(),
            reference: relative.to_string(),
            error: e.to_string(),
        })
}
