use url::Url;

use crate::error::CatalogError;

/// Resolves image and model paths from product records against the API base.
///
/// Absolute `http`/`https` URLs pass through untouched. Anything else is a
/// path on the API host.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetUrls {
    base: String,
}

impl AssetUrls {
    pub fn new(base: &str) -> Result<Self, CatalogError> {
        let parsed = Url::parse(base).map_err(|_| CatalogError::InvalidBase(base.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidBase(base.to_string()));
        }
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without a trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// `{base}/{path}` with exactly one slash, unless `path` is already absolute.
    pub fn resolve(&self, path: &str) -> String {
        let path = path.trim();
        if is_absolute(path) {
            return path.to_string();
        }
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }
}

fn is_absolute(path: &str) -> bool {
    Url::parse(path)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> AssetUrls {
        AssetUrls::new("https://shop.example.com/").unwrap()
    }

    #[test]
    fn relative_paths_join_with_one_slash() {
        assert_eq!(
            urls().resolve("/models/lamp.glb"),
            "https://shop.example.com/models/lamp.glb"
        );
        assert_eq!(
            urls().resolve("models/lamp.glb"),
            "https://shop.example.com/models/lamp.glb"
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        assert_eq!(
            urls().resolve("https://cdn.example.net/lamp.glb"),
            "https://cdn.example.net/lamp.glb"
        );
        assert_eq!(
            urls().resolve("http://cdn.example.net/a.png"),
            "http://cdn.example.net/a.png"
        );
    }

    #[test]
    fn base_keeps_its_path_prefix() {
        let urls = AssetUrls::new("http://localhost:8080/shop").unwrap();
        assert_eq!(urls.resolve("/images/a.png"), "http://localhost:8080/shop/images/a.png");
        assert_eq!(urls.base(), "http://localhost:8080/shop");
    }

    #[test]
    fn rejects_non_http_base() {
        assert!(AssetUrls::new("not a url").is_err());
        assert!(AssetUrls::new("ftp://example.com").is_err());
    }
}
