//! App-level state: stored at `app/route`.

use std::fmt;

use serde::Serialize;
use storefront_catalog::ProductId;

/// A parsed location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Route {
    /// `/`, optionally deep-linking a product with `?product={id}`.
    Landing { product: Option<ProductId> },
    /// `/products`
    Catalog,
    /// `/cart`
    Cart,
    /// `/checkout`
    Checkout,
}

/// The view a route mounts. Routes that differ only by query share a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Landing,
    Catalog,
    Cart,
    Checkout,
}

impl Route {
    pub const HOME: Route = Route::Landing { product: None };

    /// Parse a path with optional query. Unknown paths fall back to landing.
    pub fn parse(location: &str) -> Route {
        let location = location.split('#').next().unwrap_or_default();
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, query),
            None => (location, ""),
        };
        let path = path.trim().trim_end_matches('/').to_ascii_lowercase();
        match path.as_str() {
            "/products" | "products" => Route::Catalog,
            "/cart" | "cart" => Route::Cart,
            "/checkout" | "checkout" => Route::Checkout,
            _ => Route::Landing {
                product: product_param(query),
            },
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Landing { product: None } => "/".to_string(),
            Route::Landing { product: Some(id) } => format!("/?product={}", id),
            Route::Catalog => "/products".to_string(),
            Route::Cart => "/cart".to_string(),
            Route::Checkout => "/checkout".to_string(),
        }
    }

    pub fn view(&self) -> View {
        match self {
            Route::Landing { .. } => View::Landing,
            Route::Catalog => View::Catalog,
            Route::Cart => View::Cart,
            Route::Checkout => View::Checkout,
        }
    }

    /// Landing route deep-linking `id`.
    pub fn product(id: ProductId) -> Route {
        Route::Landing { product: Some(id) }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

fn product_param(query: &str) -> Option<ProductId> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == "product")
        .and_then(|(_, v)| v.trim().parse().ok())
}

/// Current route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppRoute(pub Route);

impl AppRoute {
    pub const PATH: &'static str = "app/route";
}
