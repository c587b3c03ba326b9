//! Catalog view state: stored at `catalog/state`.

use std::fmt;

use serde::Serialize;
use storefront_catalog::{Product, ProductId};

pub const CATALOG_LOAD_FAILED: &str = "Failed to load products. Please try again later.";
pub const CATALOG_NO_MATCHES: &str = "No products found in this category.";

/// Category selector. `all` is the wildcard; any other label matches the
/// product category exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn parse(label: &str) -> Self {
        if label == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Named(name) => name,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => product.category == *name,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> String {
        filter.label().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum CatalogPhase {
    Loading,
    Ready,
    /// Loaded, but nothing matches the selected category.
    Empty { message: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogState {
    pub phase: CatalogPhase,
    /// Full list as fetched. Filtering never touches it.
    pub products: Vec<Product>,
    /// `all` followed by each distinct category in first-seen order.
    pub categories: Vec<CategoryFilter>,
    pub filter: CategoryFilter,
    pub visible: Vec<Product>,
}

impl CatalogState {
    pub const PATH: &'static str = "catalog/state";

    pub fn loading(filter: CategoryFilter) -> Self {
        Self {
            phase: CatalogPhase::Loading,
            products: Vec::new(),
            categories: vec![CategoryFilter::All],
            filter,
            visible: Vec::new(),
        }
    }

    pub fn failed(filter: CategoryFilter) -> Self {
        Self {
            phase: CatalogPhase::Failed {
                message: CATALOG_LOAD_FAILED.to_string(),
            },
            ..Self::loading(filter)
        }
    }

    pub fn loaded(products: Vec<Product>, filter: CategoryFilter) -> Self {
        let categories = categories_of(&products);
        Self {
            phase: CatalogPhase::Ready,
            products,
            categories,
            filter: CategoryFilter::All,
            visible: Vec::new(),
        }
        .with_filter(filter)
    }

    /// Recompute the visible list for `filter`. While loading or failed only
    /// the selection is recorded.
    pub fn with_filter(mut self, filter: CategoryFilter) -> Self {
        if matches!(
            self.phase,
            CatalogPhase::Loading | CatalogPhase::Failed { .. }
        ) {
            self.filter = filter;
            return self;
        }
        self.visible = self
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        self.phase = if self.visible.is_empty() {
            CatalogPhase::Empty {
                message: CATALOG_NO_MATCHES.to_string(),
            }
        } else {
            CatalogPhase::Ready
        };
        self.filter = filter;
        self
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

/// `all` plus the distinct categories of `products`, first-seen order.
pub fn categories_of(products: &[Product]) -> Vec<CategoryFilter> {
    let mut out = vec![CategoryFilter::All];
    for p in products {
        let c = CategoryFilter::Named(p.category.clone());
        if !out.contains(&c) {
            out.push(c);
        }
    }
    out
}
