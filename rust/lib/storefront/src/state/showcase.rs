//! Landing view state: `showcase/state` plus one preview per product at
//! `showcase/previews/items/{id}`.

use serde::Serialize;
use storefront_catalog::{Product, ProductId};

use crate::scene::{PlaceholderReason, Presentation, SceneHandle};

pub const SHOWCASE_LOAD_FAILED: &str = "Failed to load products";
pub const SHOWCASE_EMPTY: &str = "No products available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ShowcasePhase {
    /// Landing view not mounted.
    Idle,
    Loading,
    Ready,
    Empty { message: String },
    Failed { message: String },
}

/// A product with its asset paths resolved against the API base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowcaseItem {
    pub product: Product,
    pub image_url: Option<String>,
    pub model_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowcaseState {
    pub phase: ShowcasePhase,
    pub items: Vec<ShowcaseItem>,
    /// Product the landing view scrolls to, from `?product={id}`.
    pub focus: Option<ProductId>,
}

impl ShowcaseState {
    pub const PATH: &'static str = "showcase/state";

    pub fn idle() -> Self {
        Self {
            phase: ShowcasePhase::Idle,
            items: Vec::new(),
            focus: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            phase: ShowcasePhase::Loading,
            ..Self::idle()
        }
    }

    pub fn failed() -> Self {
        Self {
            phase: ShowcasePhase::Failed {
                message: SHOWCASE_LOAD_FAILED.to_string(),
            },
            ..Self::idle()
        }
    }

    pub fn loaded(items: Vec<ShowcaseItem>) -> Self {
        let phase = if items.is_empty() {
            ShowcasePhase::Empty {
                message: SHOWCASE_EMPTY.to_string(),
            }
        } else {
            ShowcasePhase::Ready
        };
        Self {
            phase,
            items,
            focus: None,
        }
    }

    pub fn find(&self, id: ProductId) -> Option<&ShowcaseItem> {
        self.items.iter().find(|i| i.product.id == id)
    }

    /// Focus `id` when it is one of the loaded products; otherwise clear it.
    pub fn focus_on(&mut self, id: Option<ProductId>) {
        self.focus = id.filter(|id| self.find(*id).is_some());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PreviewState {
    /// Placeholder shown while the asset loads.
    Loading,
    Shown {
        handle: SceneHandle,
        presentation: Presentation,
    },
}

impl PreviewState {
    pub const PREFIX: &'static str = "showcase/previews/items";

    pub fn path(id: ProductId) -> String {
        format!("{}/{}", Self::PREFIX, id)
    }

    /// Whether the real model (not the cube) is on screen.
    pub fn shows_model(&self) -> bool {
        matches!(self, PreviewState::Shown { presentation, .. } if presentation.is_model())
    }

    pub fn placeholder_reason(&self) -> Option<&PlaceholderReason> {
        match self {
            PreviewState::Shown {
                presentation: Presentation::Placeholder { reason },
                ..
            } => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: ProductId) -> ShowcaseItem {
        ShowcaseItem {
            product: serde_json::from_value(serde_json::json!({
                "id": id, "title": "P", "price": 1.0
            }))
            .unwrap(),
            image_url: None,
            model_url: None,
        }
    }

    #[test]
    fn focus_only_known_products() {
        let mut state = ShowcaseState::loaded(vec![item(1), item(2)]);
        state.focus_on(Some(2));
        assert_eq!(state.focus, Some(2));

        state.focus_on(Some(99));
        assert_eq!(state.focus, None);
    }

    #[test]
    fn empty_list_is_its_own_phase() {
        let state = ShowcaseState::loaded(vec![]);
        assert_eq!(
            state.phase,
            ShowcasePhase::Empty {
                message: SHOWCASE_EMPTY.into()
            }
        );
    }

    #[test]
    fn preview_paths() {
        assert_eq!(PreviewState::path(7), "showcase/previews/items/7");
        assert!(!PreviewState::Loading.shows_model());
    }
}
