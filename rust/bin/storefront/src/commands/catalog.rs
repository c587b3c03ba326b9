//! Product listing commands: `products`, `featured`, `product`, `showcase`.

use anyhow::{Result, anyhow};
use storefront::request::FilterCatalogReq;
use storefront::scene::{PlaceholderReason, Presentation};
use storefront::state::{
    CatalogPhase, CatalogState, PreviewState, Route, ShowcasePhase, ShowcaseState,
};
use storefront_catalog::Product;

use super::{Session, format_price, print_json};

/// `storefront products [--category c]`: the catalog view.
pub async fn products(session: &Session, category: Option<&str>, json: bool) -> Result<()> {
    let app = &session.app;
    app.start(&Route::Catalog.to_path()).await;
    if let Some(category) = category {
        app.flux()
            .emit(
                FilterCatalogReq::PATH,
                FilterCatalogReq {
                    category: category.to_string(),
                },
            )
            .await;
    }
    let state = app
        .flux()
        .get_as::<CatalogState>(CatalogState::PATH)
        .ok_or_else(|| anyhow!("catalog view did not load"))?;

    if json {
        return print_json(&state);
    }
    match &state.phase {
        CatalogPhase::Failed { message } => anyhow::bail!("{}", message),
        CatalogPhase::Empty { message } => println!("{}", message),
        CatalogPhase::Loading => println!("Loading..."),
        CatalogPhase::Ready => print_products(&state.visible),
    }
    let labels: Vec<&str> = state.categories.iter().map(|c| c.label()).collect();
    println!();
    println!("Categories: {}", labels.join(", "));
    Ok(())
}

/// `storefront featured`.
pub async fn featured(session: &Session, json: bool) -> Result<()> {
    let product = session.app.context().catalog.fetch_featured_product().await?;
    print_product(session, &product, json)
}

/// `storefront product <id>`.
pub async fn product(session: &Session, id: u64, json: bool) -> Result<()> {
    let product = session.app.context().catalog.fetch_product(id).await?;
    print_product(session, &product, json)
}

/// `storefront showcase [--product id]`: the landing view with previews.
pub async fn showcase(session: &Session, focus: Option<u64>, json: bool) -> Result<()> {
    let app = &session.app;
    let route = match focus {
        Some(id) => Route::product(id),
        None => Route::HOME,
    };
    app.start(&route.to_path()).await;

    let state = app
        .flux()
        .get_as::<ShowcaseState>(ShowcaseState::PATH)
        .ok_or_else(|| anyhow!("landing view did not load"))?;
    let previews: Vec<(u64, Option<PreviewState>)> = state
        .items
        .iter()
        .map(|item| {
            let id = item.product.id;
            (id, app.flux().get_as::<PreviewState>(&PreviewState::path(id)))
        })
        .collect();

    if json {
        let previews: Vec<_> = previews
            .iter()
            .map(|(id, preview)| serde_json::json!({ "id": id, "preview": preview }))
            .collect();
        return print_json(&serde_json::json!({ "showcase": state, "previews": previews }));
    }

    match &state.phase {
        ShowcasePhase::Failed { message } => anyhow::bail!("{}", message),
        ShowcasePhase::Empty { message } => {
            println!("{}", message);
            return Ok(());
        }
        _ => {}
    }
    println!("{:<6} {:<28} {:>10}  {}", "ID", "TITLE", "PRICE", "PREVIEW");
    for ((id, preview), item) in previews.iter().zip(&state.items) {
        let marker = if state.focus == Some(*id) { "*" } else { " " };
        println!(
            "{}{:<5} {:<28} {:>10}  {}",
            marker,
            id,
            item.product.title,
            format_price(item.product.price),
            describe_preview(preview.as_ref())
        );
    }
    if let Some(id) = focus.filter(|id| state.focus != Some(*id)) {
        println!();
        println!("Product {} is not in the catalog.", id);
    }
    Ok(())
}

fn describe_preview(preview: Option<&PreviewState>) -> String {
    match preview {
        None | Some(PreviewState::Loading) => "loading".to_string(),
        Some(PreviewState::Shown { presentation, .. }) => match presentation {
            Presentation::Model { framing, .. } => format!(
                "model (scale {:.3}, camera {:.2})",
                framing.scale, framing.camera_distance
            ),
            Presentation::Placeholder { reason } => match reason {
                PlaceholderReason::NoModel => "placeholder (no model)".to_string(),
                PlaceholderReason::LoadFailed(e) => format!("placeholder ({})", e),
            },
        },
    }
}

fn print_products(products: &[Product]) {
    println!("{:<6} {:<28} {:<16} {:>10}", "ID", "TITLE", "CATEGORY", "PRICE");
    for p in products {
        println!(
            "{:<6} {:<28} {:<16} {:>10}",
            p.id,
            p.title,
            p.category,
            format_price(p.price)
        );
    }
}

fn print_product(session: &Session, product: &Product, json: bool) -> Result<()> {
    if json {
        return print_json(product);
    }
    let catalog = &session.app.context().catalog;
    println!("{} (#{})", product.title, product.id);
    println!("  Category: {}", product.category);
    println!("  Price:    {}", format_price(product.price));
    if !product.description.is_empty() {
        println!("  {}", product.description);
    }
    if let Some(image) = product.first_image() {
        println!("  Image:    {}", catalog.resolve_asset(image));
    }
    if let Some(model) = product.model() {
        println!("  Model:    {}", catalog.resolve_asset(model));
    }
    Ok(())
}
