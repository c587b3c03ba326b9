//! Cart commands. Mutations go through the same requests the cart view
//! emits, against the persisted cart.

use anyhow::{Result, bail};
use storefront::cart::CartSnapshot;
use storefront::request::*;
use storefront::state::{CART_EMPTY_MESSAGE, Route};

use super::{Session, format_price, print_json};

async fn open_cart(session: &Session) {
    session.app.start(&Route::Cart.to_path()).await;
}

/// Fails when the product cannot be found, leaving the cart unchanged.
pub async fn add(session: &Session, id: u64) -> Result<()> {
    open_cart(session).await;
    session
        .app
        .flux()
        .emit(AddToCartReq::PATH, AddToCartReq { product_id: id })
        .await;
    if session.app.context().cart.line(id).is_none() {
        bail!("Product {} not found.", id);
    }
    Ok(())
}

pub async fn remove(session: &Session, id: u64) {
    open_cart(session).await;
    session
        .app
        .flux()
        .emit(RemoveFromCartReq::PATH, RemoveFromCartReq { product_id: id })
        .await;
}

pub async fn set(session: &Session, id: u64, quantity: u32) {
    open_cart(session).await;
    let req = UpdateQuantityReq {
        product_id: id,
        quantity,
    };
    session.app.flux().emit(UpdateQuantityReq::PATH, req).await;
}

pub async fn increment(session: &Session, id: u64) {
    open_cart(session).await;
    session
        .app
        .flux()
        .emit(IncrementQuantityReq::PATH, IncrementQuantityReq { product_id: id })
        .await;
}

pub async fn decrement(session: &Session, id: u64) {
    open_cart(session).await;
    session
        .app
        .flux()
        .emit(DecrementQuantityReq::PATH, DecrementQuantityReq { product_id: id })
        .await;
}

pub async fn clear(session: &Session) {
    open_cart(session).await;
    session.app.flux().emit(ClearCartReq::PATH, ClearCartReq).await;
}

/// Print the cart as the cart view shows it.
pub fn list(session: &Session, json: bool) -> Result<()> {
    let cart = session.app.context().cart.snapshot();
    if json {
        return print_json(&cart);
    }
    print_cart(&cart);
    Ok(())
}

fn print_cart(cart: &CartSnapshot) {
    if cart.is_empty() {
        println!("{}", CART_EMPTY_MESSAGE);
        return;
    }
    println!(
        "{:<6} {:<28} {:>10} {:>5} {:>10}",
        "ID", "TITLE", "PRICE", "QTY", "SUBTOTAL"
    );
    for line in &cart.items {
        println!(
            "{:<6} {:<28} {:>10} {:>5} {:>10}",
            line.product.id,
            line.product.title,
            format_price(line.product.price),
            line.quantity,
            format_price(line.subtotal())
        );
    }
    println!();
    println!("Items: {}", cart.item_count);
    println!("Total: {}", format_price(cart.total));
}
