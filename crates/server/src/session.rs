//! Typed access to session-resident state.
//!
//! The cart is the only durable thing a visitor accumulates, and it lives
//! entirely in the session store under a signed cookie; the database never
//! sees it. Flash messages ride along in the same session and are consumed
//! by the next page render.

use minimart_core::Cart;
use tower_sessions::Session;

/// Session keys for visitor data.
pub mod session_keys {
    /// Key for the shopping cart mapping.
    pub const CART: &str = "cart";

    /// Key for the one-shot flash message.
    pub const FLASH: &str = "flash";
}

/// Get the cart from the session, empty if none has been stored yet.
///
/// A cart that fails to deserialize is treated as absent; the visitor
/// starts over with an empty cart rather than seeing an error page.
pub async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Store the cart in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

/// Queue a flash message for the next rendered page.
///
/// Only one message is held at a time; queueing a second before the first
/// is shown replaces it.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn push_flash(
    session: &Session,
    message: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::FLASH, message).await
}

/// Take the pending flash message out of the session, if any.
pub async fn take_flash(session: &Session) -> Option<String> {
    session
        .remove::<String>(session_keys::FLASH)
        .await
        .ok()
        .flatten()
}
