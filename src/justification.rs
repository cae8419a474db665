use crate::models::catalog::Product;
use log::info;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerContext {
    pub user_id: String,
    pub department: String,
}

impl BuyerContext {
    /// Context the storefront sends on behalf of the signed-in buyer.
    pub fn demo() -> Self {
        Self {
            user_id: "proc-123".to_string(),
            department: "Clinical Operations".to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JustificationError {
    #[error("Your cart is empty. Add items before generating a justification.")]
    EmptyCart,
}

#[derive(Debug, Clone, Serialize)]
pub struct Justification {
    pub item_count: usize,
    pub buyer: BuyerContext,
    pub items: Vec<Product>,
}

impl Justification {
    pub fn confirmation(&self) -> String {
        format!(
            "Justification generation initiated for {} item(s). Check the console for details.",
            self.item_count
        )
    }
}

/// Acknowledges a justification request. Nothing is persisted and the cart is left as is.
pub fn generate_justification(
    cart_contents: &[Product],
    buyer_context: &BuyerContext
) -> Result<Justification, JustificationError> {
    if cart_contents.is_empty() {
        return Err(JustificationError::EmptyCart);
    }

    info!("--- Generating Justification ---");
    info!("Buyer Context: {}", serde_json::to_string(buyer_context).unwrap_or_default());
    info!("Cart Items: {}", serde_json::to_string(cart_contents).unwrap_or_default());

    Ok(Justification {
        item_count: cart_contents.len(),
        buyer: buyer_context.clone(),
        items: cart_contents.to_vec(),
    })
}
