pub mod html;

use serde::Serialize;
use uuid::Uuid;

use crate::cart::CartStore;
use crate::catalog::{ render_products, Catalog, ProductCard };
use crate::chat::ChatLog;
use crate::contact::ContactField;
use crate::layout::{ Layout, Widget };
use crate::models::chat::ChatEntry;
use crate::storefront::UiState;

#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub catalog: Option<Vec<ProductCard>>,
    pub cart: Option<CartPanel>,
    pub chat: Option<ChatPanel>,
    pub contact: Option<ContactPanel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartPanel {
    pub visible: bool,
    pub lines: Vec<String>,
    pub can_justify: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatPanel {
    pub open: bool,
    pub has_input: bool,
    pub draft: String,
    pub entries: Vec<ChatEntry>,
    pub scroll_to: Option<Uuid>,
    pub pending: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactPanel {
    pub fields: Vec<ContactField>,
}

/// Projects page state into what should be on screen. Sections whose
/// widget is missing from the layout are `None`.
pub fn build_view(
    catalog: &Catalog,
    cart: &CartStore,
    chat_log: &ChatLog,
    contact_form: &[ContactField],
    ui: &UiState,
    layout: &Layout
) -> PageView {
    let cart_panel = layout.has(Widget::CartModal).then(|| CartPanel {
        visible: ui.cart_open,
        lines: cart.summary().labels(),
        can_justify: layout.has(Widget::JustificationButton),
    });

    let chat_panel = layout.has(Widget::ChatPanel).then(|| ChatPanel {
        open: ui.chat_open,
        has_input: layout.has(Widget::ChatInput),
        draft: ui.chat_draft.clone(),
        entries: chat_log.entries().to_vec(),
        scroll_to: chat_log.scroll_to(),
        pending: chat_log.has_pending(),
    });

    PageView {
        catalog: layout.has(Widget::CatalogGrid).then(|| render_products(catalog)),
        cart: cart_panel,
        chat: chat_panel,
        contact: layout.has(Widget::ContactForm).then(|| ContactPanel {
            fields: contact_form.to_vec(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::Product;

    #[test]
    fn full_layout_shows_every_section() {
        let catalog = Catalog::ppe();
        let mut cart = CartStore::new();
        cart.push(catalog.find("M002").cloned().expect("mask"));
        let ui = UiState {
            cart_open: true,
            ..UiState::default()
        };

        let view = build_view(catalog, &cart, &ChatLog::default(), &[], &ui, &Layout::full());

        assert_eq!(view.catalog.as_ref().map(Vec::len), Some(4));
        let cart_panel = view.cart.expect("cart panel");
        assert!(cart_panel.visible);
        assert_eq!(cart_panel.lines, vec!["1x NIOSH N95 Respirator Mask".to_string()]);
        assert!(view.chat.is_some());
        assert!(view.contact.is_some());
    }

    #[test]
    fn missing_widgets_drop_their_sections() {
        let catalog = Catalog::new(vec![Product::new("A", "A", "$1", "", "")]);
        let layout = Layout::without(["catalog-grid", "chat-panel", "justification-button"]).expect(
            "layout"
        );

        let view = build_view(
            &catalog,
            &CartStore::new(),
            &ChatLog::default(),
            &[],
            &UiState::default(),
            &layout
        );

        assert!(view.catalog.is_none());
        assert!(view.chat.is_none());
        let cart_panel = view.cart.expect("cart panel");
        assert!(!cart_panel.can_justify);
        assert_eq!(cart_panel.lines, vec!["Your cart is empty.".to_string()]);
    }
}
