use log::{ debug, info };
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::chat::{ AnswerProvider, ChatSession };
use crate::contact::ContactDesk;
use crate::justification::{ generate_justification, BuyerContext };
use crate::layout::Layout;
use crate::view::{ build_view, PageView };

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UiState {
    pub cart_open: bool,
    pub chat_open: bool,
    pub chat_draft: String,
}

/// What an action reports back to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub alert: Option<String>,
}

impl Outcome {
    pub fn silent() -> Self {
        Self { alert: None }
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Self { alert: Some(message.into()) }
    }
}

/// All page state for one shopper, plus one method per UI control.
pub struct Storefront {
    catalog: Arc<Catalog>,
    layout: Layout,
    cart: CartStore,
    chat: ChatSession,
    contact: ContactDesk,
    ui: UiState,
    flash: Option<String>,
}

impl Storefront {
    pub fn new(catalog: Arc<Catalog>, layout: Layout, provider: Arc<dyn AnswerProvider>) -> Self {
        info!(
            "Storefront wired with {} products, provider '{}', widgets {:?}",
            catalog.products().len(),
            provider.name(),
            layout.present()
        );
        Self {
            catalog,
            layout,
            cart: CartStore::new(),
            chat: ChatSession::new(provider),
            contact: ContactDesk::new(),
            ui: UiState::default(),
            flash: None,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    /// Unknown ids are ignored. Returns whether the cart grew.
    pub fn add_to_cart(&mut self, product_id: &str) -> bool {
        let Some(product) = self.catalog.find(product_id) else {
            debug!("Ignoring add-to-cart for unknown product '{}'", product_id);
            return false;
        };
        self.cart.push(product.clone());
        info!(
            "Cart updated: {}",
            serde_json::to_string(self.cart.items()).unwrap_or_default()
        );
        self.ui.cart_open = true;
        true
    }

    pub fn close_cart(&mut self) {
        self.ui.cart_open = false;
    }

    pub fn click_cart_overlay(&mut self) {
        self.close_cart();
    }

    pub fn toggle_chat(&mut self) -> bool {
        self.ui.chat_open = !self.ui.chat_open;
        self.ui.chat_open
    }

    pub fn set_chat_draft(&mut self, text: impl Into<String>) {
        self.ui.chat_draft = text.into();
    }

    /// Sends the current draft. The draft is only cleared when the question is accepted.
    pub async fn send_chat_draft(&mut self) -> Option<Uuid> {
        let accepted = self.chat.submit(&self.ui.chat_draft).await;
        if accepted.is_some() {
            self.ui.chat_draft.clear();
        }
        accepted
    }

    pub async fn ask(&mut self, question: &str) -> Option<Uuid> {
        self.set_chat_draft(question);
        self.send_chat_draft().await
    }

    /// Posts a question from a control other than the page's chat input.
    /// The page draft is left alone.
    pub async fn post_question(&self, question: &str) -> Option<Uuid> {
        self.chat.submit(question).await
    }

    /// Holds an alert until the page is rendered next.
    pub fn set_flash(&mut self, alert: Option<String>) {
        self.flash = alert;
    }

    pub fn take_flash(&mut self) -> Option<String> {
        self.flash.take()
    }

    pub fn generate_justification(&mut self) -> Outcome {
        match generate_justification(self.cart.items(), &BuyerContext::demo()) {
            Ok(justification) => {
                self.ui.cart_open = false;
                Outcome::alert(justification.confirmation())
            }
            Err(e) => Outcome::alert(e.to_string()),
        }
    }

    pub fn submit_contact(&self, fields: Vec<(String, String)>) -> Outcome {
        let receipt = self.contact.submit(fields);
        Outcome::alert(receipt.message)
    }

    pub async fn view(&self) -> PageView {
        let chat_log = self.chat.snapshot().await;
        build_view(
            &self.catalog,
            &self.cart,
            &chat_log,
            &self.contact.form(),
            &self.ui,
            &self.layout
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ new_provider, AnswerConfig };

    fn storefront() -> Storefront {
        Storefront::new(
            Arc::new(Catalog::ppe().clone()),
            Layout::full(),
            new_provider(&AnswerConfig::default())
        )
    }

    #[test]
    fn known_product_is_appended_and_opens_cart() {
        let mut store = storefront();
        assert!(store.add_to_cart("L003"));
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart().items()[0].id, "L003");
        assert!(store.ui().cart_open);
    }

    #[test]
    fn unknown_product_changes_nothing() {
        let mut store = storefront();
        assert!(!store.add_to_cart("Z999"));
        assert!(store.cart().is_empty());
        assert!(!store.ui().cart_open);
    }

    #[test]
    fn justification_on_empty_cart_keeps_cart_view_open() {
        let mut store = storefront();
        store.ui.cart_open = true;

        let outcome = store.generate_justification();

        assert_eq!(
            outcome.alert.as_deref(),
            Some("Your cart is empty. Add items before generating a justification.")
        );
        assert!(store.ui().cart_open);
    }

    #[test]
    fn justification_closes_cart_view_without_clearing_cart() {
        let mut store = storefront();
        store.add_to_cart("G001");

        let outcome = store.generate_justification();

        assert_eq!(
            outcome.alert.as_deref(),
            Some("Justification generation initiated for 1 item(s). Check the console for details.")
        );
        assert!(!store.ui().cart_open);
        assert_eq!(store.cart().len(), 1);
    }

    #[test]
    fn overlay_and_close_button_hide_cart() {
        let mut store = storefront();
        store.add_to_cart("G001");
        store.click_cart_overlay();
        assert!(!store.ui().cart_open);

        store.add_to_cart("G001");
        store.close_cart();
        assert!(!store.ui().cart_open);
    }

    #[test]
    fn toggle_chat_flips_panel() {
        let mut store = storefront();
        assert!(store.toggle_chat());
        assert!(!store.toggle_chat());
    }

    #[tokio::test]
    async fn accepted_question_clears_draft_but_blank_does_not() {
        let mut store = storefront();

        assert!(store.ask("   ").await.is_none());
        assert_eq!(store.ui().chat_draft, "   ");

        assert!(store.ask("Do you ship to Ohio?").await.is_some());
        assert!(store.ui().chat_draft.is_empty());
    }

    #[tokio::test]
    async fn posted_question_leaves_page_draft_alone() {
        let mut store = storefront();
        store.set_chat_draft("half-typed question");

        assert!(store.post_question("   ").await.is_none());
        assert!(store.post_question("Do you ship to Ohio?").await.is_some());

        assert_eq!(store.ui().chat_draft, "half-typed question");
        assert_eq!(store.chat().snapshot().await.entries().len(), 2);
    }

    #[test]
    fn flash_is_shown_once() {
        let mut store = storefront();
        store.set_flash(Some("hello".into()));
        assert_eq!(store.take_flash().as_deref(), Some("hello"));
        assert!(store.take_flash().is_none());
    }

    #[test]
    fn contact_submission_alerts_thank_you() {
        let store = storefront();
        let outcome = store.submit_contact(vec![("name".into(), "A".into())]);
        assert_eq!(
            outcome.alert.as_deref(),
            Some("Thank you for your message! We will get back to you shortly.")
        );
    }
}
