use std::fmt::Write;

use super::{ CartPanel, ChatPanel, ContactPanel, PageView };
use crate::catalog::ProductCard;
use crate::models::chat::{ ChatEntry, ChatRole };

const TITLE: &str = "PPE Procurement Storefront";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Renders the whole page. `alert` is shown as a modal dialog on top.
pub fn render_page(view: &PageView, alert: Option<&str>) -> String {
    let mut out = String::new();
    let refresh = view.chat
        .as_ref()
        .map(|c| c.pending)
        .unwrap_or(false);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    if refresh {
        out.push_str("<meta http-equiv=\"refresh\" content=\"1; url=/\">\n");
    }
    let _ = writeln!(out, "<title>{}</title>\n</head>\n<body>", TITLE);

    if let Some(chat) = &view.chat {
        out.push_str(
            "<form method=\"post\" action=\"/chat/toggle\"><button id=\"ask-procurement-btn\">Ask Procurement</button></form>\n"
        );
        render_chat(&mut out, chat);
    }
    if let Some(cards) = &view.catalog {
        render_catalog(&mut out, cards);
    }
    if let Some(cart) = &view.cart {
        render_cart(&mut out, cart);
    }
    if let Some(contact) = &view.contact {
        render_contact(&mut out, contact);
    }
    if let Some(message) = alert {
        let _ = writeln!(
            out,
            "<div class=\"alert\" role=\"alertdialog\"><p>{}</p><a href=\"/\">OK</a></div>",
            escape(message)
        );
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn render_catalog(out: &mut String, cards: &[ProductCard]) {
    out.push_str("<section id=\"catalog-grid\">\n");
    for card in cards {
        let _ = writeln!(
            out,
            r#"<div class="product-card">
    <img src="{image}" alt="{alt}" class="product-image">
    <div class="product-info">
        <h3>{name}</h3>
        <p>{description}</p>
        <p class="price">{price}</p>
        <form method="post" action="/cart/items/{id}"><button class="add-to-cart-btn" data-product-id="{id}">Add to Cart</button></form>
    </div>
</div>"#,
            image = escape(&card.image),
            alt = escape(&card.image_alt),
            name = escape(&card.name),
            description = escape(&card.description),
            price = escape(&card.price),
            id = escape(&card.add_action)
        );
    }
    out.push_str("</section>\n");
}

fn render_chat(out: &mut String, chat: &ChatPanel) {
    let class = if chat.open { "chat-panel open" } else { "chat-panel" };
    let _ = writeln!(out, "<aside id=\"chat-panel\" class=\"{}\">", class);
    out.push_str(
        "<form method=\"post\" action=\"/chat/toggle\"><button id=\"close-chat-btn\">Close</button></form>\n"
    );
    out.push_str("<div id=\"chat-conversation\">\n");
    for entry in &chat.entries {
        render_entry(out, entry, chat.scroll_to == Some(entry.id));
    }
    out.push_str("</div>\n");
    if chat.has_input {
        let _ = writeln!(
            out,
            "<form method=\"post\" action=\"/chat/questions\"><input id=\"chat-question\" name=\"question\" value=\"{}\"><button id=\"send-chat-btn\">Send</button></form>",
            escape(&chat.draft)
        );
    }
    out.push_str("</aside>\n");
}

fn render_entry(out: &mut String, entry: &ChatEntry, scroll_target: bool) {
    let mut class = String::from("chat-message");
    class.push_str(match entry.role {
        ChatRole::User => " user",
        ChatRole::Bot => " bot",
    });
    if entry.loading {
        class.push_str(" loading");
    }
    let _ = write!(out, "<div id=\"msg-{}\" class=\"{}\"", entry.id, class);
    if scroll_target {
        out.push_str(" data-scroll-target");
    }
    let _ = write!(out, "><p>{}</p>", escape(&entry.text));
    if let Some(sources) = &entry.sources {
        let _ = write!(
            out,
            "<div class=\"sources\"><strong>Sources:</strong> {}</div>",
            escape(sources)
        );
    }
    out.push_str("</div>\n");
}

fn render_cart(out: &mut String, cart: &CartPanel) {
    let hidden = if cart.visible { "" } else { " hidden" };
    let _ = writeln!(out, "<div id=\"cart-modal\"{}>", hidden);
    out.push_str(
        "<form method=\"post\" action=\"/cart/overlay\"><button class=\"overlay\" aria-label=\"Close\"></button></form>\n"
    );
    out.push_str(
        "<form method=\"post\" action=\"/cart/close\"><button id=\"close-cart-modal-btn\">Close</button></form>\n"
    );
    out.push_str("<div id=\"cart-items\">");
    for line in &cart.lines {
        let _ = write!(out, "<p>{}</p>", escape(line));
    }
    out.push_str("</div>\n");
    if cart.can_justify {
        out.push_str(
            "<form method=\"post\" action=\"/cart/justification\"><button id=\"generate-justification-btn\">Generate Justification</button></form>\n"
        );
    }
    out.push_str("</div>\n");
}

fn render_contact(out: &mut String, contact: &ContactPanel) {
    out.push_str("<form id=\"contact-form\" method=\"post\" action=\"/contact\">\n");
    for field in &contact.fields {
        let name = escape(&field.name);
        if field.name == "message" {
            let _ = writeln!(
                out,
                "<textarea name=\"{}\">{}</textarea>",
                name,
                escape(&field.value)
            );
        } else {
            let _ = writeln!(
                out,
                "<input name=\"{}\" value=\"{}\">",
                name,
                escape(&field.value)
            );
        }
    }
    out.push_str("<button type=\"submit\">Send</button>\n</form>\n");
}
