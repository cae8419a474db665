pub mod cart;
pub mod catalog;
pub mod chat;
pub mod cli;
pub mod contact;
pub mod error;
pub mod justification;
pub mod layout;
pub mod models;
pub mod server;
pub mod storefront;
pub mod view;

use catalog::Catalog;
use chat::{ new_provider, AnswerConfig };
use cli::Args;
use layout::Layout;
use log::info;
use server::Server;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use storefront::Storefront;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Storefront Configuration ---");
    info!("HTTP Address: {}", args.http_addr);
    info!("WS Chat Address: {}", args.ws_addr.as_deref().unwrap_or("disabled"));
    info!("Chat Delay: {}ms", args.chat_delay_ms);
    info!("Disabled Widgets: {:?}", args.disabled_widgets);
    info!("--------------------------------");

    let layout = Layout::without(&args.disabled_widgets)?;
    let provider = new_provider(&AnswerConfig {
        delay: Duration::from_millis(args.chat_delay_ms),
    });
    let storefront = Storefront::new(Arc::new(Catalog::ppe().clone()), layout, provider);

    let server = Server::new(storefront, args);
    server.run().await?;

    Ok(())
}
