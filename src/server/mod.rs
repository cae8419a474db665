pub mod api;
pub mod websocket;

use crate::cli::Args;
use crate::error::StorefrontError;
use crate::layout::Layout;
use crate::storefront::Storefront;
use std::sync::Arc;
use tokio::sync::Mutex;
use log::error;

pub struct Server {
    storefront: Arc<Mutex<Storefront>>,
    layout: Layout,
    args: Args,
}

impl Server {
    pub fn new(storefront: Storefront, args: Args) -> Self {
        let layout = storefront.layout().clone();
        Self {
            storefront: Arc::new(Mutex::new(storefront)),
            layout,
            args,
        }
    }

    pub async fn run(&self) -> Result<(), StorefrontError> {
        if let Some(ws_addr) = self.args.ws_addr.clone() {
            self.start_ws_server(ws_addr);
        }

        self.start_http_server().await
    }

    async fn start_http_server(&self) -> Result<(), StorefrontError> {
        let state = api::AppState { storefront: self.storefront.clone() };
        api::start_http_server(&self.args.http_addr, state, &self.layout).await
    }

    fn start_ws_server(&self, addr: String) {
        let storefront = self.storefront.clone();
        tokio::spawn(async move {
            if let Err(e) = websocket::start_ws_server(&addr, storefront).await {
                error!("WebSocket server error: {}", e);
            }
        });
    }
}
