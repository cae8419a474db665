use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address and port for the storefront HTTP server.
    #[arg(long, env = "HTTP_ADDR", default_value = "127.0.0.1:8080")]
    pub http_addr: String,

    /// Optional address for the live chat WebSocket server (e.g., 127.0.0.1:4000).
    #[arg(long, env = "WS_ADDR")]
    pub ws_addr: Option<String>,

    /// Simulated latency of the procurement assistant, in milliseconds.
    #[arg(long, env = "CHAT_DELAY_MS", default_value = "1500")]
    pub chat_delay_ms: u64,

    /// Widgets left out of the page (catalog-grid, chat-panel, chat-input,
    /// cart-modal, justification-button, contact-form). Their features are disabled.
    #[arg(long = "without", env = "DISABLED_WIDGETS", value_delimiter = ',')]
    pub disabled_widgets: Vec<String>,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo_page() {
        let args = Args::try_parse_from(["ppe-storefront"]).expect("args");
        assert_eq!(args.http_addr, "127.0.0.1:8080");
        assert_eq!(args.chat_delay_ms, 1500);
        assert!(args.ws_addr.is_none());
        assert!(args.disabled_widgets.is_empty());
    }

    #[test]
    fn without_accepts_comma_separated_widgets() {
        let args = Args::try_parse_from([
            "ppe-storefront",
            "--without",
            "chat-panel,contact-form",
        ]).expect("args");
        assert_eq!(args.disabled_widgets, vec!["chat-panel", "contact-form"]);
    }
}
