use crate::error::StorefrontError;
use crate::layout::{ Layout, Widget };
use crate::storefront::{ Outcome, Storefront };
use crate::view::{ html::render_page, PageView };
use crate::catalog::ProductCard;

use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use axum::{
    routing::{ get, post },
    Router,
    Form,
    Json,
    extract::{ Path, Request, State },
    middleware::{ self, Next },
    response::{ Html, IntoResponse, Redirect, Response },
    http::{ header, HeaderMap, Uri },
};
use serde::{ Deserialize, Serialize };
use tower_http::cors::{ Any, CorsLayer };
use log::info;

#[derive(Clone)]
pub struct AppState {
    pub storefront: Arc<Mutex<Storefront>>,
}

#[derive(Deserialize)]
pub struct QuestionForm {
    #[serde(default)]
    pub question: String,
}

#[derive(Serialize)]
pub struct ActionOutcome {
    pub alert: Option<String>,
    pub view: PageView,
}

/// Builds the storefront router. Controls missing from `layout` get no route.
pub fn build_router(state: AppState, layout: &Layout) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    let mut app = Router::new()
        .route("/", get(page_handler))
        .route("/api/view", get(view_handler))
        .route("/healthz", get(|| async { "ok" }));

    if layout.has(Widget::CatalogGrid) {
        app = app
            .route("/api/products", get(products_handler))
            .route("/cart/items/{id}", post(add_to_cart_handler));
    }
    if layout.has(Widget::CartModal) {
        app = app
            .route("/cart/close", post(close_cart_handler))
            .route("/cart/overlay", post(cart_overlay_handler));
    }
    if layout.has(Widget::JustificationButton) {
        app = app.route("/cart/justification", post(justification_handler));
    }
    if layout.has(Widget::ChatPanel) {
        app = app.route("/chat/toggle", post(toggle_chat_handler));
    }
    if layout.has(Widget::ChatInput) {
        app = app.route("/chat/questions", post(question_handler));
    }
    if layout.has(Widget::ContactForm) {
        app = app.route("/contact", post(contact_handler));
    }

    app.fallback(not_found_handler)
        .layer(middleware::from_fn(request_logging))
        .layer(cors)
        .with_state(state)
}

pub async fn start_http_server(
    addr: &str,
    state: AppState,
    layout: &Layout
) -> Result<(), StorefrontError> {
    let listener = TcpListener::bind(addr).await.map_err(|source| StorefrontError::Bind {
        addr: addr.to_string(),
        source,
    })?;
    info!("Storefront listening on: http://{}", addr);

    let app = build_router(state, layout);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

async fn request_logging(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    info!("{} {} - {} - {}ms", method, uri, response.status(), start.elapsed().as_millis());
    response
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

/// JSON callers get the outcome inline. Form posts are redirected to the
/// page (303) and the alert is shown on that next render.
async fn respond(headers: &HeaderMap, storefront: &mut Storefront, outcome: Outcome) -> Response {
    if wants_json(headers) {
        let view = storefront.view().await;
        return Json(ActionOutcome { alert: outcome.alert, view }).into_response();
    }
    storefront.set_flash(outcome.alert);
    Redirect::to("/").into_response()
}

async fn page_handler(State(state): State<AppState>) -> Html<String> {
    let mut storefront = state.storefront.lock().await;
    let alert = storefront.take_flash();
    Html(render_page(&storefront.view().await, alert.as_deref()))
}

async fn view_handler(State(state): State<AppState>) -> Json<PageView> {
    let storefront = state.storefront.lock().await;
    Json(storefront.view().await)
}

async fn products_handler(State(state): State<AppState>) -> Json<Vec<ProductCard>> {
    let storefront = state.storefront.lock().await;
    Json(storefront.view().await.catalog.unwrap_or_default())
}

async fn add_to_cart_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap
) -> Response {
    let mut storefront = state.storefront.lock().await;
    storefront.add_to_cart(&id);
    respond(&headers, &mut storefront, Outcome::silent()).await
}

async fn close_cart_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut storefront = state.storefront.lock().await;
    storefront.close_cart();
    respond(&headers, &mut storefront, Outcome::silent()).await
}

async fn cart_overlay_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut storefront = state.storefront.lock().await;
    storefront.click_cart_overlay();
    respond(&headers, &mut storefront, Outcome::silent()).await
}

async fn justification_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut storefront = state.storefront.lock().await;
    let outcome = storefront.generate_justification();
    respond(&headers, &mut storefront, outcome).await
}

async fn toggle_chat_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut storefront = state.storefront.lock().await;
    storefront.toggle_chat();
    respond(&headers, &mut storefront, Outcome::silent()).await
}

async fn question_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<QuestionForm>
) -> Response {
    let mut storefront = state.storefront.lock().await;
    storefront.ask(&form.question).await;
    respond(&headers, &mut storefront, Outcome::silent()).await
}

async fn contact_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(fields): Form<Vec<(String, String)>>
) -> Response {
    let mut storefront = state.storefront.lock().await;
    let outcome = storefront.submit_contact(fields);
    respond(&headers, &mut storefront, outcome).await
}

async fn not_found_handler(uri: Uri) -> StorefrontError {
    StorefrontError::NotFound(uri.path().to_string())
}
