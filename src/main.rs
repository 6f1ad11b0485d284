mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::business::{routes as business_routes, BusinessService};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::ordering::Reconciler;
use crate::features::preview::{
    routes as preview_routes, MenuService, PreviewRefresher, PreviewSignal, PreviewState,
};
use crate::features::products::{routes as products_routes, ProductService};
use crate::features::session::{routes as session_routes, SessionService};
use crate::modules::storage::{ObjectStorage, StorageClient};
use crate::modules::store::{RemoteStore, RestStore};
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn_with_state, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Configuration loaded (tokio_worker_threads={}, pid={})",
        worker_threads,
        std::process::id()
    );

    // External collaborators
    let store: Arc<dyn RemoteStore> = Arc::new(
        RestStore::new(&config.backend)
            .map_err(|e| anyhow::anyhow!("Failed to initialize REST store: {}", e))?,
    );
    let storage: Arc<dyn ObjectStorage> = Arc::new(
        StorageClient::new(&config.storage, &config.backend)
            .map_err(|e| anyhow::anyhow!("Failed to initialize object storage: {}", e))?,
    );
    tracing::info!("Hosted backend clients initialized for {}", config.backend.url);

    // Resolve which business this admin session manages
    let session_service = SessionService::new(Arc::clone(&store));
    let menu_routes = match session_service.resolve_business_id(&config.session).await {
        Ok(business_id) => {
            tracing::info!("Admin session scoped to business {}", business_id);
            build_menu_routes(&config, business_id, store, storage).await
        }
        Err(e) => {
            tracing::error!("Admin session unavailable: {}", e);
            session_routes::unavailable_routes(e.to_string())
        }
    };

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };
    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn_with_state(
                Arc::new(credentials),
                middleware::swagger_basic_auth,
            ))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Simple health check endpoint
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }

    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Layers run top to bottom: request id first, then tracing, then CORS
    let app = Router::new()
        .merge(swagger)
        .merge(menu_routes)
        .merge(health_route)
        .layer(
            ServiceBuilder::new()
                // Generate X-Request-Id using UUID v7 (or use client-provided one)
                .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::MakeSpanWithRequestId)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                // Propagate X-Request-Id to response headers
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::cors_layer(&config.app.cors_allowed_origins))
                .layer(DefaultBodyLimit::max(config.app.max_request_body_size)),
        );

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;
    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;
    // SSE subscribers hold connections open for a long time
    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;
    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;

    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// Admin and preview routes for a resolved business
async fn build_menu_routes(
    config: &Config,
    business_id: Uuid,
    store: Arc<dyn RemoteStore>,
    storage: Arc<dyn ObjectStorage>,
) -> Router {
    let signal = PreviewSignal::new(config.preview.channel_capacity);

    let reconciler = Arc::new(Reconciler::new(
        Arc::clone(&store),
        business_id,
        signal.clone(),
        config.ordering.reconcile_timeout,
    ));
    // A failed initial load leaves the dashboard answering 503 until reloaded
    match reconciler.load().await {
        Ok(snapshot) => tracing::info!(
            "Dashboard loaded: {} categories, {} products",
            snapshot.categories.len(),
            snapshot.products.len()
        ),
        Err(e) => tracing::error!("Initial dashboard load failed: {}", e),
    }

    let refresher = Arc::new(PreviewRefresher::new(Arc::new(MenuService::new(
        store,
        business_id,
    ))));
    refresher.start(signal.subscribe());
    tracing::info!("Preview refresher started");

    let dashboard_service = Arc::new(DashboardService::new(
        Arc::clone(&reconciler),
        &config.ordering,
    ));
    let category_service = Arc::new(CategoryService::new(
        Arc::clone(&reconciler),
        Arc::clone(&storage),
    ));
    let product_service = Arc::new(ProductService::new(
        Arc::clone(&reconciler),
        Arc::clone(&storage),
    ));
    let business_service = Arc::new(BusinessService::new(reconciler, storage));

    let preview_state = PreviewState {
        signal,
        refresher,
        keepalive: config.preview.keepalive,
    };

    Router::new()
        .merge(dashboard_routes::routes(dashboard_service))
        .merge(categories_routes::routes(category_service))
        .merge(products_routes::routes(product_service))
        .merge(business_routes::routes(business_service))
        .merge(preview_routes::routes(preview_state))
}
