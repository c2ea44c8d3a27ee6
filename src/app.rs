use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::database::DocumentStore;
use crate::handlers;
use crate::services::{
    AccessLocksService, DocumentationService, FloorPlanService, FurnitureService, LeadService, OwnerService,
    PartnerService,
};
use crate::storage::FileStorage;

/// Shared handles injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub files: Arc<dyn FileStorage>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, files: Arc<dyn FileStorage>) -> Self {
        Self { store, files }
    }

    pub fn leads(&self) -> LeadService {
        LeadService::new(self.store.clone())
    }

    pub fn owners(&self) -> OwnerService {
        OwnerService::new(self.store.clone())
    }

    pub fn access_locks(&self) -> AccessLocksService {
        AccessLocksService::new(self.store.clone(), self.files.clone())
    }

    pub fn floor_plans(&self) -> FloorPlanService {
        FloorPlanService::new(self.store.clone(), self.files.clone())
    }

    pub fn furniture(&self) -> FurnitureService {
        FurnitureService::new(self.store.clone())
    }

    pub fn documentation(&self) -> DocumentationService {
        DocumentationService::new(self.store.clone(), self.files.clone())
    }

    pub fn partners(&self) -> PartnerService {
        PartnerService::new(self.store.clone())
    }
}

/// Build the full application router: `/`, `/health`, the `/api` tree and the
/// static upload directory.
pub fn router(state: AppState, config: &AppConfig) -> Router {
    let mut app = Router::new()
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        .nest("/api", api_routes())
        .nest_service(&config.uploads.url_prefix, ServeDir::new(&config.uploads.dir))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        app = app.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }
    app
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(lead_routes())
        .merge(owner_routes())
        .merge(access_lock_routes())
        .merge(floor_plan_routes())
        .merge(furniture_routes())
        .merge(documentation_routes())
        .merge(partner_routes())
}

fn lead_routes() -> Router<AppState> {
    use handlers::leads;

    Router::new()
        .route("/leads", get(leads::list).post(leads::create))
        .route("/leads/:lead_id", get(leads::get))
}

fn owner_routes() -> Router<AppState> {
    use handlers::owners;

    Router::new()
        .route("/owner-portal", post(owners::create))
        .route("/owner-portal/all", get(owners::list))
        .route("/owners", get(owners::list))
        .route("/owners/login", post(owners::login))
        .route("/owners/:owner_id", get(owners::get))
        .route("/owners/:owner_id/onboarding", put(owners::onboarding))
        .route("/owners/:owner_id/status", put(owners::status))
}

fn access_lock_routes() -> Router<AppState> {
    use handlers::access_locks;

    Router::new()
        .route("/owners/:owner_id/access-locks", get(access_locks::get))
        .route("/owners/:owner_id/access-locks/:section", put(access_locks::update_section))
        .route(
            "/owners/:owner_id/access-locks/:section/upload-video",
            post(access_locks::upload_video),
        )
}

fn floor_plan_routes() -> Router<AppState> {
    use handlers::floor_plan;

    Router::new()
        .route("/owners/:owner_id/floor-plan", get(floor_plan::get).put(floor_plan::update))
        .route("/owners/:owner_id/floor-plan/upload-image", post(floor_plan::upload_image))
        .route("/owners/:owner_id/floor-plan/annotations", post(floor_plan::add_annotation))
        .route(
            "/owners/:owner_id/floor-plan/annotations/:annotation_id",
            put(floor_plan::update_annotation).delete(floor_plan::delete_annotation),
        )
}

fn furniture_routes() -> Router<AppState> {
    use handlers::furniture;

    Router::new()
        .route(
            "/owners/:owner_id/furniture-equipment",
            get(furniture::get).put(furniture::update),
        )
        .route("/owners/:owner_id/furniture-equipment/items", post(furniture::add_item))
        .route(
            "/owners/:owner_id/furniture-equipment/items/:item_id",
            put(furniture::update_item).delete(furniture::delete_item),
        )
}

fn documentation_routes() -> Router<AppState> {
    use handlers::documentation;

    Router::new()
        .route("/owners/:owner_id/documentation", get(documentation::get))
        .route(
            "/owners/:owner_id/documentation/security-systems",
            get(documentation::list_items).post(documentation::create_item),
        )
        .route(
            "/owners/:owner_id/documentation/security-systems/:item_id",
            get(documentation::get_item)
                .put(documentation::update_item)
                .delete(documentation::delete_item),
        )
        .route(
            "/owners/:owner_id/documentation/security-systems/:item_id/upload-image",
            post(documentation::upload_image),
        )
        .route(
            "/owners/:owner_id/documentation/security-systems/:item_id/upload-document",
            post(documentation::upload_document),
        )
        .route(
            "/owners/:owner_id/documentation/security-systems/:item_id/images/:image_id",
            axum::routing::delete(documentation::delete_image),
        )
}

fn partner_routes() -> Router<AppState> {
    use handlers::partners;

    Router::new()
        .route("/partners/:owner_id", get(partners::list).post(partners::create))
        .route(
            "/partners/:owner_id/:partner_id",
            put(partners::update).delete(partners::delete),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
