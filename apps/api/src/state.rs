use std::sync::Arc;

use crate::assets::AssetStore;
use crate::auth::identity::IdentityProvider;
use crate::config::Config;
use crate::repository::ApplicationRepository;

/// Shared application state injected into all route handlers via Axum
/// extractors. The three collaborators are trait objects so tests swap in
/// fakes without a running Postgres, object store, or identity service.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn ApplicationRepository>,
    pub assets: Arc<dyn AssetStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub config: Config,
}
