mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::{IPreferencesRepo, Repos};
use std::sync::Arc;
pub use system::{ISys, StaticSys};
use system::RealSys;
use tracing::info;

#[derive(Clone)]
pub struct DavcalContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl DavcalContext {
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> DavcalContext {
    let ctx = DavcalContext::create_inmemory();
    info!(
        "Context ready. Serving under base path: `{}`, reading usernames from header: `{}`",
        ctx.config.base_path, ctx.config.session_header
    );
    ctx
}
