mod preferences;

pub use preferences::IPreferencesRepo;
use preferences::InMemoryPreferencesRepo;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    pub preferences: Arc<dyn IPreferencesRepo>,
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            preferences: Arc::new(InMemoryPreferencesRepo::new()),
        }
    }
}
