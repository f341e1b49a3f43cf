use super::IPreferencesRepo;
use davcal_domain::Preferences;
use std::collections::HashMap;
use std::sync::Mutex;

pub struct InMemoryPreferencesRepo {
    preferences: Mutex<HashMap<String, Preferences>>,
}

impl InMemoryPreferencesRepo {
    pub fn new() -> Self {
        Self {
            preferences: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl IPreferencesRepo for InMemoryPreferencesRepo {
    async fn save(&self, username: &str, preferences: &Preferences) -> anyhow::Result<()> {
        let mut stored = self
            .preferences
            .lock()
            .map_err(|_| anyhow::Error::msg("Preferences store lock is poisoned"))?;
        stored.insert(username.to_string(), preferences.clone());
        Ok(())
    }

    async fn find(&self, username: &str) -> Option<Preferences> {
        let stored = self.preferences.lock().ok()?;
        stored.get(username).cloned()
    }
}
