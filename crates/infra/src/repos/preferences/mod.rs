mod inmemory;

pub use inmemory::InMemoryPreferencesRepo;

use davcal_domain::Preferences;

#[async_trait::async_trait]
pub trait IPreferencesRepo: Send + Sync {
    async fn save(&self, username: &str, preferences: &Preferences) -> anyhow::Result<()>;
    async fn find(&self, username: &str) -> Option<Preferences>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DavcalContext;

    #[tokio::test]
    async fn test_preferences_queries() {
        let ctx = DavcalContext::create_inmemory();
        let repo = &ctx.repos.preferences;

        assert!(repo.find("jorge").await.is_none());

        let mut prefs = Preferences::default();
        prefs.set_weekstart(1);
        assert!(repo.save("jorge", &prefs).await.is_ok());
        assert_eq!(repo.find("jorge").await, Some(prefs.clone()));
        assert!(repo.find("someone_else").await.is_none());

        // Saving again replaces the stored preferences
        prefs.language = "es".into();
        assert!(repo.save("jorge", &prefs).await.is_ok());
        assert_eq!(
            repo.find("jorge").await.map(|p| p.language),
            Some("es".to_string())
        );
    }
}
