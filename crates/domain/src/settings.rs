use serde::Serialize;
use sha1::{Digest, Sha1};

/// Site wide configuration handed to the web frontend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteConfig {
    pub base_url: String,
    pub base_app_url: String,
    pub agendav_version: String,
    pub enable_calendar_sharing: bool,
    /// Hex colors without the leading `#`
    pub calendar_colors: Vec<String>,
    pub default_calendar_color: String,
    pub show_public_caldav_url: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caldav_public_base_url: Option<String>,
    pub workflow_url: Option<String>,
    /// See `workflow_key`
    pub workflow_key: String,
}

impl SiteConfig {
    pub fn new(
        base_path: &str,
        version: &str,
        enable_calendar_sharing: bool,
        calendar_colors: Vec<String>,
        caldav_public_base_url: Option<String>,
    ) -> Self {
        let default_calendar_color = calendar_colors
            .first()
            .map(|color| format!("#{}", color))
            .unwrap_or_default();

        Self {
            base_url: base_path.to_string(),
            base_app_url: format!("{}/", base_path),
            agendav_version: version.to_string(),
            enable_calendar_sharing,
            calendar_colors,
            default_calendar_color,
            show_public_caldav_url: caldav_public_base_url.is_some(),
            caldav_public_base_url,
            workflow_url: None,
            workflow_key: String::new(),
        }
    }

    pub fn with_workflow(mut self, url: Option<String>, key: String) -> Self {
        self.workflow_url = url;
        self.workflow_key = key;
        self
    }
}

/// Daily key shared with the workflow service: the hex SHA-1 of the
/// configured secret, the username and the day formatted as `YYYYMMDD`
pub fn workflow_key(secret: &str, username: &str, day: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(secret.as_bytes());
    hasher.update(username.as_bytes());
    hasher.update(day.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}
