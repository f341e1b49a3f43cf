use davcal_domain::Preferences;
use tracing::{info, warn};
use url::Url;

const DEFAULT_PORT: usize = 5000;
const DEFAULT_SESSION_HEADER: &str = "x-davcal-user";
const DEFAULT_CALENDAR_COLORS: [&str; 6] = [
    "03A9F4", "3F51B5", "F44336", "FFA000", "009688", "000000",
];

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Path the application is served under, without a trailing slash.
    /// Empty when served from the root.
    pub base_path: String,
    /// Whether users are allowed to share calendars
    pub calendar_sharing: bool,
    /// Colors users can pick for their calendars. Never empty.
    pub calendar_colors: Vec<String>,
    /// Public CalDAV base url shown to users. `None` hides public urls.
    pub caldav_public_base_url: Option<String>,
    /// Request header carrying the username of the logged in user.
    /// It is expected to be set by the authenticating proxy in front of the application.
    pub session_header: String,
    /// Preferences of users that never saved any
    pub default_preferences: Preferences,
    /// Url of the external workflow service, if any
    pub workflow_url: Option<String>,
    /// Secret shared with the workflow service
    pub workflow_key: String,
}

impl Config {
    pub fn new() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the `Config` from the given variable lookup, falling back to defaults
    /// for missing or invalid values
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let port = match lookup("PORT") {
            Some(port) => match port.parse::<usize>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given PORT: {} is not valid, falling back to the default port: {}.",
                        port, DEFAULT_PORT
                    );
                    DEFAULT_PORT
                }
            },
            None => DEFAULT_PORT,
        };

        let base_path = lookup("DAVCAL_BASE_PATH")
            .map(|path| path.trim().trim_end_matches('/').to_string())
            .unwrap_or_default();

        let calendar_sharing = parse_flag(&lookup, "DAVCAL_CALENDAR_SHARING", false);
        let calendar_colors = parse_colors(lookup("DAVCAL_CALENDAR_COLORS"));
        let caldav_public_base_url = parse_public_base_url(&lookup);

        let session_header = lookup("DAVCAL_SESSION_HEADER")
            .map(|header| header.trim().to_ascii_lowercase())
            .filter(|header| !header.is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_HEADER.into());

        let mut default_preferences = Preferences::default();
        if let Some(timezone) = lookup("DAVCAL_DEFAULT_TIMEZONE") {
            if !default_preferences.set_timezone(&timezone) {
                warn!(
                    "The given DAVCAL_DEFAULT_TIMEZONE: {} is not valid, falling back to: {}.",
                    timezone, default_preferences.timezone
                );
            }
        }
        if let Some(language) = lookup("DAVCAL_DEFAULT_LANGUAGE") {
            default_preferences.language = language;
        }
        if let Some(weekstart) = lookup("DAVCAL_DEFAULT_WEEKSTART") {
            let valid = weekstart
                .trim()
                .parse::<isize>()
                .map(|wkst| default_preferences.set_weekstart(wkst))
                .unwrap_or(false);
            if !valid {
                warn!(
                    "The given DAVCAL_DEFAULT_WEEKSTART: {} is not a day between 0 and 6, falling back to: {}.",
                    weekstart, default_preferences.weekstart
                );
            }
        }
        if let Some(list_days) = lookup("DAVCAL_DEFAULT_LIST_DAYS") {
            let valid = list_days
                .trim()
                .parse::<usize>()
                .map(|days| default_preferences.set_list_days(days))
                .unwrap_or(false);
            if !valid {
                warn!(
                    "The given DAVCAL_DEFAULT_LIST_DAYS: {} is not between 1 and 31, falling back to: {}.",
                    list_days, default_preferences.list_days
                );
            }
        }

        let workflow_url = lookup("DAVCAL_WORKFLOW_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        let workflow_key = lookup("DAVCAL_WORKFLOW_KEY").unwrap_or_default();
        if workflow_url.is_some() && workflow_key.is_empty() {
            warn!("DAVCAL_WORKFLOW_URL is set but DAVCAL_WORKFLOW_KEY is empty.");
        }

        Self {
            port,
            base_path,
            calendar_sharing,
            calendar_colors,
            caldav_public_base_url,
            session_header,
            default_preferences,
            workflow_url,
            workflow_key,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str, default: bool) -> bool {
    match lookup(key) {
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                warn!(
                    "The given {}: {} is not a valid flag, falling back to: {}.",
                    key, value, default
                );
                default
            }
        },
        None => default,
    }
}

fn parse_colors(colors: Option<String>) -> Vec<String> {
    let colors = colors
        .unwrap_or_default()
        .split(',')
        .map(|color| color.trim().trim_start_matches('#').to_ascii_uppercase())
        .filter(|color| !color.is_empty())
        .filter(|color| {
            let valid = color.len() == 6 && color.chars().all(|c| c.is_ascii_hexdigit());
            if !valid {
                warn!("Ignoring invalid calendar color: {}", color);
            }
            valid
        })
        .collect::<Vec<_>>();

    if colors.is_empty() {
        info!("No calendar colors configured, using the default palette.");
        return DEFAULT_CALENDAR_COLORS.iter().map(|c| c.to_string()).collect();
    }
    colors
}

fn parse_public_base_url<F: Fn(&str) -> Option<String>>(lookup: &F) -> Option<String> {
    if !parse_flag(lookup, "DAVCAL_CALDAV_PUBLIC_URLS", false) {
        return None;
    }

    match lookup("DAVCAL_CALDAV_PUBLIC_BASE_URL") {
        Some(url) => match Url::parse(&url) {
            Ok(_) => Some(url),
            Err(e) => {
                warn!(
                    "The given DAVCAL_CALDAV_PUBLIC_BASE_URL: {} is not valid ({}), public CalDAV urls will not be shown.",
                    url, e
                );
                None
            }
        },
        None => {
            warn!("DAVCAL_CALDAV_PUBLIC_URLS is enabled but DAVCAL_CALDAV_PUBLIC_BASE_URL is missing, public CalDAV urls will not be shown.");
            None
        }
    }
}
