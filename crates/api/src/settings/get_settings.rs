use crate::error::DavcalError;
use crate::shared::{
    session::session_username,
    usecase::{execute, UseCase},
};
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use davcal_domain::{workflow_key, Preferences, SiteConfig};
use davcal_infra::DavcalContext;
use tracing::debug;

pub async fn get_settings_controller(
    http_req: HttpRequest,
    ctx: web::Data<DavcalContext>,
) -> Result<HttpResponse, DavcalError> {
    let username = session_username(&http_req, &ctx)?;

    let usecase = GetSettingsUseCase { username };
    let settings = execute(usecase, &ctx).await.map_err(DavcalError::from)?;
    let body = settings.to_script().map_err(|e| {
        tracing::error!("Unable to serialize settings: {:?}", e);
        DavcalError::InternalError
    })?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/javascript"))
        .insert_header((header::CACHE_CONTROL, "private, must-revalidate"))
        .insert_header((header::EXPIRES, http_date(&ctx.sys.now())))
        .insert_header((header::PRAGMA, "no-cache"))
        .body(body))
}

/// Formats a timestamp as an HTTP-date, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
fn http_date(at: &DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[derive(Debug)]
pub struct GetSettingsUseCase {
    pub username: String,
}

#[derive(Debug)]
pub struct Settings {
    pub site_config: SiteConfig,
    pub preferences: Preferences,
    pub username: String,
}

impl Settings {
    /// Renders the settings as the JavaScript snippet loaded by the frontend
    pub fn to_script(&self) -> Result<String, serde_json::Error> {
        Ok(format!(
            "var AgenDAVConf = {};\nvar AgenDAVUserPrefs = {};\nvar AgenDAVUsername = {};\n",
            serde_json::to_string(&self.site_config)?,
            serde_json::to_string(&self.preferences)?,
            serde_json::to_string(&self.username)?,
        ))
    }
}

#[derive(Debug)]
pub enum UseCaseErrors {}

impl From<UseCaseErrors> for DavcalError {
    fn from(e: UseCaseErrors) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSettingsUseCase {
    type Response = Settings;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "GetSettings";

    async fn execute(&mut self, ctx: &DavcalContext) -> Result<Self::Response, Self::Errors> {
        let config = &ctx.config;
        let today = ctx.sys.now().format("%Y%m%d").to_string();
        let site_config = SiteConfig::new(
            &config.base_path,
            crate::VERSION,
            config.calendar_sharing,
            config.calendar_colors.clone(),
            config.caldav_public_base_url.clone(),
        )
        .with_workflow(
            config.workflow_url.clone(),
            workflow_key(&config.workflow_key, &self.username, &today),
        );

        let preferences = match ctx.repos.preferences.find(&self.username).await {
            Some(preferences) => preferences,
            None => {
                debug!(
                    "No stored preferences for user: {}, using defaults",
                    self.username
                );
                config.default_preferences.clone()
            }
        };

        Ok(Settings {
            site_config,
            preferences,
            username: self.username.clone(),
        })
    }
}
