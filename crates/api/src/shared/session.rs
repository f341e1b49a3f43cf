use crate::error::DavcalError;
use actix_web::HttpRequest;
use davcal_infra::DavcalContext;

/// Finds the username of the logged in user.
///
/// Authentication happens in front of this service, which only reads the
/// username from the configured session header.
pub fn session_username(http_req: &HttpRequest, ctx: &DavcalContext) -> Result<String, DavcalError> {
    let header = &ctx.config.session_header;
    let username = http_req
        .headers()
        .get(header.as_str())
        .ok_or_else(|| DavcalError::Unauthorized(format!("Missing the `{}` header", header)))?
        .to_str()
        .map_err(|_| DavcalError::Unauthorized(format!("Malformed `{}` header", header)))?
        .trim();

    if username.is_empty() {
        return Err(DavcalError::Unauthorized(format!(
            "Empty `{}` header",
            header
        )));
    }

    Ok(username.to_string())
}
