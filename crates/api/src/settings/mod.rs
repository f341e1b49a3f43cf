mod get_settings;

use actix_web::web;
use get_settings::get_settings_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/jssettings", web::get().to(get_settings_controller));
}
