mod create_valarms;
mod import_reminders;

use actix_web::web;
use create_valarms::create_valarms_controller;
use import_reminders::import_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/valarms",
        web::post().to(create_valarms_controller),
    );
    cfg.route(
        "/reminders/import",
        web::post().to(import_reminders_controller),
    );
}
