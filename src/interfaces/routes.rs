use actix_web::web;

use crate::handlers::{home::home, json_error::not_found, system::health_check};

mod auth;
mod comments;
mod photos;
mod profile;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(web::resource("/health").route(web::get().to(health_check)));

    cfg.configure(auth::config_routes);
    cfg.configure(photos::config_routes);
    cfg.configure(comments::config_routes);
    cfg.configure(profile::config_routes);

    cfg.default_service(web::route().to(not_found));
}
