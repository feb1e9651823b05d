use actix_web::web;

use crate::handlers::auth;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .service(
                web::resource("/me")
                    .route(web::get().to(auth::me))
                    .route(web::put().to(auth::update_profile))
                    .route(web::patch().to(auth::update_profile))
            )
    );
}
