use actix_web::web;

use crate::handlers::auth;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/register")
                    .route(web::post().to(auth::register))
            )
            .service(
                web::resource("/login")
                    .route(web::post().to(auth::login))
            )
            .service(
                web::resource("/refresh-token")
                    .route(web::post().to(auth::refresh_token))
            )
            .service(
                web::resource("/password-reset")
                    .route(web::post().to(auth::password_reset))
            )
            .service(
                web::resource("/password-reset/confirm")
                    .route(web::post().to(auth::password_reset_confirm))
            )
    );
}
