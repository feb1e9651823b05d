use actix_web::web;

use crate::handlers::{interactions, photos};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/photos")
            .service(
                web::resource("")
                    .route(web::get().to(photos::list_photos))
                    .route(web::post().to(photos::upload_photo))
            )
            .service(
                web::resource("/feed")
                    .route(web::get().to(photos::photo_feed))
            )
            .service(
                web::resource("/saved")
                    .route(web::get().to(photos::saved_photos))
            )
            .service(
                web::resource("/{photo_id}")
                    .route(web::get().to(photos::photo_detail))
            )
            .service(
                web::resource("/{photo_id}/edit")
                    .route(web::patch().to(photos::update_photo))
                    .route(web::delete().to(photos::delete_photo))
            )
            .service(
                web::resource("/{photo_id}/like-toggle")
                    .route(web::post().to(interactions::like_toggle))
            )
            .service(
                web::resource("/{photo_id}/save-toggle")
                    .route(web::post().to(interactions::save_toggle))
            )
    );
}
