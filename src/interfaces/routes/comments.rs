use actix_web::web;

use crate::handlers::comments;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/comments")
            .service(
                web::resource("")
                    .route(web::post().to(comments::create_comment))
            )
            .service(
                web::resource("/{comment_id}")
                    .route(web::delete().to(comments::delete_comment))
            )
    );
}
