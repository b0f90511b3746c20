use paperclip::actix::web;

use crate::handlers;

pub fn config_app(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(handlers::health)))
        .service(web::resource("/").route(web::get().to(handlers::home)))
        .service(
            web::resource("/login")
                .route(web::get().to(handlers::login_form))
                .route(web::post().to(handlers::login)),
        )
        .service(web::resource("/logout").route(web::get().to(handlers::logout)))
        .service(
            web::resource("/register")
                .route(web::get().to(handlers::register_form))
                .route(web::post().to(handlers::register)),
        )
        .service(web::resource("/books").route(web::get().to(handlers::books)))
        .service(
            web::resource("/add_book")
                .route(web::get().to(handlers::add_book_form))
                .route(web::post().to(handlers::add_book)),
        )
        .service(
            web::resource("/delete_book/{book_id}")
                .route(web::get().to(handlers::delete_book)),
        )
        .service(
            web::resource("/quiz_profile")
                .route(web::get().to(handlers::profile_quiz_form))
                .route(web::post().to(handlers::profile_quiz)),
        )
        .service(
            web::resource("/quiz_feedback")
                .route(web::get().to(handlers::feedback_quiz_form))
                .route(web::post().to(handlers::feedback_quiz)),
        );
}
