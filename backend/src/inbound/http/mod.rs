//! HTTP inbound adapter exposing the catalogue over REST.

pub mod authors;
pub mod book_authors;
pub mod books;
pub mod error;
pub mod extractors;
pub mod health;
pub mod resource;
pub mod schemas;
pub mod state;

use actix_web::web;

pub use error::ApiResult;

/// Mount every catalogue endpoint under `/api`.
///
/// Callers provide [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use bookshelf::inbound::http::configure_api;
/// use bookshelf::inbound::http::state::HttpState;
///
/// let _app = App::new()
///     .app_data(web::Data::new(HttpState::in_memory()))
///     .configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(extractors::configure)
            .service(books::list_books)
            .service(books::get_book)
            .service(books::delete_book)
            .service(books::create_book)
            .service(books::put_book)
            .service(authors::list_authors)
            .service(authors::get_author)
            .service(authors::delete_author)
            .service(authors::create_author)
            .service(authors::put_author)
            .service(book_authors::list_book_authors)
            .service(book_authors::get_book_author)
            .service(book_authors::delete_book_author)
            .service(book_authors::create_book_author)
            .service(book_authors::put_book_author),
    );
}
