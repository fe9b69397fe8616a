//! OpenAPI documentation for the catalogue API.
//!
//! [`ApiDoc`] registers every handler under `inbound::http` together with
//! the request and response bodies they use. The error envelope is
//! described through [`ErrorSchema`] so the domain error stays free of
//! utoipa derives.
//!
//! Swagger UI serves the document in debug builds; `cargo run --bin
//! openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::authors::{AuthorPayload, AuthorResponse};
use crate::inbound::http::book_authors::{BookAuthorPayload, BookAuthorResponse};
use crate::inbound::http::books::{BookPayload, BookResponse};
use crate::inbound::http::resource::{Link, Links, OperationResponse};
use crate::inbound::http::schemas::{ErrorReasonSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        description = "CRUD access to books, authors and the links between them.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::books::list_books,
        crate::inbound::http::books::get_book,
        crate::inbound::http::books::delete_book,
        crate::inbound::http::books::create_book,
        crate::inbound::http::books::put_book,
        crate::inbound::http::authors::list_authors,
        crate::inbound::http::authors::get_author,
        crate::inbound::http::authors::delete_author,
        crate::inbound::http::authors::create_author,
        crate::inbound::http::authors::put_author,
        crate::inbound::http::book_authors::list_book_authors,
        crate::inbound::http::book_authors::get_book_author,
        crate::inbound::http::book_authors::delete_book_author,
        crate::inbound::http::book_authors::create_book_author,
        crate::inbound::http::book_authors::put_book_author,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        BookResponse,
        BookPayload,
        AuthorResponse,
        AuthorPayload,
        BookAuthorResponse,
        BookAuthorPayload,
        Link,
        Links,
        OperationResponse,
        ErrorSchema,
        ErrorReasonSchema
    )),
    tags(
        (name = "books", description = "Books keyed by ISBN"),
        (name = "authors", description = "Authors keyed by numeric id"),
        (name = "books_authors", description = "Contributor links between books and authors"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
