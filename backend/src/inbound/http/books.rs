//! Book endpoints.
//!
//! ```text
//! GET    /api/books/?page=&items_per_page=
//! GET    /api/books/{isbn}
//! POST   /api/books/
//! PUT    /api/books/{isbn}
//! DELETE /api/books/{isbn}
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::PageQuery;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::validation::{FieldError, check_optional_text, require};
use crate::domain::{AuthorId, Book, BookChanges, BookDraft, BookFilter, Error, Isbn, Outcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::resource::{
    Links, OperationResponse, completed, found, matching_identifier, page_of, page_request,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Book as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookResponse {
    #[schema(example = "978-0441013593")]
    pub isbn: String,
    #[schema(example = "Dune")]
    pub title: String,
    #[schema(example = 1965)]
    pub year_of_publishing: i32,
    #[schema(example = 1)]
    pub authors_fk: i32,
    pub links: Links,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        let links = Links::for_entity(&book);
        Self {
            isbn: book.isbn.to_string(),
            title: book.title,
            year_of_publishing: book.year_of_publishing,
            authors_fk: book.authors_fk.get(),
            links,
        }
    }
}

/// Request body for creating or updating a book.
///
/// Every field is optional on update. Creation, including the PUT fallback,
/// needs all of them; on PUT the path supplies the ISBN.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct BookPayload {
    #[schema(example = "978-0441013593")]
    pub isbn: Option<String>,
    #[schema(example = "Dune")]
    pub title: Option<String>,
    #[schema(example = 1965)]
    pub year_of_publishing: Option<i32>,
    #[schema(example = 1)]
    pub authors_fk: Option<i32>,
}

impl BookPayload {
    fn validate(&self) -> Result<(), FieldError> {
        check_optional_text("isbn", self.isbn.as_deref())?;
        check_optional_text("title", self.title.as_deref())
    }

    fn changes(&self) -> BookChanges {
        BookChanges {
            title: self.title.clone(),
            year_of_publishing: self.year_of_publishing,
            authors_fk: self.authors_fk.map(AuthorId::new),
        }
    }

    fn into_draft(self, isbn: Isbn) -> Result<BookDraft, FieldError> {
        Ok(BookDraft {
            isbn,
            title: require("title", self.title)?,
            year_of_publishing: require("year_of_publishing", self.year_of_publishing)?,
            authors_fk: AuthorId::new(require("authors_fk", self.authors_fk)?),
        })
    }
}

fn parse_isbn(raw: &str) -> ApiResult<Isbn> {
    Isbn::new(raw).map_err(|err| Error::invalid_identifier(format!("Invalid isbn: {err}")))
}

/// List books one page at a time, ordered by ISBN.
#[utoipa::path(
    get,
    path = "/api/books/",
    params(
        ("page" = Option<u32>, Query, description = "1-based page number (default 1)"),
        ("items_per_page" = Option<u32>, Query, description = "Page size (default 15)")
    ),
    responses(
        (status = 200, description = "Page of books", body = [BookResponse]),
        (status = 400, description = "Invalid pagination parameters", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "listBooks"
)]
#[get("/books/")]
pub async fn list_books(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = page_request(query.into_inner())?;
    let outcome = state.catalogue.list_books(&BookFilter::default()).await;
    page_of::<Book, BookResponse>(outcome, page)
}

/// Fetch one book.
#[utoipa::path(
    get,
    path = "/api/books/{isbn}",
    params(("isbn" = String, Path, description = "Book ISBN")),
    responses(
        (status = 200, description = "Book", body = BookResponse),
        (status = 404, description = "No such book", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "getBook"
)]
#[get("/books/{isbn}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let isbn = parse_isbn(&path)?;
    found::<Book, BookResponse>(state.catalogue.get_book_by_isbn(&isbn).await)
}

/// Delete one book.
#[utoipa::path(
    delete,
    path = "/api/books/{isbn}",
    params(("isbn" = String, Path, description = "Book ISBN")),
    responses(
        (status = 200, description = "Book deleted", body = OperationResponse),
        (status = 404, description = "No such book", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "deleteBook"
)]
#[delete("/books/{isbn}")]
pub async fn delete_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let isbn = parse_isbn(&path)?;
    completed::<Book, _>(
        state.catalogue.delete_book_by_isbn(&isbn).await,
        StatusCode::OK,
    )
}

/// Create a book.
#[utoipa::path(
    post,
    path = "/api/books/",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = OperationResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "createBook"
)]
#[post("/books/")]
pub async fn create_book(
    state: web::Data<HttpState>,
    payload: web::Json<BookPayload>,
) -> ApiResult<HttpResponse> {
    let mut payload = payload.into_inner();
    payload.validate()?;
    let isbn = Isbn::new(require("isbn", payload.isbn.take())?)?;
    let draft = payload.into_draft(isbn)?;
    completed::<Book, _>(
        state.catalogue.insert_book(&draft).await,
        StatusCode::CREATED,
    )
}

/// Update a book, creating it when the ISBN is unknown.
///
/// A body `isbn` must equal the path ISBN.
#[utoipa::path(
    put,
    path = "/api/books/{isbn}",
    params(("isbn" = String, Path, description = "Book ISBN")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = OperationResponse),
        (status = 201, description = "Book created", body = OperationResponse),
        (status = 400, description = "Missing or invalid fields, or a body ISBN that differs from the path", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "putBook"
)]
#[put("/books/{isbn}")]
pub async fn put_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<BookPayload>,
) -> ApiResult<HttpResponse> {
    let isbn = parse_isbn(&path)?;
    let payload = payload.into_inner();
    matching_identifier("isbn", isbn.as_str(), payload.isbn.as_deref())?;
    payload.validate()?;
    match state.catalogue.update_book(&isbn, &payload.changes()).await {
        Outcome::NotFound => {
            let draft = payload.into_draft(isbn)?;
            completed::<Book, _>(
                state.catalogue.insert_book(&draft).await,
                StatusCode::CREATED,
            )
        }
        updated => completed::<Book, _>(updated, StatusCode::OK),
    }
}
