//! Book/author link endpoints under `/api/books_authors/`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::PageQuery;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::validation::{FieldError, require};
use crate::domain::{
    AuthorId, BookAuthor, BookAuthorChanges, BookAuthorDraft, BookAuthorFilter, BookAuthorId,
    Error, Isbn, Outcome,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::resource::{
    Links, OperationResponse, completed, found, matching_identifier, page_of, page_request,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Book/author link as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookAuthorResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "978-0441013593")]
    pub isbn: String,
    #[schema(example = 1)]
    pub author_id: i32,
    pub links: Links,
}

impl From<BookAuthor> for BookAuthorResponse {
    fn from(link: BookAuthor) -> Self {
        let links = Links::for_entity(&link);
        Self {
            id: link.id.get(),
            isbn: link.isbn.to_string(),
            author_id: link.author_id.get(),
            links,
        }
    }
}

/// Request body for creating or updating a link.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct BookAuthorPayload {
    pub id: Option<i32>,
    #[schema(example = "978-0441013593")]
    pub isbn: Option<String>,
    #[schema(example = 1)]
    pub author_id: Option<i32>,
}

impl BookAuthorPayload {
    fn changes(&self) -> Result<BookAuthorChanges, FieldError> {
        Ok(BookAuthorChanges {
            isbn: self.isbn.clone().map(Isbn::new).transpose()?,
            author_id: self.author_id.map(AuthorId::new),
        })
    }

    fn into_draft(self, id: Option<BookAuthorId>) -> Result<BookAuthorDraft, FieldError> {
        Ok(BookAuthorDraft {
            id,
            isbn: Isbn::new(require("isbn", self.isbn)?)?,
            author_id: AuthorId::new(require("author_id", self.author_id)?),
        })
    }
}

fn parse_link_id(raw: &str) -> ApiResult<BookAuthorId> {
    raw.parse()
        .map_err(|_| Error::invalid_identifier(format!("id must be an integer, got {raw:?}")))
}

/// One page of links ordered by identifier.
#[utoipa::path(
    get,
    path = "/api/books_authors/",
    params(
        ("page" = Option<u32>, Query, description = "1-based page number (default 1)"),
        ("items_per_page" = Option<u32>, Query, description = "Page size (default 15)")
    ),
    responses(
        (status = 200, description = "Page of links", body = [BookAuthorResponse]),
        (status = 400, description = "Invalid pagination parameters", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["books_authors"],
    operation_id = "listBookAuthors"
)]
#[get("/books_authors/")]
pub async fn list_book_authors(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = page_request(query.into_inner())?;
    let outcome = state
        .catalogue
        .list_book_authors(&BookAuthorFilter::default())
        .await;
    page_of::<BookAuthor, BookAuthorResponse>(outcome, page)
}

/// Fetch one link.
#[utoipa::path(
    get,
    path = "/api/books_authors/{id}",
    params(("id" = i32, Path, description = "Link identifier")),
    responses(
        (status = 200, description = "Link", body = BookAuthorResponse),
        (status = 400, description = "Identifier is not an integer", body = ErrorSchema),
        (status = 404, description = "No such link", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["books_authors"],
    operation_id = "getBookAuthor"
)]
#[get("/books_authors/{id}")]
pub async fn get_book_author(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_link_id(&path)?;
    found::<BookAuthor, BookAuthorResponse>(state.catalogue.get_book_author_by_id(&id).await)
}

/// Delete a link.
#[utoipa::path(
    delete,
    path = "/api/books_authors/{id}",
    params(("id" = i32, Path, description = "Link identifier")),
    responses(
        (status = 200, description = "Link deleted", body = OperationResponse),
        (status = 400, description = "Identifier is not an integer", body = ErrorSchema),
        (status = 404, description = "No such link", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["books_authors"],
    operation_id = "deleteBookAuthor"
)]
#[delete("/books_authors/{id}")]
pub async fn delete_book_author(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_link_id(&path)?;
    completed::<BookAuthor, _>(
        state.catalogue.delete_book_author_by_id(&id).await,
        StatusCode::OK,
    )
}

/// Link a book to an author. Both must already exist.
#[utoipa::path(
    post,
    path = "/api/books_authors/",
    request_body = BookAuthorPayload,
    responses(
        (status = 201, description = "Link created", body = OperationResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["books_authors"],
    operation_id = "createBookAuthor"
)]
#[post("/books_authors/")]
pub async fn create_book_author(
    state: web::Data<HttpState>,
    payload: web::Json<BookAuthorPayload>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let id = payload.id.map(BookAuthorId::new);
    let draft = payload.into_draft(id)?;
    completed::<BookAuthor, _>(
        state.catalogue.insert_book_author(&draft).await,
        StatusCode::CREATED,
    )
}

/// Update a link, creating it under the path identifier when unknown.
///
/// A body `id` must equal the path identifier.
#[utoipa::path(
    put,
    path = "/api/books_authors/{id}",
    params(("id" = i32, Path, description = "Link identifier")),
    request_body = BookAuthorPayload,
    responses(
        (status = 200, description = "Link updated", body = OperationResponse),
        (status = 201, description = "Link created", body = OperationResponse),
        (status = 400, description = "Missing or invalid fields, or a body id that differs from the path", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["books_authors"],
    operation_id = "putBookAuthor"
)]
#[put("/books_authors/{id}")]
pub async fn put_book_author(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<BookAuthorPayload>,
) -> ApiResult<HttpResponse> {
    let id = parse_link_id(&path)?;
    let payload = payload.into_inner();
    matching_identifier("id", &id.get(), payload.id.as_ref())?;
    let changes = payload.changes()?;
    match state.catalogue.update_book_author(&id, &changes).await {
        Outcome::NotFound => {
            let draft = payload.into_draft(Some(id))?;
            completed::<BookAuthor, _>(
                state.catalogue.insert_book_author(&draft).await,
                StatusCode::CREATED,
            )
        }
        updated => completed::<BookAuthor, _>(updated, StatusCode::OK),
    }
}
