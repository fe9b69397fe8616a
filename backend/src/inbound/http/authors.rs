//! Author endpoints under `/api/authors/`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::PageQuery;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::validation::{FieldError, check_optional_text, require};
use crate::domain::{Author, AuthorChanges, AuthorDraft, AuthorFilter, AuthorId, Error, Outcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::resource::{
    Links, OperationResponse, completed, found, matching_identifier, page_of, page_request,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Author as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorResponse {
    #[schema(example = 1)]
    pub author_id: i32,
    #[schema(example = "Frank")]
    pub first_name: String,
    #[schema(example = "Herbert")]
    pub last_name: String,
    pub links: Links,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        let links = Links::for_entity(&author);
        Self {
            author_id: author.author_id.get(),
            first_name: author.first_name,
            last_name: author.last_name,
            links,
        }
    }
}

/// Request body for creating or updating an author.
///
/// `author_id` is optional on creation; the store assigns one when absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct AuthorPayload {
    pub author_id: Option<i32>,
    #[schema(example = "Frank")]
    pub first_name: Option<String>,
    #[schema(example = "Herbert")]
    pub last_name: Option<String>,
}

impl AuthorPayload {
    fn validate(&self) -> Result<(), FieldError> {
        check_optional_text("first_name", self.first_name.as_deref())?;
        check_optional_text("last_name", self.last_name.as_deref())
    }

    fn changes(&self) -> AuthorChanges {
        AuthorChanges {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }

    fn into_draft(self, author_id: Option<AuthorId>) -> Result<AuthorDraft, FieldError> {
        Ok(AuthorDraft {
            author_id,
            first_name: require("first_name", self.first_name)?,
            last_name: require("last_name", self.last_name)?,
        })
    }
}

fn parse_author_id(raw: &str) -> ApiResult<AuthorId> {
    raw.parse().map_err(|_| {
        Error::invalid_identifier(format!("author_id must be an integer, got {raw:?}"))
    })
}

/// One page of authors ordered by identifier.
#[utoipa::path(
    get,
    path = "/api/authors/",
    params(
        ("page" = Option<u32>, Query, description = "1-based page number (default 1)"),
        ("items_per_page" = Option<u32>, Query, description = "Page size (default 15)")
    ),
    responses(
        (status = 200, description = "Page of authors", body = [AuthorResponse]),
        (status = 400, description = "Invalid pagination parameters", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["authors"],
    operation_id = "listAuthors"
)]
#[get("/authors/")]
pub async fn list_authors(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = page_request(query.into_inner())?;
    let outcome = state.catalogue.list_authors(&AuthorFilter::default()).await;
    page_of::<Author, AuthorResponse>(outcome, page)
}

/// Fetch one author.
#[utoipa::path(
    get,
    path = "/api/authors/{author_id}",
    params(("author_id" = i32, Path, description = "Author identifier")),
    responses(
        (status = 200, description = "Author", body = AuthorResponse),
        (status = 400, description = "Identifier is not an integer", body = ErrorSchema),
        (status = 404, description = "No such author", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["authors"],
    operation_id = "getAuthor"
)]
#[get("/authors/{author_id}")]
pub async fn get_author(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_author_id(&path)?;
    found::<Author, AuthorResponse>(state.catalogue.get_author_by_author_id(&id).await)
}

/// Delete an author.
#[utoipa::path(
    delete,
    path = "/api/authors/{author_id}",
    params(("author_id" = i32, Path, description = "Author identifier")),
    responses(
        (status = 200, description = "Author deleted", body = OperationResponse),
        (status = 400, description = "Identifier is not an integer", body = ErrorSchema),
        (status = 404, description = "No such author", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["authors"],
    operation_id = "deleteAuthor"
)]
#[delete("/authors/{author_id}")]
pub async fn delete_author(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_author_id(&path)?;
    completed::<Author, _>(
        state.catalogue.delete_author_by_author_id(&id).await,
        StatusCode::OK,
    )
}

/// Create an author, with a generated identifier unless the body names one.
#[utoipa::path(
    post,
    path = "/api/authors/",
    request_body = AuthorPayload,
    responses(
        (status = 201, description = "Author created", body = OperationResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["authors"],
    operation_id = "createAuthor"
)]
#[post("/authors/")]
pub async fn create_author(
    state: web::Data<HttpState>,
    payload: web::Json<AuthorPayload>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    payload.validate()?;
    let author_id = payload.author_id.map(AuthorId::new);
    let draft = payload.into_draft(author_id)?;
    completed::<Author, _>(
        state.catalogue.insert_author(&draft).await,
        StatusCode::CREATED,
    )
}

/// Update an author, creating it under the path identifier when unknown.
///
/// A body `author_id` must equal the path identifier.
#[utoipa::path(
    put,
    path = "/api/authors/{author_id}",
    params(("author_id" = i32, Path, description = "Author identifier")),
    request_body = AuthorPayload,
    responses(
        (status = 200, description = "Author updated", body = OperationResponse),
        (status = 201, description = "Author created", body = OperationResponse),
        (status = 400, description = "Missing or invalid fields, or a body author_id that differs from the path", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["authors"],
    operation_id = "putAuthor"
)]
#[put("/authors/{author_id}")]
pub async fn put_author(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AuthorPayload>,
) -> ApiResult<HttpResponse> {
    let id = parse_author_id(&path)?;
    let payload = payload.into_inner();
    matching_identifier("author_id", &id.get(), payload.author_id.as_ref())?;
    payload.validate()?;
    match state.catalogue.update_author(&id, &payload.changes()).await {
        Outcome::NotFound => {
            let draft = payload.into_draft(Some(id))?;
            completed::<Author, _>(
                state.catalogue.insert_author(&draft).await,
                StatusCode::CREATED,
            )
        }
        updated => completed::<Author, _>(updated, StatusCode::OK),
    }
}
