//! Response shaping shared by the entity endpoints.
//!
//! Every entity response carries a `links.self` entry pointing at its own
//! `GET` route. Mutations answer with a fixed `{code, message}` body.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use pagination::{PageQuery, PageRequest, PageRequestError};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Entity, Error, Outcome};

use super::ApiResult;

/// Message returned by every successful mutation.
pub const SUCCESS_MESSAGE: &str = "Operation was completed successfully.";

/// Hypermedia link to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Link {
    #[schema(example = "/api/books/978-0441013593")]
    pub href: String,
    #[schema(example = "GET")]
    pub method: String,
    #[schema(example = "Get the book")]
    pub description: String,
}

/// Links attached to an entity response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: Link,
}

impl Links {
    /// Self link for `entity`: `/api/{collection}/{id}`, with the identifier
    /// percent-encoded as a single path segment.
    ///
    /// # Examples
    /// ```
    /// use bookshelf::domain::{Author, AuthorId};
    /// use bookshelf::inbound::http::resource::Links;
    ///
    /// let author = Author {
    ///     author_id: AuthorId::new(7),
    ///     first_name: "Ursula".into(),
    ///     last_name: "Le Guin".into(),
    /// };
    /// let links = Links::for_entity(&author);
    /// assert_eq!(links.self_link.href, "/api/authors/7");
    /// assert_eq!(links.self_link.description, "Get the author");
    /// ```
    pub fn for_entity<E: Entity>(entity: &E) -> Self {
        Self {
            self_link: Link {
                href: format!(
                    "/api/{}/{}",
                    E::COLLECTION,
                    urlencoding::encode(&entity.id().to_string())
                ),
                method: "GET".to_owned(),
                description: format!("Get the {}", E::NAME),
            },
        }
    }
}

/// Body of a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct OperationResponse {
    #[schema(example = 200)]
    pub code: u16,
    #[schema(example = "Operation was completed successfully.")]
    pub message: String,
}

fn operation_completed(status: StatusCode) -> HttpResponse {
    HttpResponse::build(status).json(OperationResponse {
        code: status.as_u16(),
        message: SUCCESS_MESSAGE.to_owned(),
    })
}

/// The fixed 404 error for entity `E`.
pub(crate) fn not_found<E: Entity>() -> Error {
    Error::not_found(format!("Requested {} does not exist.", E::NAME))
}

/// Validate pagination parameters, applying the defaults.
pub(crate) fn page_request(query: PageQuery) -> ApiResult<PageRequest> {
    PageRequest::try_from(query).map_err(|err: PageRequestError| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": err.field(), "code": "below_minimum" }))
    })
}

/// 200 with one page of entities, each with its self link.
pub(crate) fn page_of<E, B>(outcome: Outcome<Vec<E>>, page: PageRequest) -> ApiResult<HttpResponse>
where
    E: Entity,
    B: From<E> + Serialize,
{
    match outcome {
        Outcome::Completed(entities) => {
            let body: Vec<B> = page.slice(entities).into_iter().map(B::from).collect();
            Ok(HttpResponse::Ok().json(body))
        }
        Outcome::NotFound => Ok(HttpResponse::Ok().json(Vec::<B>::new())),
        Outcome::Failed(failure) => Err(failure.into()),
    }
}

/// 200 with the entity, 404 when missing.
pub(crate) fn found<E, B>(outcome: Outcome<E>) -> ApiResult<HttpResponse>
where
    E: Entity,
    B: From<E> + Serialize,
{
    match outcome {
        Outcome::Completed(entity) => Ok(HttpResponse::Ok().json(B::from(entity))),
        Outcome::NotFound => Err(not_found::<E>()),
        Outcome::Failed(failure) => Err(failure.into()),
    }
}

/// Reject a body identifier that disagrees with the path identifier.
///
/// PUT addresses a record by its path; the body may repeat the identifier
/// but never move the record.
pub(crate) fn matching_identifier<T>(
    field: &'static str,
    path: &T,
    body: Option<&T>,
) -> ApiResult<()>
where
    T: PartialEq + std::fmt::Display + ?Sized,
{
    match body {
        Some(value) if value != path => Err(Error::invalid_request(format!(
            "{field} in the body ({value}) does not match the path ({path})"
        ))
        .with_details(json!({"field": field, "code": "identifier_mismatch"}))),
        _ => Ok(()),
    }
}

/// `{code, message}` with `status` once the operation completes, 404 when
/// its target is missing.
pub(crate) fn completed<E: Entity, T>(outcome: Outcome<T>, status: StatusCode) -> ApiResult<HttpResponse> {
    match outcome {
        Outcome::Completed(_) => Ok(operation_completed(status)),
        Outcome::NotFound => Err(not_found::<E>()),
        Outcome::Failed(failure) => Err(failure.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::StoreFailure;
    use crate::domain::{Author, AuthorId, Book, ErrorCode, Isbn};
    use rstest::rstest;

    #[rstest]
    fn not_found_messages_name_the_entity() {
        assert_eq!(not_found::<Author>().message(), "Requested author does not exist.");
        assert_eq!(
            not_found::<crate::domain::BookAuthor>().message(),
            "Requested books_authors does not exist."
        );
    }

    #[rstest]
    #[case(PageQuery { page: Some(0), items_per_page: None }, "page")]
    #[case(PageQuery { page: None, items_per_page: Some(0) }, "items_per_page")]
    fn pages_below_one_are_rejected(#[case] query: PageQuery, #[case] field: &str) {
        let err = page_request(query).expect_err("invalid page");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().and_then(|d| d["field"].as_str()), Some(field));
    }

    #[rstest]
    fn missing_pagination_parameters_use_defaults() {
        let page = page_request(PageQuery::default()).expect("defaults are valid");
        assert_eq!((page.page(), page.items_per_page()), (1, 15));
    }

    #[rstest]
    fn failed_mutations_become_internal_errors() {
        let outcome: Outcome<Author> = Outcome::Failed(StoreFailure::query("boom"));
        let err = completed::<Author, _>(outcome, StatusCode::CREATED).expect_err("failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "boom");
    }

    #[rstest]
    #[case(None)]
    #[case(Some(7))]
    fn absent_or_equal_body_identifiers_are_accepted(#[case] body: Option<i32>) {
        assert!(matching_identifier("author_id", &7, body.as_ref()).is_ok());
    }

    #[rstest]
    fn differing_body_identifiers_are_invalid_requests() {
        let err = matching_identifier("isbn", "123", Some("999")).expect_err("mismatch");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().cloned(),
            Some(json!({"field": "isbn", "code": "identifier_mismatch"}))
        );
    }

    #[rstest]
    fn self_links_use_the_identifier() {
        let author = Author {
            author_id: AuthorId::new(3),
            first_name: "Frank".to_owned(),
            last_name: "Herbert".to_owned(),
        };
        let links = Links::for_entity(&author);
        assert_eq!(links.self_link.href, "/api/authors/3");
        assert_eq!(links.self_link.method, "GET");
    }

    #[rstest]
    #[case("0-441/17271-7", "/api/books/0-441%2F17271-7")]
    #[case("978 0441013593", "/api/books/978%200441013593")]
    #[case("978-0441013593", "/api/books/978-0441013593")]
    fn self_links_encode_the_identifier_as_one_segment(#[case] isbn: &str, #[case] href: &str) {
        let book = Book {
            isbn: Isbn::new(isbn).expect("valid isbn"),
            title: "Dune".to_owned(),
            year_of_publishing: 1965,
            authors_fk: AuthorId::new(1),
        };
        assert_eq!(Links::for_entity(&book).self_link.href, href);
    }
}
