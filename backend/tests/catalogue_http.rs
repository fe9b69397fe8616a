//! End-to-end HTTP scenarios against the in-memory catalogue.
//!
//! Each test builds the full application (trace middleware, `/api` scope,
//! extractor error handlers) over fresh in-process stores.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use bookshelf::Trace;
use bookshelf::inbound::http::configure_api;
use bookshelf::inbound::http::state::HttpState;

async fn app() -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::in_memory()))
            .wrap(Trace)
            .configure(configure_api),
    )
    .await
}

async fn send<S>(app: &S, request: actix_test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

async fn post<S>(app: &S, uri: &str, body: Value) -> StatusCode
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, _) = send(app, actix_test::TestRequest::post().uri(uri).set_json(body)).await;
    status
}

/// Seed author 1 and book `123` so links and books have parents.
async fn seed_dune<S>(app: &S)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    assert_eq!(
        post(app, "/api/authors/", json!({"first_name": "Frank", "last_name": "Herbert"})).await,
        StatusCode::CREATED
    );
    assert_eq!(
        post(
            app,
            "/api/books/",
            json!({"isbn": "123", "title": "Dune", "year_of_publishing": 1965, "authors_fk": 1})
        )
        .await,
        StatusCode::CREATED
    );
}

#[rstest]
#[actix_web::test]
async fn missing_author_is_a_nonexistent_resource() {
    let app = app().await;
    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/api/authors/999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "error_code": 404,
            "error_source": "Requested author does not exist.",
            "error_reason": "NONEXISTENT_RESOURCE"
        })
    );
}

#[rstest]
#[actix_web::test]
async fn non_numeric_author_ids_are_rejected() {
    let app = app().await;
    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/api/authors/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_reason"], "INVALID_IDENTIFIER");
}

#[rstest]
#[actix_web::test]
async fn insert_then_get_returns_the_stored_fields() {
    let app = app().await;
    let created = post(
        &app,
        "/api/authors/",
        json!({"first_name": "Ursula", "last_name": "Le Guin"}),
    )
    .await;
    assert_eq!(created, StatusCode::CREATED);

    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/api/authors/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Ursula");
    assert_eq!(body["last_name"], "Le Guin");
    assert_eq!(body["links"]["self"]["href"], "/api/authors/1");
    assert_eq!(body["links"]["self"]["description"], "Get the author");
}

#[rstest]
#[actix_web::test]
async fn second_page_holds_the_third_and_fourth_records() {
    let app = app().await;
    for n in 1..=5 {
        let status = post(
            &app,
            "/api/authors/",
            json!({"first_name": format!("First{n}"), "last_name": format!("Last{n}")}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        actix_test::TestRequest::get().uri("/api/authors/?page=2&items_per_page=2"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|author| author["author_id"].as_i64())
        .collect();
    assert_eq!(ids, vec![3, 4]);
}

#[rstest]
#[case("/api/books/?page=0")]
#[case("/api/books/?items_per_page=0")]
#[case("/api/books/?page=abc")]
#[actix_web::test]
async fn invalid_pagination_is_a_bad_request(#[case] uri: &str) {
    let app = app().await;
    let (status, body) = send(&app, actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_reason"], "INVALID_REQUEST");
}

#[rstest]
#[actix_web::test]
async fn put_creates_then_updates_only_given_fields() {
    let app = app().await;
    assert_eq!(
        post(&app, "/api/authors/", json!({"first_name": "Frank", "last_name": "Herbert"})).await,
        StatusCode::CREATED
    );

    let create = actix_test::TestRequest::put().uri("/api/books/123").set_json(json!({
        "title": "Dune",
        "year_of_publishing": 1965,
        "authors_fk": 1
    }));
    let (status, body) = send(&app, create).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Operation was completed successfully.");

    let update = actix_test::TestRequest::put()
        .uri("/api/books/123")
        .set_json(json!({"title": "Dune Messiah"}));
    let (status, body) = send(&app, update).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);

    let (_, book) = send(&app, actix_test::TestRequest::get().uri("/api/books/123")).await;
    assert_eq!(book["title"], "Dune Messiah");
    assert_eq!(book["year_of_publishing"], 1965);
    assert_eq!(book["authors_fk"], 1);
    assert_eq!(book["links"]["self"]["href"], "/api/books/123");
}

#[rstest]
#[actix_web::test]
async fn delete_then_get_is_not_found() {
    let app = app().await;
    seed_dune(&app).await;
    assert_eq!(
        post(&app, "/api/books_authors/", json!({"isbn": "123", "author_id": 1})).await,
        StatusCode::CREATED
    );

    let (status, body) = send(
        &app,
        actix_test::TestRequest::delete().uri("/api/books_authors/1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"code": 200, "message": "Operation was completed successfully."}));

    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/api/books_authors/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_source"], "Requested books_authors does not exist.");

    let (status, _) = send(
        &app,
        actix_test::TestRequest::delete().uri("/api/books_authors/1"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn duplicate_title_and_year_is_an_exception() {
    let app = app().await;
    seed_dune(&app).await;
    let reprint = json!({"isbn": "456", "title": "Dune", "year_of_publishing": 1965, "authors_fk": 1});

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post().uri("/api/books/").set_json(reprint),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_code"], 500);
    assert_eq!(body["error_reason"], "EXCEPTION");
    assert!(
        body["error_source"]
            .as_str()
            .is_some_and(|source| source.contains("books_un_1"))
    );
}

#[rstest]
#[case(
    "/api/books/",
    json!({"isbn": "456", "title": "Dune Messiah", "year_of_publishing": 1969, "authors_fk": 42}),
    "books_authors_fk_fkey"
)]
#[case("/api/books_authors/", json!({"isbn": "999", "author_id": 1}), "books_authors_isbn_fkey")]
#[case("/api/books_authors/", json!({"isbn": "123", "author_id": 42}), "books_authors_author_id_fkey")]
#[actix_web::test]
async fn dangling_references_are_exceptions(
    #[case] uri: &str,
    #[case] body: Value,
    #[case] constraint: &str,
) {
    let app = app().await;
    seed_dune(&app).await;

    let (status, error) = send(&app, actix_test::TestRequest::post().uri(uri).set_json(body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error["error_reason"], "EXCEPTION");
    assert!(
        error["error_source"]
            .as_str()
            .is_some_and(|source| source.contains(constraint))
    );

    let (_, links) = send(&app, actix_test::TestRequest::get().uri("/api/books_authors/")).await;
    assert_eq!(links, json!([]));
}

#[rstest]
#[actix_web::test]
async fn explicit_author_ids_do_not_block_generated_ones() {
    let app = app().await;
    let (status, _) = send(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/authors/2")
            .set_json(json!({"first_name": "Frank", "last_name": "Herbert"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    for (first, last) in [("Ursula", "Le Guin"), ("Iain", "Banks")] {
        assert_eq!(
            post(&app, "/api/authors/", json!({"first_name": first, "last_name": last})).await,
            StatusCode::CREATED
        );
    }

    let (_, body) = send(&app, actix_test::TestRequest::get().uri("/api/authors/")).await;
    let ids: Vec<i64> = body
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|author| author["author_id"].as_i64())
        .collect();
    assert_eq!(ids, vec![2, 3, 4]);
}

#[rstest]
#[actix_web::test]
async fn self_links_resolve_for_isbns_with_reserved_characters() {
    let app = app().await;
    seed_dune(&app).await;
    assert_eq!(
        post(
            &app,
            "/api/books/",
            json!({"isbn": "0-441/17271-7", "title": "Dune Messiah", "year_of_publishing": 1969, "authors_fk": 1})
        )
        .await,
        StatusCode::CREATED
    );

    let (_, page) = send(&app, actix_test::TestRequest::get().uri("/api/books/")).await;
    let href = page
        .as_array()
        .expect("array body")
        .iter()
        .find(|book| book["isbn"] == "0-441/17271-7")
        .and_then(|book| book["links"]["self"]["href"].as_str())
        .expect("self link")
        .to_owned();
    assert_eq!(href, "/api/books/0-441%2F17271-7");

    let (status, book) = send(&app, actix_test::TestRequest::get().uri(&href)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["title"], "Dune Messiah");
}

#[rstest]
#[case("/api/authors/1", json!({"author_id": 2, "first_name": "Frank"}), "author_id")]
#[case("/api/books_authors/1", json!({"id": 2, "isbn": "123", "author_id": 1}), "id")]
#[actix_web::test]
async fn put_rejects_a_body_identifier_that_differs_from_the_path(
    #[case] uri: &str,
    #[case] body: Value,
    #[case] field: &str,
) {
    let app = app().await;
    seed_dune(&app).await;

    let (status, error) = send(&app, actix_test::TestRequest::put().uri(uri).set_json(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error_reason"], "INVALID_REQUEST");
    assert_eq!(error["details"], json!({"field": field, "code": "identifier_mismatch"}));

    let (status, _) = send(&app, actix_test::TestRequest::get().uri("/api/authors/2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn every_response_carries_a_trace_id() {
    let app = app().await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/books/").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("trace-id"));
}
