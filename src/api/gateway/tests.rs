//! Tests for the HTTP review gateway.

use std::time::Duration;

use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{bearer_token, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{HttpReviewGateway, ReviewGateway};
use crate::api::error::ReviewError;
use crate::api::locator::{BearerToken, HotelId, ReviewId, ReviewServiceLocator};
use crate::api::models::ReviewPayload;
use crate::api::query::{PagedReviewQuery, SortOrder};

fn gateway_for(server: &MockServer) -> HttpReviewGateway {
    let locator = ReviewServiceLocator::parse(&server.uri()).expect("mock server URI should parse");
    let token = BearerToken::new("valid-token").expect("token should be valid");
    HttpReviewGateway::new(locator, Some(token), Duration::from_secs(5))
        .expect("gateway should build")
}

fn hotel() -> HotelId {
    HotelId::new("H1").expect("hotel id should be valid")
}

fn review_id(value: &str) -> ReviewId {
    ReviewId::new(value).expect("review id should be valid")
}

fn review_body(id: &str, rating: u8, text: &str) -> serde_json::Value {
    json!({
        "review_id": id,
        "hotel_id": "H1",
        "user": { "first_name": "Ada", "last_name": null },
        "rating": rating,
        "review_text": text,
        "created_at": "2025-03-01T10:15:00Z"
    })
}

#[tokio::test]
async fn create_posts_payload_and_returns_server_review() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hotels/H1/reviews"))
        .and(bearer_token("valid-token"))
        .and(body_json(json!({ "rating": 4, "review_text": "Great stay" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(review_body("R1", 4, "Great stay")))
        .expect(1)
        .mount(&server)
        .await;

    let payload = ReviewPayload {
        rating: 4,
        review_text: "Great stay".to_owned(),
    };
    let review = gateway_for(&server)
        .create(&hotel(), &payload)
        .await
        .expect("create should succeed");

    assert_eq!(review.review_id.as_str(), "R1");
    assert_eq!(review.rating, 4);
    assert_eq!(review.review_text, "Great stay");
    assert_eq!(review.created_at.to_rfc3339(), "2025-03-01T10:15:00+00:00");
}

#[tokio::test]
async fn list_sends_paging_query_and_decodes_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hotels/H1/reviews"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .and(query_param("sort", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reviews": [review_body("R6", 3, "Decent room"), review_body("R7", 5, "Superb view")],
            "page": 2,
            "limit": 5,
            "total": 7
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = PagedReviewQuery::new(2, 5, SortOrder::Asc).expect("query should be valid");
    let page = gateway_for(&server)
        .list(&hotel(), &query)
        .await
        .expect("list should succeed");

    let ids: Vec<&str> = page.reviews.iter().map(|r| r.review_id.as_str()).collect();
    assert_eq!(ids, vec!["R6", "R7"], "server order must be preserved");
    assert_eq!(page.total, Some(7));
}

#[tokio::test]
async fn list_uses_default_query_values() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hotels/H1/reviews"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .and(query_param("sort", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let page = gateway_for(&server)
        .list(&hotel(), &PagedReviewQuery::default())
        .await
        .expect("list should succeed");

    assert!(page.reviews.is_empty());
}

#[tokio::test]
async fn get_one_maps_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hotels/H1/reviews/R404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "missing" })))
        .mount(&server)
        .await;

    let error = gateway_for(&server)
        .get_one(&hotel(), &review_id("R404"))
        .await
        .expect_err("missing review should fail");

    assert_eq!(
        error,
        ReviewError::NotFound {
            resource: "/hotels/H1/reviews/R404".to_owned()
        }
    );
}

#[tokio::test]
async fn get_one_accepts_wrapped_review() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hotels/H1/reviews/R3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "review": review_body("R3", 2, "Noisy street") })),
        )
        .mount(&server)
        .await;

    let review = gateway_for(&server)
        .get_one(&hotel(), &review_id("R3"))
        .await
        .expect("get should succeed");

    assert_eq!(review.rating, 2);
    assert_eq!(
        review.user.and_then(|user| user.first_name).as_deref(),
        Some("Ada")
    );
}

#[tokio::test]
async fn update_puts_payload_to_review_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/hotels/H1/reviews/R7"))
        .and(body_json(json!({ "rating": 2, "review_text": "Changed my mind" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(review_body("R7", 2, "Changed my mind")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let payload = ReviewPayload {
        rating: 2,
        review_text: "Changed my mind".to_owned(),
    };
    let review = gateway_for(&server)
        .update(&hotel(), &review_id("R7"), &payload)
        .await
        .expect("update should succeed");

    assert_eq!(review.review_text, "Changed my mind");
}

#[tokio::test]
async fn delete_returns_raw_confirmation() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/hotels/H1/reviews/R7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let confirmation = gateway_for(&server)
        .delete(&hotel(), &review_id("R7"))
        .await
        .expect("delete should succeed");

    assert_eq!(confirmation.status, 204);
    assert!(confirmation.body.is_empty());
}

#[rstest]
#[case::unauthorised(401, "auth")]
#[case::forbidden(403, "auth")]
#[case::server_error(500, "api")]
#[tokio::test]
async fn error_statuses_propagate_without_retry(#[case] status: u16, #[case] kind: &str) {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/hotels/H1/reviews/R1"))
        .respond_with(
            ResponseTemplate::new(status).set_body_json(json!({ "message": "nope" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let error = gateway_for(&server)
        .delete(&hotel(), &review_id("R1"))
        .await
        .expect_err("error status should fail");

    match (kind, &error) {
        ("auth", ReviewError::Authentication { message }) => {
            assert!(message.contains("nope"), "unexpected message: {message}");
        }
        ("api", ReviewError::Api { status: code, message }) => {
            assert_eq!(*code, status);
            assert!(message.contains("nope"), "unexpected message: {message}");
        }
        _ => panic!("unexpected error for status {status}: {error:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hotels/H1/reviews/R1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let error = gateway_for(&server)
        .get_one(&hotel(), &review_id("R1"))
        .await
        .expect_err("malformed body should fail");

    assert!(
        matches!(error, ReviewError::Decode { .. }),
        "expected Decode, got {error:?}"
    );
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    let locator =
        ReviewServiceLocator::parse("http://127.0.0.1:9").expect("locator should parse");
    let gateway = HttpReviewGateway::new(locator, None, Duration::from_secs(2))
        .expect("gateway should build");

    let error = gateway
        .list(&hotel(), &PagedReviewQuery::default())
        .await
        .expect_err("connection should be refused");

    assert!(
        matches!(error, ReviewError::Network { .. }),
        "expected Network, got {error:?}"
    );
}
