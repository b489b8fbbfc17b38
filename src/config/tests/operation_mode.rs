//! Tests for operation mode determination.

use rstest::rstest;

use crate::HotelReviewsConfig;
use crate::config::OperationMode;

fn hotel_config() -> HotelReviewsConfig {
    HotelReviewsConfig {
        hotel_id: Some("H1".to_owned()),
        ..Default::default()
    }
}

#[rstest]
fn list_reviews_when_only_hotel_set() {
    assert_eq!(
        hotel_config().operation_mode(),
        OperationMode::ListReviews,
        "should list reviews when only the hotel is set"
    );
}

#[rstest]
fn list_reviews_when_no_fields_set() {
    assert_eq!(
        HotelReviewsConfig::default().operation_mode(),
        OperationMode::ListReviews,
        "should fall back to listing"
    );
}

#[rstest]
#[case::rating(Some(4), None)]
#[case::text(None, Some("Great stay"))]
#[case::both(Some(4), Some("Great stay"))]
fn create_review_when_edits_without_review_id(
    #[case] rating: Option<u8>,
    #[case] review_text: Option<&str>,
) {
    let config = HotelReviewsConfig {
        rating,
        review_text: review_text.map(str::to_owned),
        ..hotel_config()
    };

    assert_eq!(config.operation_mode(), OperationMode::CreateReview);
}

#[rstest]
fn show_review_when_review_id_alone() {
    let config = HotelReviewsConfig {
        review_id: Some("R7".to_owned()),
        ..hotel_config()
    };

    assert_eq!(config.operation_mode(), OperationMode::ShowReview);
}

#[rstest]
fn update_review_when_review_id_and_edits() {
    let config = HotelReviewsConfig {
        review_id: Some("R7".to_owned()),
        rating: Some(2),
        ..hotel_config()
    };

    assert_eq!(config.operation_mode(), OperationMode::UpdateReview);
}

#[rstest]
fn delete_wins_over_edits_for_review_id() {
    let config = HotelReviewsConfig {
        review_id: Some("R7".to_owned()),
        rating: Some(2),
        delete: true,
        ..hotel_config()
    };

    assert_eq!(
        config.operation_mode(),
        OperationMode::DeleteReview,
        "delete should take precedence over edits"
    );
}

#[rstest]
fn login_when_token_without_hotel() {
    let config = HotelReviewsConfig {
        token: Some("abc".to_owned()),
        ..Default::default()
    };

    assert_eq!(config.operation_mode(), OperationMode::Login);
}

#[rstest]
fn token_with_hotel_is_a_one_off_request() {
    let config = HotelReviewsConfig {
        token: Some("abc".to_owned()),
        ..hotel_config()
    };

    assert_eq!(config.operation_mode(), OperationMode::ListReviews);
}

#[rstest]
fn housekeeping_flags_take_precedence() {
    let migrate = HotelReviewsConfig {
        migrate_db: true,
        logout: true,
        review_id: Some("R7".to_owned()),
        delete: true,
        ..hotel_config()
    };
    let logout = HotelReviewsConfig {
        logout: true,
        token: Some("abc".to_owned()),
        ..Default::default()
    };

    assert_eq!(migrate.operation_mode(), OperationMode::MigrateDatabase);
    assert_eq!(logout.operation_mode(), OperationMode::Logout);
}
