//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use hotel_reviews::ReviewError;
use hotel_reviews::api::{
    DeleteConfirmation, HotelId, PagedReviewQuery, Review, ReviewId, SortOrder,
};
use hotel_reviews::reviews::ReviewListComponent;

/// Writes a page heading followed by the rendered list.
pub fn write_review_list_to<W: Write>(
    writer: &mut W,
    hotel_id: &HotelId,
    query: &PagedReviewQuery,
    rendered: &str,
) -> Result<(), ReviewError> {
    writeln!(
        writer,
        "Reviews for hotel {hotel_id} (page {}, {} per page, {}):",
        query.page(),
        query.limit(),
        sort_label(query),
    )
    .map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;
    write!(writer, "{rendered}").map_err(|e| io_error(&e))
}

/// Writes a heading and one rendered review.
pub fn write_review_to<W: Write>(
    writer: &mut W,
    heading: &str,
    review: &Review,
) -> Result<(), ReviewError> {
    let rendered = ReviewListComponent::new().view(std::slice::from_ref(review));
    writeln!(writer, "{heading}").map_err(|e| io_error(&e))?;
    write!(writer, "{rendered}").map_err(|e| io_error(&e))
}

/// Writes the outcome of a delete.
pub fn write_deleted_to<W: Write>(
    writer: &mut W,
    review_id: &ReviewId,
    confirmation: &DeleteConfirmation,
) -> Result<(), ReviewError> {
    write_line_to(
        writer,
        &format!(
            "Deleted review {review_id} (HTTP {})",
            confirmation.status
        ),
    )
}

/// Writes one line.
pub fn write_line_to<W: Write>(writer: &mut W, message: &str) -> Result<(), ReviewError> {
    writeln!(writer, "{message}").map_err(|e| io_error(&e))
}

const fn sort_label(query: &PagedReviewQuery) -> &'static str {
    match query.sort() {
        SortOrder::Asc => "oldest first",
        SortOrder::Desc => "newest first",
    }
}

fn io_error(error: &io::Error) -> ReviewError {
    ReviewError::Io {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use hotel_reviews::api::models::test_support::sample_review;
    use hotel_reviews::api::{DeleteConfirmation, HotelId, PagedReviewQuery, ReviewId, SortOrder};

    use super::{write_deleted_to, write_review_list_to, write_review_to};

    fn written(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).expect("output should be UTF-8")
    }

    #[test]
    fn list_heading_describes_query() {
        let hotel = HotelId::new("H1").expect("hotel id should be valid");
        let query = PagedReviewQuery::new(2, 5, SortOrder::Asc).expect("query should be valid");
        let mut buffer = Vec::new();

        write_review_list_to(&mut buffer, &hotel, &query, "No reviews yet.\n")
            .expect("write should succeed");

        insta::assert_snapshot!(written(buffer), @r"
        Reviews for hotel H1 (page 2, 5 per page, oldest first):

        No reviews yet.
        ");
    }

    #[test]
    fn single_review_is_rendered_under_heading() {
        let mut buffer = Vec::new();

        write_review_to(
            &mut buffer,
            "Created review R9",
            &sample_review("R9", 4, "Great stay"),
        )
        .expect("write should succeed");

        let text = written(buffer);
        assert!(text.starts_with("Created review R9\n"));
        assert!(text.contains("Ada Lovelace"));
        assert!(text.contains("Great stay"));
    }

    #[test]
    fn delete_reports_status() {
        let review_id = ReviewId::new("R7").expect("review id should be valid");
        let confirmation = DeleteConfirmation {
            status: 204,
            body: String::new(),
        };
        let mut buffer = Vec::new();

        write_deleted_to(&mut buffer, &review_id, &confirmation).expect("write should succeed");

        assert_eq!(written(buffer), "Deleted review R7 (HTTP 204)\n");
    }
}
