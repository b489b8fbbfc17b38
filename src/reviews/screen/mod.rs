//! Screen controller that owns a hotel's review collection.
//!
//! The screen wires the gateway, the review form, and the reconciler
//! together and follows a small state machine:
//!
//! - `View -> Editing(review) -> Submitting(id) -> View`
//! - `View -> Deleting(id) -> View`
//!
//! A failed edit returns to `Editing` with the prior review still listed. A
//! failed delete returns to the state it started from.

use std::mem;
use std::sync::Arc;

use thiserror::Error;

use crate::api::{HotelId, PagedReviewQuery, Review, ReviewError, ReviewGateway, ReviewId};
use crate::form::{
    CreateReviewHandler, FormError, ReviewDraft, ReviewForm, SubmitHandler, UpdateReviewHandler,
};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

use super::list::ReviewListComponent;
use super::reconcile::{MergeResult, MutationKind, ReconcileError, Reconciled, ReviewCollection};

const CREATE_KIND: &str = "create";

/// Where the owning screen is in its edit and delete cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScreenState {
    /// Showing the list.
    #[default]
    View,
    /// The edit form is open for this review.
    Editing(Review),
    /// An edit of this review awaits the server.
    Submitting(ReviewId),
    /// A delete of this review awaits the server.
    Deleting(ReviewId),
}

impl ScreenState {
    /// True while a request started by the screen is outstanding.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Submitting(_) | Self::Deleting(_))
    }
}

/// Errors surfaced by [`ReviewScreen`] operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScreenError {
    /// The form blocked or failed the submission.
    #[error(transparent)]
    Form(#[from] FormError),

    /// The collection refused or rolled back the mutation.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// A gateway call outside the form failed.
    #[error(transparent)]
    Api(#[from] ReviewError),

    /// `save_edit` was called with no review open for editing.
    #[error("no review is being edited")]
    NotEditing,

    /// A previous request never resolved; call
    /// [`ReviewScreen::detach`] before continuing.
    #[error("screen is waiting on review {review_id}")]
    Busy {
        /// Review the outstanding request addresses.
        review_id: ReviewId,
    },

    /// The response arrived after the collection detached.
    ///
    /// Operations hold the screen mutably until their response is folded
    /// in, so [`ReviewScreen::detach`] cannot run in between. The variant
    /// reports collection-level discards for callers that detach the
    /// collection through other means.
    #[error("response for review {review_id} arrived after the screen detached")]
    Discarded {
        /// Review the response addressed.
        review_id: ReviewId,
    },
}

/// Review screen for one hotel.
pub struct ReviewScreen<G> {
    gateway: G,
    hotel_id: HotelId,
    collection: ReviewCollection,
    state: ScreenState,
    create_form: ReviewForm,
    edit_form: Option<ReviewForm>,
    list: ReviewListComponent,
    telemetry: Arc<dyn TelemetrySink>,
}

impl<G: ReviewGateway> ReviewScreen<G> {
    /// Creates an empty screen for `hotel_id`.
    #[must_use]
    pub fn new(gateway: G, hotel_id: HotelId, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self {
            gateway,
            hotel_id,
            collection: ReviewCollection::new(),
            state: ScreenState::View,
            create_form: ReviewForm::default(),
            edit_form: None,
            list: ReviewListComponent::new(),
            telemetry,
        }
    }

    /// Replaces the list renderer, e.g. to format times in a local offset.
    #[must_use]
    pub const fn with_list(mut self, list: ReviewListComponent) -> Self {
        self.list = list;
        self
    }

    /// Hotel the screen shows.
    #[must_use]
    pub const fn hotel_id(&self) -> &HotelId {
        &self.hotel_id
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &ScreenState {
        &self.state
    }

    /// Reviews currently shown.
    #[must_use]
    pub const fn collection(&self) -> &ReviewCollection {
        &self.collection
    }

    /// Form used for new reviews.
    #[must_use]
    pub const fn create_form(&self) -> &ReviewForm {
        &self.create_form
    }

    /// Form for the review being edited, if any.
    #[must_use]
    pub const fn edit_form(&self) -> Option<&ReviewForm> {
        self.edit_form.as_ref()
    }

    /// Renders the held reviews.
    #[must_use]
    pub fn view(&self) -> String {
        self.list.view(self.collection.reviews())
    }

    /// Fetches a page and replaces the held reviews with it.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Busy`] while a request is outstanding and
    /// [`ScreenError::Api`] when the fetch fails; the held reviews are kept.
    pub async fn refresh(
        &mut self,
        query: &PagedReviewQuery,
    ) -> Result<MergeResult, ScreenError> {
        self.ensure_idle()?;
        let page = self.gateway.list(&self.hotel_id, query).await?;
        let merge = self.collection.replace_all(page.reviews);
        self.telemetry.record(TelemetryEvent::ReviewsSynced {
            review_count: self.collection.len(),
            added: merge.added,
            updated: merge.updated,
            removed: merge.removed,
        });
        Ok(merge)
    }

    /// Submits a new review and lists it at the top.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Form`] when validation blocks the submission or
    /// the server rejects it.
    pub async fn create(&mut self, draft: ReviewDraft) -> Result<Review, ScreenError> {
        self.ensure_idle()?;
        self.create_form.set_rating(draft.rating);
        self.create_form.set_review_text(draft.review_text);

        let handler = CreateReviewHandler::new(&self.gateway, self.hotel_id.clone());
        let review = self.create_form.submit(&handler).await?;

        self.record_mutation(CREATE_KIND, &review.review_id, "applied");
        self.collection.insert_created(review.clone());
        self.create_form.reset();
        Ok(review)
    }

    /// Opens the edit form seeded with a held review.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Busy`] while a request is outstanding and
    /// [`ReconcileError::UnknownReview`] when the review is not held.
    pub fn start_edit(&mut self, review_id: &ReviewId) -> Result<&ReviewForm, ScreenError> {
        self.ensure_idle()?;
        let review = self
            .collection
            .get(review_id)
            .cloned()
            .ok_or_else(|| ReconcileError::UnknownReview {
                review_id: review_id.clone(),
            })?;

        let form = self.edit_form.insert(ReviewForm::for_edit(&review));
        self.state = ScreenState::Editing(review);
        Ok(form)
    }

    /// Closes the edit form without saving.
    pub fn cancel_edit(&mut self) {
        if matches!(self.state, ScreenState::Editing(_)) {
            self.state = ScreenState::View;
            self.edit_form = None;
        }
    }

    /// Submits the edit form and patches the review in place.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::NotEditing`] outside `Editing`,
    /// [`ScreenError::Form`] when validation blocks the submission, and
    /// [`ScreenError::Reconcile`] when the server rejects it. The screen
    /// stays in `Editing` on failure.
    pub async fn save_edit(&mut self, draft: ReviewDraft) -> Result<Review, ScreenError> {
        let ScreenState::Editing(editing) = &self.state else {
            return Err(ScreenError::NotEditing);
        };
        let original = editing.clone();
        let review_id = original.review_id.clone();
        let form = self
            .edit_form
            .get_or_insert_with(|| ReviewForm::for_edit(&original));
        form.set_rating(draft.rating);
        form.set_review_text(draft.review_text);

        let ticket = self.collection.begin_update(&review_id)?;
        let values = match form.begin_submit() {
            Ok(values) => values,
            Err(error) => {
                self.collection.cancel(ticket);
                return Err(error.into());
            }
        };

        self.state = ScreenState::Submitting(review_id.clone());
        let handler =
            UpdateReviewHandler::new(&self.gateway, self.hotel_id.clone(), review_id.clone());
        let response = handler.submit(&values).await;
        let _form_outcome = form.finish_submit(response.clone());

        match self.collection.complete_update(ticket, response) {
            Ok(Reconciled::Applied(review)) => {
                self.record_mutation(MutationKind::Update.as_str(), &review_id, "applied");
                self.state = ScreenState::View;
                self.edit_form = None;
                Ok(review)
            }
            Ok(Reconciled::Discarded) => {
                self.record_mutation(MutationKind::Update.as_str(), &review_id, "discarded");
                Err(ScreenError::Discarded { review_id })
            }
            Err(error) => {
                self.record_mutation(MutationKind::Update.as_str(), &review_id, "rejected");
                self.state = ScreenState::Editing(original);
                Err(error.into())
            }
        }
    }

    /// Deletes a held review.
    ///
    /// Deleting the review that is open for editing closes the edit form.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Reconcile`] when the review is unknown, already
    /// has a mutation in flight, or the server rejects the delete. The review
    /// stays listed on failure.
    pub async fn delete(&mut self, review_id: &ReviewId) -> Result<(), ScreenError> {
        self.ensure_idle()?;
        let ticket = self.collection.begin_delete(review_id)?;
        let previous = mem::replace(&mut self.state, ScreenState::Deleting(review_id.clone()));

        let response = self.gateway.delete(&self.hotel_id, review_id).await;

        match self.collection.complete_delete(ticket, response) {
            Ok(Reconciled::Applied(_confirmation)) => {
                self.record_mutation(MutationKind::Delete.as_str(), review_id, "applied");
                self.state = match previous {
                    ScreenState::Editing(review) if &review.review_id == review_id => {
                        self.edit_form = None;
                        ScreenState::View
                    }
                    other => other,
                };
                Ok(())
            }
            Ok(Reconciled::Discarded) => {
                self.record_mutation(MutationKind::Delete.as_str(), review_id, "discarded");
                Err(ScreenError::Discarded {
                    review_id: review_id.clone(),
                })
            }
            Err(error) => {
                self.record_mutation(MutationKind::Delete.as_str(), review_id, "rejected");
                self.state = previous;
                Err(error.into())
            }
        }
    }

    /// Drops the screen's claim on outstanding requests.
    ///
    /// Call this when an operation future was abandoned before it resolved.
    /// The abandoned request's response never reaches the collection, and
    /// the create form keeps its values but accepts a new submission.
    pub fn detach(&mut self) {
        self.collection.detach();
        self.state = ScreenState::View;
        self.edit_form = None;
        self.create_form.abandon_submit();
    }

    fn ensure_idle(&self) -> Result<(), ScreenError> {
        match &self.state {
            ScreenState::Submitting(review_id) | ScreenState::Deleting(review_id) => {
                Err(ScreenError::Busy {
                    review_id: review_id.clone(),
                })
            }
            ScreenState::View | ScreenState::Editing(_) => Ok(()),
        }
    }

    fn record_mutation(&self, kind: &str, review_id: &ReviewId, outcome: &str) {
        self.telemetry.record(TelemetryEvent::MutationReconciled {
            kind: kind.to_owned(),
            review_id: review_id.to_string(),
            outcome: outcome.to_owned(),
        });
    }
}
