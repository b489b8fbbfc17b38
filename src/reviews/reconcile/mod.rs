//! Reconciliation of server responses into a held review collection.
//!
//! The collection never shows a stale duplicate of an edited or deleted
//! review and never drops a review because a mutation failed. Only one
//! mutation per review may be in flight; responses that arrive after the
//! owner detached are ignored.

use std::collections::{HashMap, HashSet};
use std::fmt;

use thiserror::Error;

use crate::api::{DeleteConfirmation, Review, ReviewError, ReviewId};

/// Change counts from replacing the collection with a server page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeResult {
    /// Reviews that were not held before.
    pub added: usize,
    /// Reviews held before and refreshed from the page.
    pub updated: usize,
    /// Held reviews missing from the page.
    pub removed: usize,
    /// Repeated ids dropped from the page.
    pub duplicates: usize,
}

/// Mutation applied to an existing review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// `PUT` of new field values.
    Update,
    /// `DELETE` of the review.
    Delete,
}

impl MutationKind {
    /// Lowercase name used in logs and telemetry.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proof that a mutation was registered with a [`ReviewCollection`].
///
/// Hand it back with the server's response to reconcile the result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a ticket must be completed or the review stays locked"]
pub struct MutationTicket {
    review_id: ReviewId,
    kind: MutationKind,
    epoch: u64,
}

impl MutationTicket {
    /// Review the mutation addresses.
    #[must_use]
    pub const fn review_id(&self) -> &ReviewId {
        &self.review_id
    }

    /// Kind of mutation.
    #[must_use]
    pub const fn kind(&self) -> MutationKind {
        self.kind
    }
}

/// Whether a response was folded into the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled<T> {
    /// The response was applied.
    Applied(T),
    /// The owner detached before the response arrived.
    Discarded,
}

/// Errors raised while reconciling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReconcileError {
    /// The review is not in the collection.
    #[error("review {review_id} is not in the collection")]
    UnknownReview {
        /// Review requested.
        review_id: ReviewId,
    },

    /// Another mutation on the same review has not resolved.
    #[error("a {in_flight} of review {review_id} is already in flight")]
    MutationInFlight {
        /// Review requested.
        review_id: ReviewId,
        /// Mutation already running.
        in_flight: MutationKind,
    },

    /// The server rejected the mutation; the collection is unchanged.
    #[error(transparent)]
    Rejected(#[from] ReviewError),
}

/// Ordered reviews held by a screen.
#[derive(Debug, Clone, Default)]
pub struct ReviewCollection {
    reviews: Vec<Review>,
    in_flight: HashMap<ReviewId, MutationKind>,
    epoch: u64,
}

impl ReviewCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reviews in display order.
    #[must_use]
    pub const fn reviews(&self) -> &[Review] {
        self.reviews.as_slice()
    }

    /// Number of reviews held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.reviews.len()
    }

    /// True when no reviews are held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Looks a review up by id.
    #[must_use]
    pub fn get(&self, review_id: &ReviewId) -> Option<&Review> {
        self.reviews
            .iter()
            .find(|review| &review.review_id == review_id)
    }

    /// Returns the mutation in flight for `review_id`, if any.
    #[must_use]
    pub fn in_flight(&self, review_id: &ReviewId) -> Option<MutationKind> {
        self.in_flight.get(review_id).copied()
    }

    /// Replaces the held reviews with a server page.
    ///
    /// Server order is kept. When the page repeats an id, the first
    /// occurrence wins.
    pub fn replace_all(&mut self, incoming: Vec<Review>) -> MergeResult {
        let existing_ids: HashSet<ReviewId> = self
            .reviews
            .iter()
            .map(|review| review.review_id.clone())
            .collect();

        let mut seen = HashSet::with_capacity(incoming.len());
        let mut result = MergeResult::default();
        let mut merged = Vec::with_capacity(incoming.len());
        for review in incoming {
            if !seen.insert(review.review_id.clone()) {
                result.duplicates += 1;
                continue;
            }
            if existing_ids.contains(&review.review_id) {
                result.updated += 1;
            } else {
                result.added += 1;
            }
            merged.push(review);
        }
        result.removed = existing_ids.difference(&seen).count();

        self.reviews = merged;
        tracing::debug!(
            reviews = self.reviews.len(),
            added = result.added,
            updated = result.updated,
            removed = result.removed,
            duplicates = result.duplicates,
            "replaced review collection"
        );
        result
    }

    /// Adds a newly created review at the top, or replaces the held copy in
    /// place when the id is already present.
    pub fn insert_created(&mut self, review: Review) {
        if let Some(slot) = self
            .position(&review.review_id)
            .and_then(|index| self.reviews.get_mut(index))
        {
            *slot = review;
            return;
        }
        self.reviews.insert(0, review);
    }

    /// Registers an update of `review_id`.
    ///
    /// # Errors
    ///
    /// See [`ReviewCollection::begin_delete`].
    pub fn begin_update(
        &mut self,
        review_id: &ReviewId,
    ) -> Result<MutationTicket, ReconcileError> {
        self.begin(review_id, MutationKind::Update)
    }

    /// Registers a delete of `review_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::UnknownReview`] when the review is not held
    /// and [`ReconcileError::MutationInFlight`] when another mutation on it
    /// has not resolved.
    pub fn begin_delete(
        &mut self,
        review_id: &ReviewId,
    ) -> Result<MutationTicket, ReconcileError> {
        self.begin(review_id, MutationKind::Delete)
    }

    /// Folds the response to an update into the collection.
    ///
    /// On success the held review is patched in place. On failure the prior
    /// review stays visible.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Rejected`] carrying the server error.
    pub fn complete_update(
        &mut self,
        ticket: MutationTicket,
        response: Result<Review, ReviewError>,
    ) -> Result<Reconciled<Review>, ReconcileError> {
        let Some((review_id, kind)) = self.release(ticket) else {
            return Ok(Reconciled::Discarded);
        };

        let review = response.inspect_err(|error| log_rejected(&review_id, kind, error))?;
        match self
            .position(&review_id)
            .and_then(|index| self.reviews.get_mut(index))
        {
            Some(slot) => *slot = review.clone(),
            None => tracing::debug!(
                review_id = %review_id,
                "updated review is no longer held; waiting for next refresh"
            ),
        }
        tracing::info!(review_id = %review_id, "review update reconciled");
        Ok(Reconciled::Applied(review))
    }

    /// Folds the response to a delete into the collection.
    ///
    /// On success the review is removed. On failure it stays visible.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Rejected`] carrying the server error.
    pub fn complete_delete(
        &mut self,
        ticket: MutationTicket,
        response: Result<DeleteConfirmation, ReviewError>,
    ) -> Result<Reconciled<DeleteConfirmation>, ReconcileError> {
        let Some((review_id, kind)) = self.release(ticket) else {
            return Ok(Reconciled::Discarded);
        };

        let confirmation =
            response.inspect_err(|error| log_rejected(&review_id, kind, error))?;
        self.reviews.retain(|review| review.review_id != review_id);
        tracing::info!(review_id = %review_id, "review delete reconciled");
        Ok(Reconciled::Applied(confirmation))
    }

    /// Releases a ticket whose request was never sent.
    pub fn cancel(&mut self, ticket: MutationTicket) {
        let MutationTicket {
            review_id, epoch, ..
        } = ticket;
        if epoch == self.epoch {
            self.in_flight.remove(&review_id);
        }
    }

    /// Forgets every in-flight mutation so responses issued before this call
    /// are discarded.
    pub fn detach(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.in_flight.clear();
    }

    fn begin(
        &mut self,
        review_id: &ReviewId,
        kind: MutationKind,
    ) -> Result<MutationTicket, ReconcileError> {
        if self.position(review_id).is_none() {
            return Err(ReconcileError::UnknownReview {
                review_id: review_id.clone(),
            });
        }
        if let Some(&in_flight) = self.in_flight.get(review_id) {
            return Err(ReconcileError::MutationInFlight {
                review_id: review_id.clone(),
                in_flight,
            });
        }

        self.in_flight.insert(review_id.clone(), kind);
        Ok(MutationTicket {
            review_id: review_id.clone(),
            kind,
            epoch: self.epoch,
        })
    }

    /// Clears the ticket's lock. Returns `None` for a stale ticket.
    fn release(&mut self, ticket: MutationTicket) -> Option<(ReviewId, MutationKind)> {
        let MutationTicket {
            review_id,
            kind,
            epoch,
        } = ticket;
        if epoch != self.epoch {
            tracing::debug!(
                review_id = %review_id,
                kind = %kind,
                "discarding response for detached collection"
            );
            return None;
        }
        self.in_flight.remove(&review_id);
        Some((review_id, kind))
    }

    fn position(&self, review_id: &ReviewId) -> Option<usize> {
        self.reviews
            .iter()
            .position(|review| &review.review_id == review_id)
    }
}

fn log_rejected(review_id: &ReviewId, kind: MutationKind, error: &ReviewError) {
    tracing::warn!(
        review_id = %review_id,
        kind = %kind,
        error = %error,
        "review mutation rejected; keeping prior state"
    );
}
