//! Review list, reconciliation, and the screen that owns them.

mod list;
mod reconcile;
mod screen;

pub use list::{
    CREATED_AT_FORMAT, DisplayReview, EMPTY_PLACEHOLDER, ReviewIntent, ReviewListComponent,
    ReviewListItem,
};
pub use reconcile::{
    MergeResult, MutationKind, MutationTicket, ReconcileError, Reconciled, ReviewCollection,
};
pub use screen::{ReviewScreen, ScreenError, ScreenState};
