//! Client-side state of the sell screen.
//!
//! [`OrderForm`] owns the order draft, enforces the dependencies between its
//! fields and drives submission. [`Selector`] is the searchable input used for
//! every enumerated field. [`SellScreen`] mounts one form with its selectors
//! and keeps the two sides consistent.
//!
//! All transitions are synchronous, except for the order service call made by
//! [`OrderForm::submit`]. Nothing here depends on a rendering surface.

mod form;
mod selector;
mod sell;

pub use form::{
    DraftIssue, ORDER_CREATED, ORDER_REJECTED, OrderDraft, OrderForm, SubmissionState,
    SubmitOutcome,
};
pub use selector::{AUTO_COMMIT_MIN_CHARS, SelectOption, Selector, filter_options};
pub use sell::{Field, SellScreen};
