//! Contact form validation and submission pipeline.
//!
//! Everything in here is independent of the DOM: the view feeds events into
//! [`controller::SubmissionController`] and performs the [`controller::Effect`]s
//! it hands back.

pub mod analytics;
pub mod clock;
pub mod controller;
pub mod draft;
pub mod error;
pub mod input;
pub mod model;
pub mod rules;
pub mod submit;
pub mod validate;
pub mod verify;

pub use controller::{Effect, State, Step, SubmissionController, Target, Transition};
pub use model::{FieldValue, FormModel};
