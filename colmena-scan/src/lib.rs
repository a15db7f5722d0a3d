//! Security-gate scan dispatcher.
//!
//! The camera subsystem produces a stream of decoded strings; this crate
//! parses each one into a typed [`ScanTarget`], enforces a
//! serialize-and-debounce discipline over the stream, runs exactly one
//! backend validation per accepted target, and classifies the result into a
//! [`ScanOutcome`] for presentation.
//!
//! At most one validation is ever in flight: the admission gate is a
//! synchronous check-and-set taken before the first suspension point, so two
//! frames decoded back to back cannot both pass.
#![allow(missing_docs)]

pub mod camera;
pub mod dispatcher;
pub mod outcome;
pub mod target;
pub mod validate;

pub use camera::{CameraControl, CameraError};
pub use dispatcher::{OutcomePresenter, ScanConfig, ScanDispatcher, ScanStatus};
pub use outcome::{RejectionReason, ScanOutcome, Tone};
pub use target::ScanTarget;
pub use validate::{RemoteValidator, ScanValidator};
