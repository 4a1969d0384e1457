//! Admission Control Module
//!
//! A process-wide fixed-window rate limiter, shared by every request handler.
//!
//! ## Overview
//! The limiter exists to cap aggregate load on the single search engine, not
//! to enforce per-client fairness, so it keeps one global window for all
//! callers. It runs first in the request pipeline: rejections are a mutex
//! acquisition and a comparison, and never consume validation or engine
//! capacity.
//!
//! ## Responsibilities
//! - **Admission**: Atomic check-and-increment against the current window.
//! - **Rollover**: Advancing the window and restarting the count once the
//!   configured interval has elapsed.
//! - **Reporting**: Telling rejected callers how long until the window resets.

pub mod limiter;

pub use limiter::{AdmissionDecision, RateLimiter};
