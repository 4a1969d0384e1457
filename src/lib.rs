//! Chess Move Gateway Library
//!
//! This library crate defines the core modules of the gateway service that sits
//! between HTTP clients and a single, expensive chess search engine.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of four loosely coupled subsystems plus shared plumbing:
//!
//! - **`position`**: FEN parsing and validation. Produces the immutable
//!   `BoardPosition` that every downstream component trusts.
//! - **`admission`**: A process-wide fixed-window rate limiter. Decides whether a
//!   request may proceed before any expensive work happens.
//! - **`engine`**: The engine resource guard. Owns the single search engine
//!   instance, serializes access to it on a dedicated worker, and enforces
//!   timeouts and a bounded wait queue.
//! - **`gateway`**: The request orchestrator and HTTP layer. Composes the other
//!   components into a per-request pipeline and maps outcomes to responses.
//! - **`config`** / **`error`**: The tunable surface and the typed failure
//!   taxonomy shared by all of the above.

pub mod admission;
pub mod config;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod position;
