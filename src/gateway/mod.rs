//! Gateway Module
//!
//! The request orchestrator and HTTP surface of the service.
//!
//! ## Overview
//! Composes the admission controller, position validator and engine guard
//! into one pipeline per inbound request. Each stage gates the next and any
//! rejection short-circuits the rest, so a doomed request never spends engine
//! capacity.
//!
//! ## Responsibilities
//! - **Orchestration**: The admit -> parse -> search pipeline (`MoveService`).
//! - **API**: Axum handlers for the public move endpoint, the health probe and
//!   the internal operator reset.
//! - **Error mapping**: Translating `GatewayError` kinds into HTTP status
//!   codes and typed error bodies.
//!
//! ## Submodules
//! - **`service`**: The `MoveService` orchestrator.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Request/response DTOs for API communication.

pub mod handlers;
pub mod service;
pub mod types;

pub use service::MoveService;
