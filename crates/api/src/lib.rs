//! gamecat API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! multipart decoding) so integration tests and the binary entrypoint can
//! both access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod multipart;
pub mod params;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
