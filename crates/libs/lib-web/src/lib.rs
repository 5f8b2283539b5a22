//! # Web Library
//!
//! HTTP handlers, middleware, services, and server setup for the BRINE backend.

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;

pub use server::{create_router, init_tracing, start_server, AppState};
