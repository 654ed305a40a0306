/*
 * Responsibility
 * - v1 public surface (routes() re-export など)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
