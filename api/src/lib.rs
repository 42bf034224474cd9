// Module layout
// - bootstrap: configuration and service registry
// - domain: fishnik and credential value types with their validation
// - application: ports (repository/token traits) and one use case per operation
// - infrastructure: Postgres and in-memory adapters, token crypto
// - presentation: axum handlers, auth middleware, router

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
