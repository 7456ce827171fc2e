/// Request handlers.
pub mod handlers;
/// Router wiring.
pub mod routes;
