pub mod dto;
mod error;
mod handlers;
mod routes;

pub use routes::router;
