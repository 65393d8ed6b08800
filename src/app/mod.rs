// App layer: HTTP surface over the ranking store.

pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod response;
pub mod server;

pub use server::{build_router, serve};
