pub mod http;
pub mod stub;

pub use http::HttpCatalog;
pub use stub::StubCatalog;
