pub mod backend;
pub mod client;
pub mod url;

pub use backend::*;
pub use client::*;
pub use url::build_url;
