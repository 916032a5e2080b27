pub mod envelope;
pub mod params;
pub mod query;

pub use envelope::*;
pub use params::*;
pub use query::*;
