pub mod debounce;
pub mod filter;
pub mod selector;

pub use debounce::Debouncer;
pub use filter::{filter_records, matches};
pub use selector::{is_ready, FormReport, QuerySelector, SelectorState, Submission};
