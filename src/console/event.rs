use crate::error::Result;
use crate::logic::Submission;
use crate::model::{ParameterSet, QueryKind, QueryResponse};

/// Everything the console loop reacts to, from user input and from its own
/// timers and requests.
#[derive(Debug)]
pub enum ConsoleEvent {
    Select(QueryKind),
    Dismiss,
    Edit { field: String, value: String },
    /// Delayed report from a debounced form
    Reported { activation: u64, params: ParameterSet },
    Submit(Submission),
    Completed {
        sequence: u64,
        kind: QueryKind,
        result: Result<QueryResponse>,
    },
    Search(String),
    ClearSearch,
    /// 1-based position in the displayed list
    Copy(usize),
    CopiedExpired,
    ShowMenu,
    ShowResults,
    Help,
    Notice(String),
    Quit,
}
