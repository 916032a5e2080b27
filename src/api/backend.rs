use crate::error::Result;
use crate::model::{ParameterSet, QueryKind, QueryResponse};

/// Anything that can answer a query submission.
///
/// The console only talks to this seam; [`crate::api::ApiClient`] is the
/// real implementation.
#[async_trait::async_trait]
pub trait QueryBackend: Send + Sync {
    async fn fetch(&self, kind: QueryKind, params: &ParameterSet) -> Result<QueryResponse>;
}
