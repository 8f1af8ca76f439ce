//! Bulk mutation orchestration
//!
//! Bulk deletes fan out one request per record and let every request
//! run to completion; one failure never aborts the batch. The report
//! keeps successes and failures in submission order so callers can
//! reconcile caches and show per-record messages.

use prospect_core::BusinessId;
use prospect_remote::{CrmApi, RemoteError};

/// One record that could not be deleted, with presentable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFailure {
    pub id: BusinessId,
    pub message: String,
}

/// Outcome of a bulk delete: which ids went through, which did not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkDeleteReport {
    pub deleted: Vec<BusinessId>,
    pub failures: Vec<BulkFailure>,
}

impl BulkDeleteReport {
    /// True when every requested record was deleted.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total_attempted(&self) -> usize {
        self.deleted.len() + self.failures.len()
    }
}

/// Delete every id, independently and concurrently.
///
/// Failure text prefers what the server said; when the failure never
/// produced server text (network, decode) a generic per-record message
/// stands in.
pub async fn delete_businesses(api: &dyn CrmApi, ids: &[BusinessId]) -> BulkDeleteReport {
    let attempts = ids.iter().map(|id| async move {
        let result = api.delete_business(id).await;
        (id.clone(), result)
    });
    let outcomes = futures_util::future::join_all(attempts).await;

    let mut report = BulkDeleteReport::default();
    for (id, result) in outcomes {
        match result {
            Ok(()) => report.deleted.push(id),
            Err(err) => {
                tracing::warn!(business_id = %id, error = %err, "bulk delete: record failed");
                let message = failure_message(&id, &err);
                report.failures.push(BulkFailure { id, message });
            }
        }
    }
    tracing::debug!(
        deleted = report.deleted.len(),
        failed = report.failures.len(),
        "bulk delete complete"
    );
    report
}

fn failure_message(id: &BusinessId, err: &RemoteError) -> String {
    match err.server_message() {
        Some(text) => text.to_string(),
        None => format!("Failed to delete business {}", id),
    }
}

// =============================================================================
// TESTS
// =============================================================================
