use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/* ----- METRIC SERIES (shared by every list-shaped widget resource) ----- */

/// A list of rows for one metric plus the moment the service computed it.
///
/// Ranking, SLA compliance, MTTR and type distribution all share this shape and
/// differ only in the row type `P`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSeries<P> {
    pub data: Vec<P>,
    pub updated_at: DateTime<Utc>,
}

impl<P> MetricSeries<P> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// The first `n` rows, in service order.
    pub fn top(&self, n: usize) -> &[P] {
        &self.data[..n.min(self.data.len())]
    }
}
