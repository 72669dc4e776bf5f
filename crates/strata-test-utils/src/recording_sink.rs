// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory analytics sink for assertions.

use std::sync::Mutex;

use async_trait::async_trait;

use strata_core::{AnalyticsSink, OrchestrationResult, StrataError};

/// One captured analytics record.
#[derive(Debug, Clone)]
pub struct SinkRecord {
    pub request_id: String,
    pub result: OrchestrationResult,
    pub metadata: serde_json::Value,
}

/// An analytics sink that captures records in memory.
///
/// The failing variant rejects every record, for exercising the caller's
/// degradation path.
pub struct RecordingSink {
    records: Mutex<Vec<SinkRecord>>,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A sink that rejects every record with an internal error.
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// All captured records, in order.
    pub fn records(&self) -> Vec<SinkRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalyticsSink for RecordingSink {
    async fn record(
        &self,
        request_id: &str,
        result: &OrchestrationResult,
        metadata: &serde_json::Value,
    ) -> Result<(), StrataError> {
        if self.fail {
            return Err(StrataError::Internal("recording sink set to fail".into()));
        }
        self.records.lock().unwrap().push(SinkRecord {
            request_id: request_id.to_string(),
            result: result.clone(),
            metadata: metadata.clone(),
        });
        Ok(())
    }
}
