//! Submission seam for captured leads.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use bosques_core::config::LeadsConfig;
use serde::Serialize;

use crate::error::LeadError;
use crate::prequalifier::PrequalifierData;

/// A completed lead, ready to hand to a form endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LeadRecord {
    Prequalification(PrequalifierData),
    Contact {
        form_id: String,
        fields: BTreeMap<String, String>,
    },
}

impl LeadRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            LeadRecord::Prequalification(_) => "prequalification",
            LeadRecord::Contact { .. } => "contact",
        }
    }
}

/// Delivers lead records to wherever leads are collected.
#[async_trait]
pub trait LeadSubmitter: Send + Sync {
    async fn submit(&self, record: &LeadRecord) -> Result<(), LeadError>;
}

/// Stand-in for the external form endpoint: waits, then reports success.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_config(config: &LeadsConfig) -> Self {
        Self::new(Duration::from_millis(config.submit_delay_ms))
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::from_config(&LeadsConfig::default())
    }
}

#[async_trait]
impl LeadSubmitter for SimulatedSubmitter {
    async fn submit(&self, record: &LeadRecord) -> Result<(), LeadError> {
        tracing::info!(kind = record.kind(), "Submitting lead");
        tokio::time::sleep(self.delay).await;
        tracing::debug!(kind = record.kind(), "Lead accepted by simulated endpoint");
        Ok(())
    }
}
