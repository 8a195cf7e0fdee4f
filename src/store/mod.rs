//! Latest indicator values per (metric kind, branch).
//!
//! The store owns its own prometheus [`Registry`] rather than a process
//! global; one instance is built at startup and shared by handle with the
//! engine and the export endpoint.

mod metric_kind;

pub use metric_kind::MetricKind;

use crate::error::Result;
use crate::models::MetricSnapshot;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::collections::{BTreeMap, BTreeSet};
use strum::IntoEnumIterator;

const BRANCH_LABEL: &str = "branch";

/// Registry of six branch-labelled gauges
pub struct MetricsStore {
    registry: Registry,
    gauges: BTreeMap<MetricKind, GaugeVec>,
}

impl MetricsStore {
    /// Create the store and register all six gauges
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let mut gauges = BTreeMap::new();

        for kind in MetricKind::iter() {
            let gauge = GaugeVec::new(Opts::new(kind.name(), kind.help()), &[BRANCH_LABEL])?;
            registry.register(Box::new(gauge.clone()))?;
            gauges.insert(kind, gauge);
        }

        Ok(Self { registry, gauges })
    }

    /// Overwrite the six values for `snapshot.branch`.
    ///
    /// Each gauge write is atomic; the six writes together are not, so a
    /// concurrent reader may see a mix of two snapshots for one branch.
    pub fn record(&self, snapshot: &MetricSnapshot) {
        for (kind, gauge) in &self.gauges {
            gauge
                .with_label_values(&[snapshot.branch.as_str()])
                .set(kind.reading(snapshot));
        }
        tracing::debug!(branch = %snapshot.branch, "Metrics snapshot recorded");
    }

    /// Current value of one gauge, if the branch has ever been recorded
    pub fn get(&self, kind: MetricKind, branch: &str) -> Option<f64> {
        self.export().get(&(kind, branch.to_string())).copied()
    }

    /// Every current reading keyed by (kind, branch)
    pub fn export(&self) -> BTreeMap<(MetricKind, String), f64> {
        let mut readings = BTreeMap::new();

        for family in self.registry.gather() {
            let Some(kind) = MetricKind::from_name(family.get_name()) else {
                continue;
            };
            for metric in family.get_metric() {
                let branch = metric
                    .get_label()
                    .iter()
                    .find(|pair| pair.get_name() == BRANCH_LABEL)
                    .map(|pair| pair.get_value().to_string());

                if let Some(branch) = branch {
                    readings.insert((kind, branch), metric.get_gauge().get_value());
                }
            }
        }

        readings
    }

    /// Branches that have at least one recorded snapshot
    pub fn branches(&self) -> Vec<String> {
        let branches: BTreeSet<String> = self
            .export()
            .into_keys()
            .map(|(_, branch)| branch)
            .collect();
        branches.into_iter().collect()
    }

    /// Prometheus text exposition of the current contents
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;

        String::from_utf8(buffer)
            .map_err(|e| crate::error::AppError::Serialization(e.to_string()))
    }

    /// Content type of [`render`](Self::render) output
    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }
}
