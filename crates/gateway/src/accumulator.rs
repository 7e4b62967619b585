//! Query accumulators
//!
//! Buffer the pages of a streamed query until the closing page arrives, then
//! hand the whole round over at once. Records are only ever visible as a
//! completed round; the accumulator is empty again afterwards.

use hermes_core::{QueryKind, RspInfo};
use hermes_ports::Paged;
use log::{debug, warn};

/// A completed query round: every record, or the error that closed it
pub type Round<T> = Result<Vec<T>, RspInfo>;

pub struct Accumulator<T> {
    kind: QueryKind,
    records: Vec<T>,
    error: Option<RspInfo>,
}

impl<T> Accumulator<T> {
    pub fn new(kind: QueryKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
            error: None,
        }
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    /// Records buffered for the round in flight
    pub fn pending(&self) -> usize {
        self.records.len()
    }

    /// Start a fresh round, discarding leftovers of an abandoned one
    pub fn begin(&mut self) {
        if !self.records.is_empty() {
            debug!(
                "Discarding {} stale {} records",
                self.records.len(),
                self.kind.as_str()
            );
        }
        self.records.clear();
        self.error = None;
    }

    /// Absorb one page; returns the completed round on the closing page
    pub fn push(&mut self, page: Paged<T>) -> Option<Round<T>> {
        if let Some(rsp) = page.error() {
            if !page.is_last {
                warn!("{} query page carried error {}", self.kind.as_str(), rsp);
            }
            self.error = Some(rsp.clone());
        } else if let Some(record) = page.record {
            self.records.push(record);
        }

        if !page.is_last {
            return None;
        }

        let records = std::mem::take(&mut self.records);
        match self.error.take() {
            Some(rsp) => Some(Err(rsp)),
            None => Some(Ok(records)),
        }
    }
}
