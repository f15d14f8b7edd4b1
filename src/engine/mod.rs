//! Inference engine module
//!
//! Drives a run from document source to finished schema.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Inferrer` - Reads documents, accumulates (sequentially or sharded) and
//!   builds the schema
//! - `InferConfig` - Configuration for a run
//! - `InferStats` - Counters for the run summary

mod types;

pub use types::{InferConfig, InferStats};

use crate::accumulator::Accumulator;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::naming::{NamePolicy, RustNamePolicy};
use crate::schema::{Schema, SchemaBuilder};
use crate::source::DocumentSource;
use futures::future::try_join_all;
use std::time::Instant;
use tracing::{debug, info};

/// Inference engine for turning documents into a schema
pub struct Inferrer {
    /// Run configuration
    config: InferConfig,
    /// Naming conventions for structs and fields
    names: Box<dyn NamePolicy>,
    /// Statistics
    stats: InferStats,
}

impl Inferrer {
    /// Create a new inferrer with Rust naming
    pub fn new(config: InferConfig) -> Self {
        Self {
            config,
            names: Box::new(RustNamePolicy::new()),
            stats: InferStats::default(),
        }
    }

    /// Use a different name policy
    #[must_use]
    pub fn with_name_policy(mut self, names: Box<dyn NamePolicy>) -> Self {
        self.names = names;
        self
    }

    /// Get the run configuration
    pub fn config(&self) -> &InferConfig {
        &self.config
    }

    /// Get statistics
    pub fn stats(&self) -> &InferStats {
        &self.stats
    }

    /// Accumulate every document of `source` on the current thread
    pub fn accumulate(&mut self, source: &mut dyn DocumentSource) -> Result<Accumulator> {
        let mut acc = Accumulator::new();
        while let Some(doc) = source.next_document()? {
            acc.include_document(&doc);
            self.stats.add_documents(1);
        }
        self.stats.shards = 1;
        Ok(acc)
    }

    /// Accumulate `documents` in independent shards and merge the results
    ///
    /// Each shard runs on the blocking pool. The merged accumulator is the
    /// same as a sequential pass over the documents, except when a path is
    /// a pure document in one shard and a pure primitive in another: that
    /// merge fails with `Error::MergeConflict`, where a sequential pass
    /// would resolve the path to the opaque type.
    pub async fn accumulate_sharded(
        &mut self,
        documents: Vec<Document>,
        shards: usize,
    ) -> Result<Accumulator> {
        self.stats.add_documents(documents.len());
        let parts = split_into(documents, shards.max(1));
        self.stats.shards = parts.len();

        let tasks = parts.into_iter().enumerate().map(|(index, part)| {
            tokio::task::spawn_blocking(move || {
                let acc = Accumulator::from_documents(&part);
                debug!(shard = index, documents = part.len(), "Shard accumulated");
                acc
            })
        });
        let accumulators = try_join_all(tasks).await.map_err(|e| Error::Shard {
            message: e.to_string(),
        })?;

        Accumulator::merge_all(accumulators)
    }

    /// Build the schema from a finished accumulator
    pub fn build(&mut self, acc: &Accumulator) -> Schema {
        let schema = SchemaBuilder::new(self.names.as_ref(), self.config.base_name.clone()).build(acc);
        self.stats.distinct_paths = acc.node_count();
        self.stats.structs_produced = schema.structs.len();
        self.stats.fallbacks = schema.report.len();
        schema
    }

    /// Read, accumulate and build in one go
    ///
    /// With more than one configured shard the source is drained into
    /// memory first and accumulated in parallel.
    pub async fn infer(&mut self, source: &mut dyn DocumentSource) -> Result<Schema> {
        let start = Instant::now();

        let acc = if self.config.shards > 1 {
            let documents = source.read_all()?;
            self.accumulate_sharded(documents, self.config.shards).await?
        } else {
            self.accumulate(source)?
        };
        let schema = self.build(&acc);

        #[allow(clippy::cast_possible_truncation)]
        self.stats.set_duration(start.elapsed().as_millis() as u64);

        info!(
            documents = self.stats.documents_read,
            paths = self.stats.distinct_paths,
            structs = self.stats.structs_produced,
            fallbacks = self.stats.fallbacks,
            shards = self.stats.shards,
            duration_ms = self.stats.duration_ms,
            "Inference complete"
        );
        Ok(schema)
    }
}

/// Split into at most `parts` contiguous chunks of near-equal size
fn split_into(mut documents: Vec<Document>, parts: usize) -> Vec<Vec<Document>> {
    if documents.is_empty() {
        return vec![documents];
    }
    let chunk = documents.len().div_ceil(parts);
    let mut out = Vec::with_capacity(parts);
    while documents.len() > chunk {
        let rest = documents.split_off(chunk);
        out.push(documents);
        documents = rest;
    }
    out.push(documents);
    out
}
