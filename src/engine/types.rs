//! Engine types
//!
//! Configuration and statistics for an inference run.

/// Configuration for an inference run
#[derive(Debug, Clone)]
pub struct InferConfig {
    /// Name the root struct is derived from
    pub base_name: String,
    /// Number of independent accumulators (1 = sequential)
    pub shards: usize,
}

impl Default for InferConfig {
    fn default() -> Self {
        Self {
            base_name: "AutoGenerated".to_string(),
            shards: 1,
        }
    }
}

impl InferConfig {
    /// Create a new inference config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root struct base name
    #[must_use]
    pub fn with_base_name(mut self, name: impl Into<String>) -> Self {
        self.base_name = name.into();
        self
    }

    /// Set the shard count (values below 1 mean sequential)
    #[must_use]
    pub fn with_shards(mut self, shards: usize) -> Self {
        self.shards = shards.max(1);
        self
    }
}

/// Statistics from an inference run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferStats {
    /// Documents read from the source
    pub documents_read: usize,
    /// Distinct structural positions in the accumulator
    pub distinct_paths: usize,
    /// Structs in the built schema
    pub structs_produced: usize,
    /// Positions resolved to the opaque type
    pub fallbacks: usize,
    /// Shards used for accumulation
    pub shards: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl InferStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add documents
    pub fn add_documents(&mut self, count: usize) {
        self.documents_read += count;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
