//! Async API for non-blocking filtering.
//!
//! Enable the `async` feature to use these APIs:
//!
//! ```toml
//! [dependencies]
//! deckclean = { version = "0.1", features = ["async"] }
//! ```
//!
//! The work itself is synchronous and runs on Tokio's blocking pool.
//! Dropping a returned future abandons the result, not the work.

use crate::error::{Error, Result};
use crate::model::FilterStats;
use crate::pipeline::{FilterOutcome, Pipeline};
use crate::Cleaned;
use std::path::{Path, PathBuf};
use std::sync::Arc;

async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?
}

/// Asynchronously filters a file with the bundled word lists.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> deckclean::Result<()> {
/// let stats = deckclean::async_api::filter_file("export.csv", "out.csv").await?;
/// println!("removed {}", stats.removed);
/// # Ok(())
/// # }
/// ```
pub async fn filter_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<FilterStats> {
    let input = input.as_ref().to_path_buf();
    let output = output.as_ref().to_path_buf();
    blocking(move || crate::filter_file(&input, &output)).await
}

/// Asynchronously runs the cleaning stage on a file.
pub async fn clean_file(input: impl AsRef<Path>) -> Result<Cleaned> {
    let input = input.as_ref().to_path_buf();
    blocking(move || crate::clean_file(&input)).await
}

/// A [`Pipeline`] usable from async code.
///
/// Cloning is cheap; clones share the loaded word lists.
#[derive(Debug, Clone)]
pub struct AsyncPipeline {
    inner: Arc<Pipeline>,
}

impl AsyncPipeline {
    /// Wraps a pipeline.
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            inner: Arc::new(pipeline),
        }
    }

    /// Returns the wrapped pipeline.
    pub fn pipeline(&self) -> &Pipeline {
        &self.inner
    }

    /// Filters `input` into `filtered_<name>` next to it.
    pub async fn run(&self, input: impl AsRef<Path>) -> Result<FilterOutcome> {
        let pipeline = Arc::clone(&self.inner);
        let input = input.as_ref().to_path_buf();
        blocking(move || pipeline.run(input)).await
    }

    /// Filters `input` into `output`.
    pub async fn run_to(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<FilterOutcome> {
        let pipeline = Arc::clone(&self.inner);
        let input = input.as_ref().to_path_buf();
        let output = output.as_ref().to_path_buf();
        blocking(move || pipeline.run_to(input, output)).await
    }

    /// Filters several files; one result per input, in input order.
    pub async fn run_batch(&self, inputs: Vec<PathBuf>) -> Vec<Result<FilterOutcome>> {
        let pipeline = Arc::clone(&self.inner);
        match tokio::task::spawn_blocking(move || pipeline.run_batch(&inputs)).await {
            Ok(results) => results,
            Err(e) => vec![Err(Error::Io(std::io::Error::other(e.to_string())))],
        }
    }
}

impl From<Pipeline> for AsyncPipeline {
    fn from(pipeline: Pipeline) -> Self {
        Self::new(pipeline)
    }
}
