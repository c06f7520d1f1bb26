//! Shared types for the API layer.

use std::sync::Arc;

use crate::pipeline::processor::AnalysisPipeline;

/// Multipart framing allowance on top of the upload ceiling.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub pipeline: Arc<AnalysisPipeline>,
}

impl ApiContext {
    pub fn new(pipeline: Arc<AnalysisPipeline>) -> Self {
        Self { pipeline }
    }

    /// Request body limit: the upload ceiling plus multipart overhead.
    pub fn body_limit(&self) -> usize {
        let max_upload = usize::try_from(self.pipeline.gate().max_upload_bytes()).unwrap_or(usize::MAX);
        max_upload.saturating_add(MULTIPART_OVERHEAD_BYTES)
    }
}
