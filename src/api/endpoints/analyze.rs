//! Document analysis endpoint.
//!
//! Multipart form fields:
//! - `file`: the PDF (required)
//! - `strategy`: `lines` or `ngram` (optional)
//! - `n`: group size (optional)
//! - `size`: client-declared byte size (optional; the gate checks the
//!   larger of this and the received length)

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::pipeline::cancel::CancelFlag;
use crate::pipeline::ingest::Upload;
use crate::pipeline::processor::AnalysisOutcome;
use crate::pipeline::segmentation::{SegmentationConfig, SegmentationStrategy};

#[derive(Debug, Default)]
struct AnalyzeForm {
    filename: Option<String>,
    bytes: Option<Vec<u8>>,
    strategy: Option<SegmentationStrategy>,
    group_size: Option<usize>,
    declared_size: Option<u64>,
}

/// `POST /api/analyze`
pub async fn analyze(
    State(ctx): State<ApiContext>,
    multipart: Multipart,
) -> Result<Json<AnalysisOutcome>, ApiError> {
    let form = read_form(multipart).await?;
    let segmentation = requested_segmentation(&form, ctx.pipeline.default_segmentation())?;

    let bytes = form
        .bytes
        .ok_or_else(|| ApiError::BadRequest("Missing 'file' field".into()))?;
    let mut upload = Upload::new(form.filename.unwrap_or_else(|| "document.pdf".into()), bytes);
    if let Some(declared) = form.declared_size {
        upload.declared_size = declared;
    }

    tracing::info!(
        filename = %upload.filename,
        bytes = upload.bytes.len(),
        "Analysis requested"
    );

    // A client disconnect drops this future, which stops the run between segments.
    let cancel = CancelFlag::new();
    let outcome = ctx.pipeline.analyze(upload, segmentation, &cancel).await?;

    tracing::info!(
        run_id = %outcome.run_id,
        segments = outcome.report.total_segments,
        "Analysis complete"
    );
    Ok(Json(outcome))
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, ApiError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                form.filename = Some(field.file_name().unwrap_or("document.pdf").to_string());
                form.bytes = Some(field.bytes().await.map_err(multipart_error)?.to_vec());
            }
            "strategy" => {
                let raw = field.text().await.map_err(multipart_error)?;
                let strategy = raw
                    .parse::<SegmentationStrategy>()
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                form.strategy = Some(strategy);
            }
            "n" => {
                let raw = field.text().await.map_err(multipart_error)?;
                let n = raw.trim().parse::<usize>().map_err(|_| {
                    ApiError::BadRequest(format!("'n' must be a positive integer, got '{}'", raw.trim()))
                })?;
                form.group_size = Some(n);
            }
            "size" => {
                let raw = field.text().await.map_err(multipart_error)?;
                let size = raw.trim().parse::<u64>().map_err(|_| {
                    ApiError::BadRequest(format!("'size' must be a byte count, got '{}'", raw.trim()))
                })?;
                form.declared_size = Some(size);
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(form)
}

/// Resolve the request's segmentation. A strategy without `n` uses that
/// strategy's default size; `n` without a strategy keeps the server default
/// strategy.
fn requested_segmentation(
    form: &AnalyzeForm,
    default: SegmentationConfig,
) -> Result<Option<SegmentationConfig>, ApiError> {
    let config = match (form.strategy, form.group_size) {
        (None, None) => return Ok(None),
        (Some(strategy), None) => SegmentationConfig::with_default_size(strategy),
        (strategy, Some(n)) => {
            SegmentationConfig::new(strategy.unwrap_or(default.strategy()), n)
                .map_err(|e| ApiError::BadRequest(e.to_string()))?
        }
    };
    Ok(Some(config))
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::Oversize(err.body_text())
    } else {
        ApiError::BadRequest(format!("Malformed multipart body: {}", err.body_text()))
    }
}
