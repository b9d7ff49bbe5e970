use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateRequest {
    #[serde(rename = "billId")]
    pub bill_id: Option<String>,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub url: String,
    pub path: String,
}

/// Generate an invoice PDF for a bill, push it to the (mock) CDN, and reply
/// with the URL plus the scratch path.
pub async fn generate_invoice(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let bill_id = match req.bill_id {
        Some(id) if !id.is_empty() => id,
        _ => return Err(ApiError::BadRequest("Missing billId".to_string())),
    };

    let bill = state.data.bill(&bill_id);
    let doc = state.pipeline.invoice_pdf(&bill).await.map_err(|e| {
        tracing::error!(bill_id, error = %e, "invoice generation failed");
        ApiError::from(e)
    })?;

    let file_name = doc
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("invoice.pdf");
    let url = state.uploader.upload(file_name, &doc.buffer);

    Ok(Json(GenerateResponse {
        success: true,
        url,
        path: doc.path.display().to_string(),
    }))
}

/// Render the sample report to HTML for in-browser preview. No engine step.
pub async fn preview_table(State(state): State<AppState>) -> Response {
    let report = state.data.sample_report();
    match state.pipeline.report_html(&report).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "HTML preview generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while generating the HTML preview.",
            )
                .into_response()
        }
    }
}

/// Render the sample report to a PDF and stream it back as a download.
pub async fn generate_table(State(state): State<AppState>) -> Response {
    let report = state.data.sample_report();
    match state.pipeline.report_pdf(&report).await {
        Ok(doc) => {
            let file_name = doc
                .path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("report.pdf");
            let headers = [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={file_name}"),
                ),
                (header::CONTENT_LENGTH, doc.buffer.len().to_string()),
            ];
            (headers, doc.buffer).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "PDF generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while generating the PDF.",
            )
                .into_response()
        }
    }
}
