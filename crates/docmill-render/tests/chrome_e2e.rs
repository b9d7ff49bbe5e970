//! End-to-end captures through a real Chromium install. Run with
//! `cargo test -- --ignored` on a host with a browser available.

use std::time::Duration;

use docmill_render::engine::{
    HeaderFooterSpec, MIN_PDF_BYTES, PageGeometry, render_to_pdf,
};
use docmill_render::models::{BillCustomer, BillData, BillItem};
use docmill_render::pipeline::{Pipeline, PipelineConfig};

fn sample_bill() -> BillData {
    BillData {
        order_id: "E2E-1".to_string(),
        customer: BillCustomer {
            name: "Probe Corp.".to_string(),
        },
        issue_date: "2024-06-01".to_string(),
        items: vec![BillItem {
            name: "Probe item".to_string(),
            quantity: 1,
            price: "$1.00".to_string(),
            total: "$1.00".to_string(),
        }],
        total_amount: "$1.00".to_string(),
    }
}

#[test]
#[ignore = "requires a Chromium install"]
fn captured_buffer_has_pdf_signature() {
    let buffer = render_to_pdf(
        "<html><body><h1>Probe</h1></body></html>",
        &PageGeometry::a4_margin_mm(20.0),
        &HeaderFooterSpec::default(),
        "probe",
        Duration::from_secs(30),
    )
    .unwrap();

    assert!(buffer.len() >= MIN_PDF_BYTES);
    assert!(buffer.starts_with(b"%PDF-"));
}

#[tokio::test]
#[ignore = "requires a Chromium install"]
async fn invoice_pipeline_persists_a_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(PipelineConfig {
        scratch_dir: dir.path().to_path_buf(),
        ..PipelineConfig::default()
    });

    let doc = pipeline.invoice_pdf(&sample_bill()).await.unwrap();
    assert!(doc.buffer.starts_with(b"%PDF-"));
    assert!(doc.path.exists());
    let name = doc.path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("invoice-E2E-1-"));
}
