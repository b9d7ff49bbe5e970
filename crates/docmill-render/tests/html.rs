use std::path::PathBuf;

use jiff::civil::date;
use jiff::tz::TimeZone;

use docmill_render::html::{AssetPaths, render_invoice_html, render_report_html};
use docmill_render::models::{
    BillCustomer, BillData, BillItem, ReportCustomer, ReportData, ReportItem,
};
use docmill_render::template::{EmbeddedTemplates, TemplateCache};

fn cache() -> TemplateCache {
    TemplateCache::new(Box::new(EmbeddedTemplates))
}

fn fixed_now() -> jiff::Zoned {
    date(2024, 6, 1).at(12, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap()
}

fn sample_bill() -> BillData {
    BillData {
        order_id: "B-1001".to_string(),
        customer: BillCustomer {
            name: "Futuretech Ltd.".to_string(),
        },
        issue_date: "2024-06-01".to_string(),
        items: vec![
            BillItem {
                name: "Cloud Server Pro".to_string(),
                quantity: 2,
                price: "$199.00".to_string(),
                total: "$398.00".to_string(),
            },
            BillItem {
                name: "Object Storage Plus".to_string(),
                quantity: 1,
                price: "$50.00".to_string(),
                total: "$50.00".to_string(),
            },
        ],
        total_amount: "$448.00".to_string(),
    }
}

fn sample_report() -> ReportData {
    ReportData {
        report_title: "Quarterly Report".to_string(),
        order_id: "ORD-77".to_string(),
        company_name: "TechInnovate Inc.".to_string(),
        customer: ReportCustomer {
            name: "John Doe Corp.".to_string(),
            address: "123 Innovation Drive".to_string(),
        },
        items: vec![ReportItem {
            id: 1,
            description: "Consulting".to_string(),
            quantity: 3,
            price: 40.5,
            total: 121.5,
        }],
        grand_total: 121.5,
    }
}

fn missing_assets() -> AssetPaths {
    AssetPaths {
        logo: PathBuf::from("no/such/logo.png"),
        content_image: PathBuf::from("no/such/content.png"),
    }
}

#[test]
fn invoice_binds_record_fields() {
    let html = render_invoice_html(&cache(), &sample_bill()).unwrap();
    assert!(html.contains("B-1001"));
    assert!(html.contains("Futuretech Ltd."));
    assert!(html.contains("Cloud Server Pro"));
    assert!(html.contains("$448.00"));
}

#[tokio::test]
async fn report_renders_without_assets() {
    let html = render_report_html(&cache(), &sample_report(), &missing_assets(), &fixed_now())
        .await
        .unwrap();
    assert!(html.contains("Quarterly Report"));
    assert!(html.contains("John Doe Corp."));
    // Absent assets leave no image tags behind.
    assert!(!html.contains("data:image"));
}

#[tokio::test]
async fn report_embeds_available_assets() {
    let dir = tempfile::tempdir().unwrap();
    let logo = dir.path().join("logo.png");
    tokio::fs::write(&logo, [0x89u8, b'P', b'N', b'G']).await.unwrap();

    let assets = AssetPaths {
        logo,
        content_image: PathBuf::from("no/such/content.png"),
    };
    let html = render_report_html(&cache(), &sample_report(), &assets, &fixed_now())
        .await
        .unwrap();
    assert!(html.contains("data:image/png;base64,"));
}

#[tokio::test]
async fn report_binds_derived_fields() {
    let html = render_report_html(&cache(), &sample_report(), &missing_assets(), &fixed_now())
        .await
        .unwrap();
    assert!(html.contains("2024"));
    assert!(html.contains("2024-06-01 12:00:00"));
}

#[tokio::test]
async fn report_is_deterministic_for_a_fixed_clock() {
    let report = sample_report();
    let assets = missing_assets();
    let now = fixed_now();
    let cache = cache();

    let a = render_report_html(&cache, &report, &assets, &now).await.unwrap();
    let b = render_report_html(&cache, &report, &assets, &now).await.unwrap();
    assert_eq!(a, b);
}
