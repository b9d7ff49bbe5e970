//! Mock collaborators for the HTTP layer: a stand-in database and a
//! stand-in CDN uploader. The pipeline never depends on either.

use jiff::Zoned;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use docmill_render::models::{
    BillCustomer, BillData, BillItem, ReportCustomer, ReportData, ReportItem,
};

/// Supplies document records to route handlers. Stands in for the database
/// lookup a real deployment would do.
pub trait DataSource: Send + Sync {
    fn bill(&self, bill_id: &str) -> BillData;
    fn sample_report(&self) -> ReportData;
}

/// Receives persisted documents. Stands in for an S3/OSS upload.
pub trait StorageUploader: Send + Sync {
    fn upload(&self, file_name: &str, buffer: &[u8]) -> String;
}

pub struct SampleDataSource {
    seed: Option<u64>,
}

impl SampleDataSource {
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// A fixed seed makes `sample_report` reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl Default for SampleDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSource for SampleDataSource {
    fn bill(&self, bill_id: &str) -> BillData {
        BillData {
            order_id: bill_id.to_string(),
            customer: BillCustomer {
                name: "Futuretech Ltd.".to_string(),
            },
            issue_date: Zoned::now().strftime("%Y-%m-%d").to_string(),
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
                BillItem {
                    name: "Database Service Basic".to_string(),
                    quantity: 1,
                    price: "$120.00".to_string(),
                    total: "$120.00".to_string(),
                },
            ],
            total_amount: "$568.00".to_string(),
        }
    }

    /// An 80-line report with random quantities (1–5) and unit prices
    /// (10–110), totals and grand total rounded to 2 decimals.
    fn sample_report(&self) -> ReportData {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut items = Vec::with_capacity(80);
        let mut grand_total = 0.0;
        for id in 1..=80 {
            let quantity: u32 = rng.gen_range(1..=5);
            let price = round2(rng.gen_range(10.0..110.0));
            let total = round2(f64::from(quantity) * price);
            grand_total += total;
            items.push(ReportItem {
                id,
                description: format!("Service or Product #{id} - Lorem ipsum dolor sit amet"),
                quantity,
                price,
                total,
            });
        }

        ReportData {
            report_title: "Annual Activity Report".to_string(),
            order_id: "ORD-2023-12345".to_string(),
            company_name: "TechInnovate Inc.".to_string(),
            customer: ReportCustomer {
                name: "John Doe Corp.".to_string(),
                address: "123 Innovation Drive, Tech City, 12345".to_string(),
            },
            grand_total: round2(grand_total),
            items,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Logs the upload and hands back a CDN-shaped URL. No bytes leave the host.
pub struct MockCdnUploader;

impl StorageUploader for MockCdnUploader {
    fn upload(&self, file_name: &str, buffer: &[u8]) -> String {
        tracing::info!(file_name, bytes = buffer.len(), "mock CDN upload");
        format!("https://your-cdn.com/pdfs/{file_name}")
    }
}
