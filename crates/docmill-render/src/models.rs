use serde::{Deserialize, Serialize};

/// An invoice record. Fully resolved by the caller before entering the
/// pipeline; currency values arrive pre-formatted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillData {
    pub order_id: String,
    pub customer: BillCustomer,
    pub issue_date: String,
    pub items: Vec<BillItem>,
    pub total_amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillCustomer {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillItem {
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub total: String,
}

/// A tabular report record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub report_title: String,
    pub order_id: String,
    pub company_name: String,
    pub customer: ReportCustomer,
    pub items: Vec<ReportItem>,
    pub grand_total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCustomer {
    pub name: String,
    pub address: String,
}

/// One report line. `total` is `quantity * price` rounded to 2 decimals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportItem {
    pub id: u32,
    pub description: String,
    pub quantity: u32,
    pub price: f64,
    pub total: f64,
}
