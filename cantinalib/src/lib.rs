//! cantinalib — счета школьной столовой: просрочка, пеня и проценты,
//! чтение/запись счетов (CSV, JSON, XML) и отчёт.

pub mod calc;
pub mod display;
pub mod error;
pub mod model;
pub mod traits;

pub mod formats {
    pub mod csv;
    pub mod json;
    pub mod table;
    pub mod xml;
}

pub use calc::{BillingCalculator, BillingSummary, PenaltyPolicy, Totals};
pub use model::{BillingItem, BillingRecord, BillingStatus};
