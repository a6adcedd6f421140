//! Доменные модели — счёт школы и его позиции.

use crate::error::{CantinaError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BillingStatus {
    Paid,
    Pending,
    Overdue,
}

impl BillingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingStatus::Paid => "paid",
            BillingStatus::Pending => "pending",
            BillingStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for BillingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingStatus {
    type Err = CantinaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paid" => Ok(BillingStatus::Paid),
            "pending" => Ok(BillingStatus::Pending),
            "overdue" => Ok(BillingStatus::Overdue),
            other => Err(CantinaError::Parse(format!("unknown status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingItem {
    pub description: String,
    pub amount: Decimal,
}

/// Верхняя граница суммы счёта и позиции (10^12). С ней и ставками не выше 1
/// итог `amount * (1 + rate + daily_rate * days)` помещается в `Decimal`
/// на всём диапазоне `NaiveDate`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0); // 1_000_000_000_000

/// Счёт, выставленный школе. Только для чтения: калькулятор его не меняет.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecord {
    pub id: String,
    pub school_id: String,
    pub school_name: String,
    pub amount: Decimal,
    pub issued_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
    pub status: BillingStatus,
    #[serde(default)]
    pub items: Vec<BillingItem>,
}

impl BillingRecord {
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(|i| i.amount).sum()
    }

    /// Пустой список позиций не считается расхождением.
    pub fn items_match_amount(&self) -> bool {
        self.items.is_empty() || self.items_total() == self.amount
    }

    /// Проверка на границе: всё, что пришло из файла, проходит через неё.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CantinaError::invalid("<empty>", "id is empty"));
        }
        if self.amount < Decimal::ZERO {
            return Err(CantinaError::invalid(&self.id, format!("negative amount {}", self.amount)));
        }
        if self.amount > MAX_AMOUNT {
            return Err(CantinaError::invalid(&self.id, format!("amount {} exceeds {MAX_AMOUNT}", self.amount)));
        }
        if let Some(item) = self.items.iter().find(|i| i.amount < Decimal::ZERO) {
            return Err(CantinaError::invalid(
                &self.id,
                format!("negative item amount {} ({})", item.amount, item.description),
            ));
        }
        if let Some(item) = self.items.iter().find(|i| i.amount > MAX_AMOUNT) {
            return Err(CantinaError::invalid(
                &self.id,
                format!("item amount {} exceeds {MAX_AMOUNT} ({})", item.amount, item.description),
            ));
        }
        if self.due_date < self.issued_date {
            return Err(CantinaError::invalid(
                &self.id,
                format!("due date {} before issued date {}", self.due_date, self.issued_date),
            ));
        }
        if self.paid_date.is_some() && self.status != BillingStatus::Paid {
            return Err(CantinaError::invalid(
                &self.id,
                format!("paid date set on {} record", self.status),
            ));
        }
        Ok(())
    }
}
