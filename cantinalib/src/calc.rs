//! Калькулятор просрочки: пеня 2% разово плюс 0.1% в день (простые проценты).
//!
//! Все функции чистые: «сегодня» передаётся явно, часы здесь не читаются.

use crate::{
    error::{CantinaError, Result},
    model::{BillingRecord, BillingStatus},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Ставки штрафа. По умолчанию 2% разовой пени и 0.1% в день.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyPolicy {
    penalty_rate: Decimal,
    daily_interest_rate: Decimal,
}

impl PenaltyPolicy {
    pub fn new(penalty_rate: Decimal, daily_interest_rate: Decimal) -> Result<Self> {
        if penalty_rate < Decimal::ZERO {
            return Err(CantinaError::invalid("policy", format!("negative penalty rate {penalty_rate}")));
        }
        if daily_interest_rate < Decimal::ZERO {
            return Err(CantinaError::invalid(
                "policy",
                format!("negative daily interest rate {daily_interest_rate}"),
            ));
        }
        // вместе с MAX_AMOUNT держит итог в пределах Decimal
        if penalty_rate > Decimal::ONE || daily_interest_rate > Decimal::ONE {
            return Err(CantinaError::invalid(
                "policy",
                format!("rates above 1 ({penalty_rate}, {daily_interest_rate})"),
            ));
        }
        Ok(Self { penalty_rate, daily_interest_rate })
    }

    pub fn penalty_rate(&self) -> Decimal {
        self.penalty_rate
    }

    pub fn daily_interest_rate(&self) -> Decimal {
        self.daily_interest_rate
    }
}

impl Default for PenaltyPolicy {
    fn default() -> Self {
        Self {
            penalty_rate: Decimal::new(2, 2),
            daily_interest_rate: Decimal::new(1, 3),
        }
    }
}

/// Производные значения счёта для отображения. Ничего не сохраняется.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingSummary {
    pub id: String,
    pub school_name: String,
    pub status: BillingStatus,
    pub due_date: NaiveDate,
    pub is_overdue: bool,
    pub days_overdue: i64,
    pub amount: Decimal,
    pub penalty: Decimal,
    pub interest: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BillingCalculator {
    policy: PenaltyPolicy,
}

impl BillingCalculator {
    pub fn new(policy: PenaltyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PenaltyPolicy {
        &self.policy
    }

    /// Сохранённый `overdue` доверяем; `pending` с прошедшим сроком тоже просрочен.
    pub fn is_overdue(&self, record: &BillingRecord, today: NaiveDate) -> bool {
        match record.status {
            BillingStatus::Paid => false,
            BillingStatus::Overdue => true,
            BillingStatus::Pending => record.due_date < today,
        }
    }

    /// Целые дни от срока оплаты до `today`; 0, если счёт не просрочен
    /// или срок ещё не наступил.
    pub fn days_overdue(&self, record: &BillingRecord, today: NaiveDate) -> i64 {
        if !self.is_overdue(record, today) {
            return 0;
        }
        (today - record.due_date).num_days().max(0)
    }

    pub fn penalty(&self, record: &BillingRecord, today: NaiveDate) -> Decimal {
        if !self.is_overdue(record, today) {
            return Decimal::ZERO;
        }
        record.amount * self.policy.penalty_rate
    }

    pub fn interest(&self, record: &BillingRecord, today: NaiveDate) -> Decimal {
        let days = self.days_overdue(record, today);
        if days == 0 {
            return Decimal::ZERO;
        }
        record.amount * self.policy.daily_interest_rate * Decimal::from(days)
    }

    /// Итог к оплате без округления; округление только при выводе.
    pub fn total_with_penalty(&self, record: &BillingRecord, today: NaiveDate) -> Decimal {
        record.amount + self.penalty(record, today) + self.interest(record, today)
    }

    /// Статус по дате: просроченный `pending` показывается как `overdue`.
    pub fn effective_status(&self, record: &BillingRecord, today: NaiveDate) -> BillingStatus {
        if self.is_overdue(record, today) {
            BillingStatus::Overdue
        } else {
            record.status
        }
    }

    pub fn summarize(&self, record: &BillingRecord, today: NaiveDate) -> BillingSummary {
        let penalty = self.penalty(record, today);
        let interest = self.interest(record, today);
        BillingSummary {
            id: record.id.clone(),
            school_name: record.school_name.clone(),
            status: self.effective_status(record, today),
            due_date: record.due_date,
            is_overdue: self.is_overdue(record, today),
            days_overdue: self.days_overdue(record, today),
            amount: record.amount,
            penalty,
            interest,
            total: record.amount + penalty + interest,
        }
    }

    /// Оставляет только просроченные на `today` счета, порядок сохраняется.
    pub fn retain_overdue(&self, records: &mut Vec<BillingRecord>, today: NaiveDate) {
        records.retain(|r| self.is_overdue(r, today));
    }

    pub fn summarize_all(&self, records: &[BillingRecord], today: NaiveDate) -> Vec<BillingSummary> {
        records.iter().map(|r| self.summarize(r, today)).collect()
    }
}

/// Итоговая строка отчёта.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub count: usize,
    pub overdue_count: usize,
    pub amount: Decimal,
    pub total: Decimal,
}

impl Totals {
    pub fn from_summaries(rows: &[BillingSummary]) -> Self {
        rows.iter().fold(Totals::default(), |mut acc, s| {
            acc.count += 1;
            if s.is_overdue {
                acc.overdue_count += 1;
            }
            acc.amount += s.amount;
            acc.total += s.total;
            acc
        })
    }
}
