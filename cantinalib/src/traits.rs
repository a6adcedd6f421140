//! Унифицированные трэйты чтения/записи на основе std::io::{BufRead, Write}.

use crate::{
    calc::BillingSummary,
    error::Result,
    model::BillingRecord,
};
use std::io::{BufRead, Write};

pub trait ReadRecords {
    fn read<R: BufRead>(r: R) -> Result<Vec<BillingRecord>>;
}

pub trait WriteRecords {
    fn write<W: Write>(w: W, records: &[BillingRecord]) -> Result<()>;
}

pub trait WriteReport {
    fn write_report<W: Write>(w: W, rows: &[BillingSummary]) -> Result<()>;
}

pub trait Format: ReadRecords + WriteRecords + WriteReport {}
impl<T: ReadRecords + WriteRecords + WriteReport> Format for T {}

/// Общий хвост всех читателей: валидация и предупреждение о расхождении позиций.
pub(crate) fn checked(records: Vec<BillingRecord>) -> Result<Vec<BillingRecord>> {
    for r in &records {
        r.validate()?;
        if !r.items_match_amount() {
            tracing::warn!(
                id = %r.id,
                amount = %r.amount,
                items_total = %r.items_total(),
                "item amounts do not add up to invoice amount"
            );
        }
    }
    tracing::debug!(count = records.len(), "billing records read");
    Ok(records)
}
