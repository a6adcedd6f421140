//! JSON: массив счетов в camelCase (`schoolId`, `dueDate`, ...), как их отдаёт бэкенд.
//! Суммы принимаются и строкой, и числом; пишутся строкой.

use crate::{
    calc::BillingSummary,
    error::Result,
    model::BillingRecord,
    traits::checked,
};
use std::io::{BufRead, Write};

pub struct Json;

impl crate::traits::ReadRecords for Json {
    fn read<R: BufRead>(r: R) -> Result<Vec<BillingRecord>> {
        let records: Vec<BillingRecord> = serde_json::from_reader(r)?;
        checked(records)
    }
}

impl crate::traits::WriteRecords for Json {
    fn write<W: Write>(mut w: W, records: &[BillingRecord]) -> Result<()> {
        serde_json::to_writer_pretty(&mut w, records)?;
        w.write_all(b"\n")?;
        Ok(())
    }
}

impl crate::traits::WriteReport for Json {
    fn write_report<W: Write>(mut w: W, rows: &[BillingSummary]) -> Result<()> {
        serde_json::to_writer_pretty(&mut w, rows)?;
        w.write_all(b"\n")?;
        Ok(())
    }
}
