//! Текстовая таблица для терминала, суммы в BRL. Только вывод отчёта.

use crate::{
    calc::{BillingSummary, Totals},
    display::format_brl,
    error::Result,
};
use std::io::Write;

pub struct Table;

impl crate::traits::WriteReport for Table {
    fn write_report<W: Write>(mut w: W, rows: &[BillingSummary]) -> Result<()> {
        let school_w = rows
            .iter()
            .map(|s| s.school_name.chars().count())
            .max()
            .unwrap_or(0)
            .max("SCHOOL".len());
        let id_w = rows.iter().map(|s| s.id.chars().count()).max().unwrap_or(0).max("ID".len());

        writeln!(
            w,
            "{:<id_w$}  {:<school_w$}  {:<8}  {:<10}  {:>4}  {:>16}  {:>14}  {:>14}  {:>16}",
            "ID", "SCHOOL", "STATUS", "DUE", "DAYS", "AMOUNT", "PENALTY", "INTEREST", "TOTAL",
        )?;
        for s in rows {
            writeln!(
                w,
                "{:<id_w$}  {:<school_w$}  {:<8}  {:<10}  {:>4}  {:>16}  {:>14}  {:>14}  {:>16}",
                s.id,
                s.school_name,
                s.status.as_str(),
                s.due_date.format("%Y-%m-%d").to_string(),
                s.days_overdue,
                format_brl(s.amount),
                format_brl(s.penalty),
                format_brl(s.interest),
                format_brl(s.total),
            )?;
        }

        let totals = Totals::from_summaries(rows);
        writeln!(
            w,
            "{} records, {} overdue; billed {}, owed {}",
            totals.count,
            totals.overdue_count,
            format_brl(totals.amount),
            format_brl(totals.total),
        )?;
        Ok(())
    }
}
