//! Простой CSV, одна строка на позицию счёта:
//! id,school_id,school_name,amount,issued_date,due_date,paid_date,status,item_description,item_amount
//!
//! Строки с одинаковым id склеиваются в один счёт, поля счёта берутся из первой.

use crate::{
    calc::BillingSummary,
    display::round_currency,
    error::{CantinaError, Result},
    model::{BillingItem, BillingRecord, BillingStatus},
    traits::checked,
};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io::{BufRead, Write};

const DATE_FMT: &str = "%Y-%m-%d";

#[derive(serde::Deserialize)]
struct CsvRow {
    id: String,
    school_id: String,
    school_name: String,
    amount: String,
    issued_date: String,
    due_date: String,
    paid_date: Option<String>,
    status: String,
    item_description: Option<String>,
    item_amount: Option<String>,
}

#[derive(serde::Serialize)]
struct CsvOutRow<'a> {
    id: &'a str,
    school_id: &'a str,
    school_name: &'a str,
    amount: String,
    issued_date: String,
    due_date: String,
    paid_date: Option<String>,
    status: &'a str,
    item_description: Option<&'a str>,
    item_amount: Option<String>,
}

#[derive(serde::Serialize)]
struct CsvReportRow<'a> {
    id: &'a str,
    school_name: &'a str,
    status: &'a str,
    due_date: String,
    is_overdue: bool,
    days_overdue: i64,
    amount: String,
    penalty: String,
    interest: String,
    total: String,
}

fn parse_date(field: &str, s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FMT).map_err(|e| CantinaError::Parse(format!("{field}: {e}")))
}

fn parse_amount(field: &str, s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|e| CantinaError::Parse(format!("{field}: {e}")))
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

fn out_row<'a>(r: &'a BillingRecord, item: Option<&'a BillingItem>) -> CsvOutRow<'a> {
    CsvOutRow {
        id: &r.id,
        school_id: &r.school_id,
        school_name: &r.school_name,
        amount: r.amount.to_string(),
        issued_date: r.issued_date.format(DATE_FMT).to_string(),
        due_date: r.due_date.format(DATE_FMT).to_string(),
        paid_date: r.paid_date.map(|d| d.format(DATE_FMT).to_string()),
        status: r.status.as_str(),
        item_description: item.map(|i| i.description.as_str()),
        item_amount: item.map(|i| i.amount.to_string()),
    }
}

pub struct Csv;

impl crate::traits::ReadRecords for Csv {
    fn read<R: BufRead>(r: R) -> Result<Vec<BillingRecord>> {
        let mut rdr = ReaderBuilder::new().flexible(true).trim(csv::Trim::All).from_reader(r);
        let mut records: Vec<BillingRecord> = Vec::new();
        let mut by_id: HashMap<String, usize> = HashMap::new();

        for rec in rdr.deserialize::<CsvRow>() {
            let row = rec?;

            let item = match (non_empty(row.item_description), non_empty(row.item_amount)) {
                (Some(description), Some(a)) => Some(BillingItem {
                    description,
                    amount: parse_amount("item_amount", &a)?,
                }),
                (None, None) => None,
                (Some(d), None) => {
                    return Err(CantinaError::Parse(format!("{}: item '{d}' without amount", row.id)))
                }
                (None, Some(_)) => {
                    return Err(CantinaError::Parse(format!("{}: item amount without description", row.id)))
                }
            };

            if let Some(&idx) = by_id.get(&row.id) {
                records[idx].items.extend(item);
                continue;
            }

            let record = BillingRecord {
                id: row.id.clone(),
                school_id: row.school_id,
                school_name: row.school_name,
                amount: parse_amount("amount", &row.amount)?,
                issued_date: parse_date("issued_date", &row.issued_date)?,
                due_date: parse_date("due_date", &row.due_date)?,
                paid_date: match non_empty(row.paid_date) {
                    Some(v) => Some(parse_date("paid_date", &v)?),
                    None => None,
                },
                status: row.status.parse::<BillingStatus>()?,
                items: item.into_iter().collect(),
            };
            by_id.insert(row.id, records.len());
            records.push(record);
        }

        checked(records)
    }
}

impl crate::traits::WriteRecords for Csv {
    fn write<W: Write>(mut w: W, records: &[BillingRecord]) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);

        for r in records {
            if r.items.is_empty() {
                wrt.serialize(out_row(r, None))?;
            } else {
                for item in &r.items {
                    wrt.serialize(out_row(r, Some(item)))?;
                }
            }
        }
        wrt.flush()?;
        Ok(())
    }
}

impl crate::traits::WriteReport for Csv {
    fn write_report<W: Write>(mut w: W, rows: &[BillingSummary]) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);

        for s in rows {
            wrt.serialize(CsvReportRow {
                id: &s.id,
                school_name: &s.school_name,
                status: s.status.as_str(),
                due_date: s.due_date.format(DATE_FMT).to_string(),
                is_overdue: s.is_overdue,
                days_overdue: s.days_overdue,
                amount: format!("{:.2}", round_currency(s.amount)),
                penalty: format!("{:.2}", round_currency(s.penalty)),
                interest: format!("{:.2}", round_currency(s.interest)),
                total: format!("{:.2}", round_currency(s.total)),
            })?;
        }
        wrt.flush()?;
        Ok(())
    }
}
