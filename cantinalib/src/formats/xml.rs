//! Простой XML: <billing><record>...<item/>...</record></billing>

use crate::{
    calc::BillingSummary,
    display::round_currency,
    error::{CantinaError, Result},
    model::{BillingItem, BillingRecord, BillingStatus},
    traits::checked,
};
use chrono::NaiveDate;
use quick_xml::{de::from_reader, se::to_string};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

const DATE_FMT: &str = "%Y-%m-%d";

#[derive(Serialize, Deserialize, Debug)]
struct XmlItem {
    description: String,
    #[serde(with = "rust_decimal::serde::str")]
    amount: Decimal,
}

#[derive(Serialize, Deserialize, Debug)]
struct XmlRecord {
    id: String,
    school_id: String,
    school_name: String,
    #[serde(with = "rust_decimal::serde::str")]
    amount: Decimal,
    issued_date: String,
    due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    paid_date: Option<String>,
    status: String,
    #[serde(default)]
    item: Vec<XmlItem>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename = "billing")]
struct XmlBilling {
    #[serde(default)]
    record: Vec<XmlRecord>,
}

#[derive(Serialize, Debug)]
struct XmlReportRow {
    id: String,
    school_name: String,
    status: String,
    due_date: String,
    is_overdue: bool,
    days_overdue: i64,
    amount: String,
    penalty: String,
    interest: String,
    total: String,
}

#[derive(Serialize, Debug)]
#[serde(rename = "report")]
struct XmlReport {
    row: Vec<XmlReportRow>,
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FMT).map_err(|e| CantinaError::Parse(format!("{e}")))
}

pub struct SimpleXml;

impl crate::traits::ReadRecords for SimpleXml {
    fn read<R: BufRead>(r: R) -> Result<Vec<BillingRecord>> {
        let x: XmlBilling = from_reader(r).map_err(|e| CantinaError::Xml(format!("{e}")))?;

        let mut records = Vec::with_capacity(x.record.len());
        for rec in x.record {
            records.push(BillingRecord {
                id: rec.id,
                school_id: rec.school_id,
                school_name: rec.school_name,
                amount: rec.amount,
                issued_date: parse_date(&rec.issued_date)?,
                due_date: parse_date(&rec.due_date)?,
                // Option<Result<_>> -> Result<Option<_>>
                paid_date: rec
                    .paid_date
                    .as_deref()
                    .filter(|s| !s.trim().is_empty())
                    .map(parse_date)
                    .transpose()?,
                status: rec.status.parse::<BillingStatus>()?,
                items: rec
                    .item
                    .into_iter()
                    .map(|i| BillingItem { description: i.description, amount: i.amount })
                    .collect(),
            });
        }

        checked(records)
    }
}

impl crate::traits::WriteRecords for SimpleXml {
    fn write<W: Write>(mut w: W, records: &[BillingRecord]) -> Result<()> {
        let record = records
            .iter()
            .map(|r| XmlRecord {
                id: r.id.clone(),
                school_id: r.school_id.clone(),
                school_name: r.school_name.clone(),
                amount: r.amount,
                issued_date: r.issued_date.format(DATE_FMT).to_string(),
                due_date: r.due_date.format(DATE_FMT).to_string(),
                paid_date: r.paid_date.map(|d| d.format(DATE_FMT).to_string()),
                status: r.status.as_str().to_string(),
                item: r
                    .items
                    .iter()
                    .map(|i| XmlItem { description: i.description.clone(), amount: i.amount })
                    .collect(),
            })
            .collect();

        let s = to_string(&XmlBilling { record }).map_err(|e| CantinaError::Xml(format!("{e}")))?;
        w.write_all(s.as_bytes())?;
        Ok(())
    }
}

impl crate::traits::WriteReport for SimpleXml {
    fn write_report<W: Write>(mut w: W, rows: &[BillingSummary]) -> Result<()> {
        let row = rows
            .iter()
            .map(|s| XmlReportRow {
                id: s.id.clone(),
                school_name: s.school_name.clone(),
                status: s.status.as_str().to_string(),
                due_date: s.due_date.format(DATE_FMT).to_string(),
                is_overdue: s.is_overdue,
                days_overdue: s.days_overdue,
                amount: format!("{:.2}", round_currency(s.amount)),
                penalty: format!("{:.2}", round_currency(s.penalty)),
                interest: format!("{:.2}", round_currency(s.interest)),
                total: format!("{:.2}", round_currency(s.total)),
            })
            .collect();

        let s = to_string(&XmlReport { row }).map_err(|e| CantinaError::Xml(format!("{e}")))?;
        w.write_all(s.as_bytes())?;
        Ok(())
    }
}
