use cantinalib::{
    formats::csv::Csv,
    traits::{ReadRecords, WriteRecords, WriteReport},
    BillingCalculator, BillingStatus,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::Cursor;

const INPUT: &str = r#"id,school_id,school_name,amount,issued_date,due_date,paid_date,status,item_description,item_amount
INV-001,SCH-01,Escola Aurora,1000.00,2024-12-01,2025-01-01,,pending,Mensalidade,800.00
INV-001,SCH-01,Escola Aurora,1000.00,2024-12-01,2025-01-01,,pending,Taxa de cartões NFC,200.00
INV-002,SCH-02,Colégio Sol,750.00,2024-12-01,2025-01-01,2025-01-05,paid,Mensalidade,750.00
INV-003,SCH-03,Escola Lua,500.00,2025-05-01,2025-06-01,,Pending,,
"#;

#[test]
fn csv_read_groups_items_by_id() {
    let records = Csv::read(Cursor::new(INPUT)).expect("read csv");
    assert_eq!(records.len(), 3);

    let first = &records[0];
    assert_eq!(first.id, "INV-001");
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.items[1].description, "Taxa de cartões NFC");
    assert_eq!(first.items_total(), first.amount);

    assert_eq!(records[1].status, BillingStatus::Paid);
    assert_eq!(records[1].paid_date, NaiveDate::from_ymd_opt(2025, 1, 5));

    assert_eq!(records[2].status, BillingStatus::Pending);
    assert!(records[2].items.is_empty());
    assert_eq!(records[2].paid_date, None);
}

#[test]
fn csv_write_then_read_back() {
    let records = Csv::read(Cursor::new(INPUT)).expect("read csv");
    let mut out = Vec::new();
    Csv::write(&mut out, &records).expect("write csv");
    let again = Csv::read(Cursor::new(out)).expect("read csv again");
    assert_eq!(again, records);
}

#[test]
fn csv_report_rounds_for_display() {
    let records = Csv::read(Cursor::new(INPUT)).expect("read csv");
    let today = NaiveDate::from_ymd_opt(2025, 1, 11).unwrap();
    let rows = BillingCalculator::default().summarize_all(&records, today);
    assert_eq!(rows[0].total, Decimal::new(1030, 0));

    let mut out = Vec::new();
    Csv::write_report(&mut out, &rows).expect("write report");
    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("id,school_name,status,due_date,is_overdue,days_overdue,amount,penalty,interest,total")
    );
    assert_eq!(
        lines.next(),
        Some("INV-001,Escola Aurora,overdue,2025-01-01,true,10,1000.00,20.00,10.00,1030.00")
    );
}

#[test]
fn csv_rejects_unknown_status() {
    let input = "id,school_id,school_name,amount,issued_date,due_date,paid_date,status,item_description,item_amount\n\
                 INV-9,SCH-9,X,10.00,2025-01-01,2025-02-01,,cancelled,,\n";
    assert!(Csv::read(Cursor::new(input)).is_err());
}

#[test]
fn csv_rejects_item_without_amount() {
    let input = "id,school_id,school_name,amount,issued_date,due_date,paid_date,status,item_description,item_amount\n\
                 INV-9,SCH-9,X,10.00,2025-01-01,2025-02-01,,pending,Lanche,\n";
    assert!(Csv::read(Cursor::new(input)).is_err());
}
