use cantinalib::{
    display::{format_brl, round_currency},
    error::CantinaError,
    model::MAX_AMOUNT,
    BillingItem, BillingRecord, BillingStatus,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn valid() -> BillingRecord {
    BillingRecord {
        id: "INV-7".into(),
        school_id: "SCH-7".into(),
        school_name: "Escola Jardim".into(),
        amount: dec("300.00"),
        issued_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        paid_date: None,
        status: BillingStatus::Pending,
        items: vec![BillingItem { description: "Mensalidade".into(), amount: dec("300.00") }],
    }
}

#[test]
fn valid_record_passes() {
    valid().validate().expect("valid record");
}

#[test]
fn negative_amount_fails() {
    let mut r = valid();
    r.amount = dec("-0.01");
    assert!(matches!(r.validate(), Err(CantinaError::Invalid { ref id, .. }) if id == "INV-7"));
}

#[test]
fn negative_item_fails() {
    let mut r = valid();
    r.items.push(BillingItem { description: "Estorno".into(), amount: dec("-10.00") });
    assert!(r.validate().is_err());
}

#[test]
fn paid_date_on_pending_fails() {
    let mut r = valid();
    r.paid_date = NaiveDate::from_ymd_opt(2025, 3, 10);
    assert!(r.validate().is_err());

    r.status = BillingStatus::Paid;
    r.validate().expect("paid record may carry paid date");
}

#[test]
fn due_before_issue_fails() {
    let mut r = valid();
    r.due_date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
    assert!(r.validate().is_err());
}

#[test]
fn empty_id_fails() {
    let mut r = valid();
    r.id = "  ".into();
    assert!(r.validate().is_err());
}

#[test]
fn item_mismatch_is_only_reported() {
    let mut r = valid();
    r.items[0].amount = dec("250.00");
    assert!(!r.items_match_amount());
    r.validate().expect("mismatch is not a validation error");
}

#[test]
fn status_parsing() {
    assert_eq!("Overdue".parse::<BillingStatus>().unwrap(), BillingStatus::Overdue);
    assert!("void".parse::<BillingStatus>().is_err());
}

#[test]
fn brl_formatting() {
    assert_eq!(format_brl(dec("1030")), "R$ 1.030,00");
    assert_eq!(format_brl(dec("0.5")), "R$ 0,50");
    assert_eq!(format_brl(dec("999.999")), "R$ 1.000,00");
    assert_eq!(format_brl(dec("1234567.891")), "R$ 1.234.567,89");
    assert_eq!(format_brl(dec("-5")), "-R$ 5,00");
}

#[test]
fn rounding_is_half_away_from_zero() {
    assert_eq!(round_currency(dec("10.005")), dec("10.01"));
    assert_eq!(round_currency(dec("10.004")), dec("10.00"));
    assert_eq!(round_currency(dec("-10.005")), dec("-10.01"));
}

#[test]
fn amount_above_limit_fails() {
    let mut r = valid();
    r.amount = dec("10000000000000000000000000000");
    r.items.clear();
    assert!(matches!(r.validate(), Err(CantinaError::Invalid { .. })));

    r.amount = MAX_AMOUNT;
    r.validate().expect("limit itself is allowed");

    r.items.push(BillingItem { description: "Lanche".into(), amount: MAX_AMOUNT + Decimal::ONE });
    assert!(r.validate().is_err());
}
