//! Денежный вывод в BRL: `R$ 1.030,00`.

use rust_decimal::{Decimal, RoundingStrategy};

pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn format_brl(value: Decimal) -> String {
    let rounded = round_currency(value);
    let negative = rounded < Decimal::ZERO;
    // to_string у округлённого значения может дать меньше двух знаков
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac_part}")
}
