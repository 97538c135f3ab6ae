use chrono::{DateTime, FixedOffset, Utc};

const FORMATO_FECHA: &str = "%d/%m/%Y, %H:%M";

/// Formats an amount the way Argentine pesos are written: `$ 1.234,56`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let (pesos, cents) = (cents / 100, cents % 100);

    let digits = pesos.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && (pesos > 0 || cents > 0) { "-" } else { "" };
    format!("{sign}$ {grouped},{cents:02}")
}

/// Buenos Aires local time, `dd/mm/yyyy, HH:MM`.
pub fn format_date(date: &DateTime<Utc>) -> String {
    // Argentina has no daylight saving time.
    match FixedOffset::west_opt(3 * 3600) {
        Some(offset) => date.with_timezone(&offset).format(FORMATO_FECHA).to_string(),
        None => date.format(FORMATO_FECHA).to_string(),
    }
}
