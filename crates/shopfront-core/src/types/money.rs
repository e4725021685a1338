//! Currency formatting for order totals.
//!
//! The backend transmits monetary amounts as integer minor units
//! (centavos). Notification bodies render them as Brazilian real.

/// Format an amount in centavos as a `R$ 1.234,56` style string.
pub fn format_centavos(amount: i64) -> String {
    let negative = amount < 0;
    let abs = amount.unsigned_abs();
    let reais = abs / 100;
    let cents = abs % 100;

    let digits = reais.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{cents:02}")
}
