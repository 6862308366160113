//! Display formatting for amounts and percentages.

/// `1234.5` → `"$1,234.50"`, negatives as `"-$12.00"`.
pub fn format_money(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", sign, grouped, fraction)
}

/// Signed amount for a transaction row: income positive, expense negative.
pub fn format_signed(amount: f64, is_income: bool) -> String {
    if is_income {
        format!("+{}", format_money(amount))
    } else {
        format!("-{}", format_money(amount))
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
