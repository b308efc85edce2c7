//! Rupee display with Indian digit grouping (`₹1,00,000`).

use crate::models::Amount;

pub const RUPEE: char = '₹';

/// Group the last three digits, then pairs: 12345678 → "1,23,45,678".
pub fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

pub fn format_inr(amount: Amount) -> String {
    let paise = amount.paise();
    let sign = if paise < 0 { "-" } else { "" };
    let abs = paise.unsigned_abs();
    let rupees = group_indian(abs / 100);
    match abs % 100 {
        0 => format!("{sign}{RUPEE}{rupees}"),
        fraction => format!("{sign}{RUPEE}{rupees}.{fraction:02}"),
    }
}

/// Inverse of [`format_inr`]; also accepts plain numbers.
pub fn parse_inr(text: &str) -> Option<Amount> {
    let trimmed = text.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let rest = rest.trim_start_matches(RUPEE);
    if rest.starts_with('-') {
        return None;
    }
    let amount = Amount::parse(rest)?;
    Some(if negative {
        Amount::ZERO - amount
    } else {
        amount
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_like_the_indian_numbering_system() {
        assert_eq!(group_indian(0), "0");
        assert_eq!(group_indian(999), "999");
        assert_eq!(group_indian(1000), "1,000");
        assert_eq!(group_indian(100_000), "1,00,000");
        assert_eq!(group_indian(12_345_678), "1,23,45,678");
    }

    #[test]
    fn formats_rupees_and_paise() {
        assert_eq!(format_inr(Amount::from_rupees(100_000)), "₹1,00,000");
        assert_eq!(format_inr(Amount::from_paise(123_450)), "₹1,234.50");
        assert_eq!(format_inr(Amount::ZERO), "₹0");
        assert_eq!(format_inr(Amount::from_paise(-5_000)), "-₹50");
    }

    #[test]
    fn formatting_preserves_the_value() {
        for paise in [0, 5, 100_000_00, 123_456_789, -42_10] {
            let amount = Amount::from_paise(paise);
            assert_eq!(parse_inr(&format_inr(amount)), Some(amount));
        }
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_inr("₹"), None);
        assert_eq!(parse_inr("--5"), None);
        assert_eq!(parse_inr("₹12.3.4"), None);
    }
}
