//! Paid/pending arithmetic for a single payment.
//!
//! `pending` is never stored: it is always `total - paid`.

use crate::error::{ConsoleError, ConsoleResult};
use crate::models::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub paid: Amount,
    pub pending: Amount,
}

/// Move `entered` from pending to paid.
///
/// Fails without side effects when `entered` is negative or larger than what
/// is still pending.
pub fn apply_partial_payment(
    total: Amount,
    paid: Amount,
    entered: Amount,
) -> ConsoleResult<Settlement> {
    if entered.is_negative() {
        return Err(ConsoleError::validation("The entered amount cannot be negative."));
    }
    let actual_pending = total - paid;
    if entered > actual_pending {
        return Err(ConsoleError::validation(format!(
            "The entered amount exceeds the pending amount ({actual_pending})."
        )));
    }

    let new_paid = paid + entered;
    let settlement = Settlement {
        paid: new_paid,
        pending: total - new_paid,
    };
    debug_assert!(settlement.paid <= total && !settlement.pending.is_negative());
    Ok(settlement)
}

/// Totals of the payment being edited in a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ledger {
    total: Amount,
    paid: Amount,
    total_locked: bool,
}

impl Ledger {
    /// A payment being created: the total may still change.
    pub fn for_new() -> Self {
        Self {
            total: Amount::ZERO,
            paid: Amount::ZERO,
            total_locked: false,
        }
    }

    /// A recorded payment: the contracted total is frozen.
    pub fn existing(total: Amount, paid: Amount) -> ConsoleResult<Self> {
        if total.is_negative() || paid.is_negative() || paid > total {
            return Err(ConsoleError::validation(format!(
                "Paid amount {paid} is outside 0..={total}."
            )));
        }
        Ok(Self {
            total,
            paid,
            total_locked: true,
        })
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn paid(&self) -> Amount {
        self.paid
    }

    pub fn pending(&self) -> Amount {
        self.total - self.paid
    }

    pub fn is_total_locked(&self) -> bool {
        self.total_locked
    }

    pub fn set_total(&mut self, total: Amount) -> ConsoleResult<()> {
        if self.total_locked {
            return Err(ConsoleError::validation(
                "The total amount cannot be changed once a payment exists.",
            ));
        }
        if total.is_negative() {
            return Err(ConsoleError::validation("The total amount cannot be negative."));
        }
        if total < self.paid {
            return Err(ConsoleError::validation(format!(
                "The total amount cannot be less than the paid amount ({}).",
                self.paid
            )));
        }
        self.total = total;
        Ok(())
    }

    pub fn set_paid(&mut self, paid: Amount) -> ConsoleResult<()> {
        if paid.is_negative() {
            return Err(ConsoleError::validation("The paid amount cannot be negative."));
        }
        if paid > self.total {
            return Err(ConsoleError::validation(format!(
                "The paid amount cannot exceed the total amount ({}).",
                self.total
            )));
        }
        self.paid = paid;
        Ok(())
    }

    pub fn apply_partial_payment(&mut self, entered: Amount) -> ConsoleResult<Settlement> {
        let settlement = apply_partial_payment(self.total, self.paid, entered)?;
        self.paid = settlement.paid;
        Ok(settlement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rs(rupees: i64) -> Amount {
        Amount::from_rupees(rupees)
    }

    #[test]
    fn partial_payment_keeps_the_books_balanced() {
        let cases = [
            (1000, 0, 0),
            (1000, 0, 1000),
            (1000, 250, 500),
            (1000, 999, 1),
            (0, 0, 0),
        ];
        for (total, paid, entered) in cases {
            let s = apply_partial_payment(rs(total), rs(paid), rs(entered)).unwrap();
            assert_eq!(s.paid + s.pending, rs(total), "case {total}/{paid}/{entered}");
            assert_eq!(s.paid, rs(paid + entered));
        }
    }

    #[test]
    fn paise_do_not_drift() {
        let total = Amount::from_paise(100_001);
        let s = apply_partial_payment(total, Amount::from_paise(33_333), Amount::from_paise(33_334))
            .unwrap();
        assert_eq!(s.paid + s.pending, total);
        assert_eq!(s.pending, Amount::from_paise(33_334));
    }

    #[test]
    fn overpayment_is_rejected() {
        let err = apply_partial_payment(rs(1000), rs(700), rs(301)).unwrap_err();
        assert!(matches!(err, ConsoleError::Validation(ref m) if m.contains("300")));
    }

    #[test]
    fn negative_entry_is_rejected() {
        let err = apply_partial_payment(rs(1000), rs(700), rs(-5)).unwrap_err();
        assert!(matches!(err, ConsoleError::Validation(_)));
    }

    #[test]
    fn rejected_payment_leaves_the_ledger_untouched() {
        let mut ledger = Ledger::existing(rs(1000), rs(400)).unwrap();
        let before = ledger;
        assert!(ledger.apply_partial_payment(rs(601)).is_err());
        assert_eq!(ledger, before);

        let s = ledger.apply_partial_payment(rs(600)).unwrap();
        assert_eq!(s.pending, Amount::ZERO);
        assert_eq!(ledger.paid(), rs(1000));
    }

    #[test]
    fn total_is_frozen_for_existing_payments() {
        let mut ledger = Ledger::existing(rs(500), rs(100)).unwrap();
        assert!(ledger.is_total_locked());
        assert!(ledger.set_total(rs(900)).is_err());
        assert_eq!(ledger.total(), rs(500));
    }

    #[test]
    fn new_payments_validate_total_and_paid() {
        let mut ledger = Ledger::for_new();
        ledger.set_total(rs(800)).unwrap();
        ledger.set_paid(rs(200)).unwrap();
        assert_eq!(ledger.pending(), rs(600));

        assert!(ledger.set_paid(rs(801)).is_err());
        assert!(ledger.set_total(rs(100)).is_err());
        assert!(ledger.set_total(rs(-1)).is_err());
        assert_eq!(ledger.pending(), rs(600));
    }

    #[test]
    fn existing_rejects_inconsistent_rows() {
        assert!(Ledger::existing(rs(100), rs(101)).is_err());
        assert!(Ledger::existing(rs(100), rs(-1)).is_err());
    }
}
