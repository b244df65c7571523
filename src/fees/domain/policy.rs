use chrono::NaiveDateTime;
use crate::core::domain::Configuration;
use crate::fees::dto::FeeQuote;

// whole days past the loan period, zero while the loan is still running
pub(crate) fn days_overdue(borrowed_at: NaiveDateTime, now: NaiveDateTime, loan_days: i64) -> i64 {
    ((now - borrowed_at).num_days() - loan_days).max(0)
}

pub(crate) fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// assess prices a single outstanding loan as of now
pub(crate) fn assess(borrowed_at: NaiveDateTime, now: NaiveDateTime, config: &Configuration) -> FeeQuote {
    let days = days_overdue(borrowed_at, now, config.book_loan_days);
    FeeQuote::assessed(days, round_cents(days as f64 * config.daily_late_fee))
}
