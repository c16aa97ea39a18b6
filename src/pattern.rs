//! Ramp detection: strictly increasing arithmetic progressions above a threshold.

use crate::amount::Amount;

/// Returns the common step if `amounts`, taken in order, form a strictly
/// increasing arithmetic progression whose every term is strictly greater than
/// `threshold`. Returns zero otherwise, including for fewer than two terms.
///
/// ```
/// use fraud_engine::{pattern::ramp_step, Amount};
///
/// let amounts = [1200, 1800, 2400].map(Amount::new);
/// assert_eq!(ramp_step(amounts, Amount::new(1000)), Amount::new(600));
/// ```
pub fn ramp_step<I>(amounts: I, threshold: Amount) -> Amount
where
    I: IntoIterator<Item = Amount>,
{
    let mut previous: Option<Amount> = None;
    let mut step: Option<Amount> = None;

    for amount in amounts {
        if amount <= threshold {
            return Amount::ZERO;
        }
        if let Some(prev) = previous {
            let Some(diff) = amount.checked_sub(prev) else {
                return Amount::ZERO;
            };
            match step {
                None => step = Some(diff),
                Some(s) if s != diff => return Amount::ZERO,
                Some(_) => {}
            }
        }
        previous = Some(amount);
    }

    match step {
        Some(s) if s.is_positive() => s,
        _ => Amount::ZERO,
    }
}
