//! Overflow-free decimal helpers
//!
//! `Decimal` operators panic when a result leaves the 96-bit range. Every
//! calculator path goes through these instead, saturating at `Decimal::MAX`
//! or `Decimal::MIN` by the sign the exact result would have had.

use rust_decimal::Decimal;

fn saturated(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

fn sign_of_product(a: Decimal, b: Decimal) -> bool {
    !a.is_zero() && !b.is_zero() && (a.is_sign_negative() != b.is_sign_negative())
}

/// `a * b / divisor`, dividing first when the product overflows
///
/// A zero divisor saturates; callers guard it when zero has a meaning.
pub fn mul_div(a: Decimal, b: Decimal, divisor: Decimal) -> Decimal {
    a.checked_mul(b)
        .and_then(|product| product.checked_div(divisor))
        .or_else(|| {
            a.checked_div(divisor)
                .and_then(|quotient| quotient.checked_mul(b))
        })
        .unwrap_or_else(|| {
            saturated(sign_of_product(a, b) != divisor.is_sign_negative())
        })
}

/// `a / divisor * b`, multiplying first when the quotient overflows
pub fn div_mul(a: Decimal, divisor: Decimal, b: Decimal) -> Decimal {
    a.checked_div(divisor)
        .and_then(|quotient| quotient.checked_mul(b))
        .or_else(|| a.checked_mul(b).and_then(|product| product.checked_div(divisor)))
        .unwrap_or_else(|| {
            saturated(sign_of_product(a, b) != divisor.is_sign_negative())
        })
}

/// `a / divisor`, saturating on overflow
pub fn ratio(a: Decimal, divisor: Decimal) -> Decimal {
    div_mul(a, divisor, Decimal::ONE)
}

/// Share of `part` in `part + rest`, or `None` when the sum is not positive
///
/// Both terms are halved when their sum would overflow.
pub fn fraction_of_sum(part: Decimal, rest: Decimal) -> Option<Decimal> {
    let (part, total) = match part.checked_add(rest) {
        Some(total) => (part, total),
        None => {
            let half = part / Decimal::TWO;
            (half, half.saturating_add(rest / Decimal::TWO))
        }
    };
    if total <= Decimal::ZERO {
        return None;
    }
    Some(ratio(part, total))
}
