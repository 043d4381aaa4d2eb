//! Registration fee arithmetic.

use serde::Serialize;

/// Accommodation charge per accommodated member, in rupees.
pub const ACCOMMODATION_RATE: i64 = 1500;

/// Itemized result of a fee computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeBreakdown {
    pub event_fees: i64,
    pub accommodation_fees: i64,
    pub discount: i64,
    pub total: i64,
}

/// Compute the payable total for a registration.
///
/// `total = reg_fees + ACCOMMODATION_RATE * accommodation_members - discount`,
/// floored at zero — a discount larger than the fees never produces a
/// negative amount due.
pub fn calculate_total_fees(
    reg_fees: i64,
    accommodation_members: i32,
    discount: i64,
) -> FeeBreakdown {
    let accommodation_fees = ACCOMMODATION_RATE * i64::from(accommodation_members);
    let total = (reg_fees + accommodation_fees - discount).max(0);
    FeeBreakdown {
        event_fees: reg_fees,
        accommodation_fees,
        discount,
        total,
    }
}
