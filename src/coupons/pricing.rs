use crate::domain::Coupon;

/// Amount due after applying `coupon` to `subtotal`.
///
/// The discount is floored once over the whole subtotal, so the customer never
/// pays less than `subtotal - subtotal * discount / 100`.
pub fn payable_total(subtotal: u64, coupon: Option<&Coupon>) -> u64 {
    match coupon {
        Some(coupon) => subtotal.saturating_sub(coupon.discount_on(subtotal)),
        None => subtotal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifteen_percent_off_a_thousand() {
        let coupon = Coupon::new("SAVE15", 15);
        assert_eq!(payable_total(1000, Some(&coupon)), 850);
    }

    #[test]
    fn rounding_favours_the_shop() {
        let coupon = Coupon::new("TEN", 10);
        // 10% of 797 is 79.7, floored to 79.
        assert_eq!(payable_total(797, Some(&coupon)), 718);
    }

    #[test]
    fn no_coupon_is_subtotal() {
        assert_eq!(payable_total(797, None), 797);
        assert_eq!(payable_total(0, Some(&Coupon::new("FREE", 100))), 0);
        assert_eq!(payable_total(450, Some(&Coupon::new("FREE", 100))), 0);
    }
}
