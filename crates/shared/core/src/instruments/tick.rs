use rust_decimal::Decimal;

use crate::values::Price;

/// Align a price to the nearest multiple of `tick`
///
/// `round(price / tick) * tick`, computed in exact decimal arithmetic. An
/// exact midpoint resolves to the even multiple, so 3005.3 on a 0.2 tick
/// becomes 3005.2. A non-positive tick leaves the price untouched.
pub fn round_to_tick(price: Price, tick: Price) -> Price {
    if tick <= Decimal::ZERO {
        return price;
    }
    ((price / tick).round() * tick).normalize()
}

/// Returns true if the price is already a multiple of the tick
pub fn is_tick_aligned(price: Price, tick: Price) -> bool {
    if tick <= Decimal::ZERO {
        return true;
    }
    (price % tick).is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_to_tick() {
        assert_eq!(round_to_tick(dec!(3005.3), dec!(0.2)), dec!(3005.2));
        assert_eq!(round_to_tick(dec!(3005.31), dec!(0.2)), dec!(3005.4));
        assert_eq!(round_to_tick(dec!(3005.29), dec!(0.2)), dec!(3005.2));
        assert_eq!(round_to_tick(dec!(3712), dec!(1)), dec!(3712));
        assert_eq!(round_to_tick(dec!(3712.6), dec!(1)), dec!(3713));
        assert_eq!(round_to_tick(dec!(512.37), dec!(0.05)), dec!(512.35));
    }

    #[test]
    fn test_round_is_idempotent() {
        let ticks = [dec!(0.2), dec!(0.5), dec!(1), dec!(5), dec!(0.01), dec!(0.05)];
        let prices = [
            dec!(3005.3),
            dec!(3005.1),
            dec!(0.07),
            dec!(98765.4321),
            dec!(12.5),
            dec!(-3.3),
        ];

        for tick in ticks {
            for price in prices {
                let once = round_to_tick(price, tick);
                assert_eq!(round_to_tick(once, tick), once, "price {price} tick {tick}");
                assert!(is_tick_aligned(once, tick), "price {price} tick {tick}");
            }
        }
    }

    #[test]
    fn test_non_positive_tick() {
        assert_eq!(round_to_tick(dec!(3005.3), Decimal::ZERO), dec!(3005.3));
        assert!(is_tick_aligned(dec!(3005.3), Decimal::ZERO));
    }
}
