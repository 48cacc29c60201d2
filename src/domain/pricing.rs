//! Order-parameter price derivation and trading-cost arithmetic.
//!
//! Everything here is pure and total: unparseable text or a missing base
//! price surfaces as `None`, never as a panic. Callers treat `None` as
//! "nothing to show / disable submit".

/// Brokerage commission rate applied to every order.
pub const DEFAULT_FEE_RATE: f64 = 0.001;

/// Securities transaction tax, charged on sells only.
pub const TRANSACTION_TAX_RATE: f64 = 0.0025;

/// How a target or stop-loss price is entered on the strategy form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PriceKind {
    /// Absolute KRW price typed directly.
    #[default]
    Amount,
    /// Signed percent offset from the current market price.
    Percent,
}

/// Applies a signed percent offset to a base price and rounds to whole KRW.
///
/// Rounding is half-away-from-zero (`f64::round`) on both signs, matching
/// how the backend rounds order prices.
pub fn price_from_percent(base_price: f64, percent: f64) -> f64 {
    (base_price * (1.0 + percent / 100.0)).round()
}

/// Derives a price from raw form input.
///
/// - `Amount`: parses `amount_text` and returns it verbatim (not rounded).
/// - `Percent`: needs non-empty `percent_text` and a known `base_price`;
///   returns the rounded offset price.
///
/// Any missing or unparseable input yields `None`.
pub fn price_by_type(
    kind: PriceKind,
    amount_text: Option<&str>,
    percent_text: Option<&str>,
    base_price: Option<f64>,
) -> Option<f64> {
    match kind {
        PriceKind::Amount => parse_price_text(amount_text),
        PriceKind::Percent => {
            let percent = parse_price_text(percent_text)?;
            Some(price_from_percent(base_price?, percent))
        }
    }
}

/// Target price for the strategy form. Same contract as [`price_by_type`];
/// the name exists so call sites read as what they compute.
pub fn target_price(
    kind: PriceKind,
    amount_text: Option<&str>,
    percent_text: Option<&str>,
    base_price: Option<f64>,
) -> Option<f64> {
    price_by_type(kind, amount_text, percent_text, base_price)
}

/// Stop-loss price for the strategy form. Percent offsets are expected to be
/// negative, but the sign is the caller's responsibility.
pub fn stop_loss_price(
    kind: PriceKind,
    amount_text: Option<&str>,
    percent_text: Option<&str>,
    base_price: Option<f64>,
) -> Option<f64> {
    price_by_type(kind, amount_text, percent_text, base_price)
}

fn parse_price_text(text: Option<&str>) -> Option<f64> {
    text?.trim().parse::<f64>().ok()
}

/// Fee, tax, and their sum for a single order, in whole KRW.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TradingCost {
    pub fee: i64,
    pub tax: i64,
    pub total: i64,
}

/// Brokerage fee on an order amount at [`DEFAULT_FEE_RATE`].
pub fn trading_fee(amount: f64) -> i64 {
    trading_fee_with_rate(amount, DEFAULT_FEE_RATE)
}

pub fn trading_fee_with_rate(amount: f64, fee_rate: f64) -> i64 {
    (amount * fee_rate).round() as i64
}

/// Transaction tax on a sell amount at [`TRANSACTION_TAX_RATE`].
pub fn transaction_tax(amount: f64) -> i64 {
    transaction_tax_with_rate(amount, TRANSACTION_TAX_RATE)
}

pub fn transaction_tax_with_rate(amount: f64, tax_rate: f64) -> i64 {
    (amount * tax_rate).round() as i64
}

/// Full cost breakdown for an order. Tax applies to sells only.
pub fn trading_cost(amount: f64, is_sell: bool) -> TradingCost {
    let fee = trading_fee(amount);
    let tax = if is_sell { transaction_tax(amount) } else { 0 };
    TradingCost {
        fee,
        tax,
        total: fee + tax,
    }
}

/// Combined fee plus (for sells) tax on an order amount.
pub fn total_trading_cost(amount: f64, is_sell: bool) -> i64 {
    trading_cost(amount, is_sell).total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_offsets_round_to_whole_krw() {
        assert_eq!(price_from_percent(100_000.0, 10.0), 110_000.0);
        assert_eq!(price_from_percent(100_000.0, -5.0), 95_000.0);
        // Half-away-from-zero on both signs.
        assert_eq!(price_from_percent(100.0, 0.5), 101.0);
        assert_eq!(price_from_percent(-100.0, 0.5), -101.0);
    }

    #[test]
    fn amount_input_is_returned_verbatim() {
        assert_eq!(
            price_by_type(PriceKind::Amount, Some("12345"), None, None),
            Some(12345.0)
        );
        assert_eq!(
            price_by_type(PriceKind::Amount, Some("12345.5"), None, None),
            Some(12345.5)
        );
    }

    #[test]
    fn percent_input_needs_base_price() {
        assert_eq!(
            price_by_type(PriceKind::Percent, None, Some("10"), Some(100_000.0)),
            Some(110_000.0)
        );
        assert_eq!(
            price_by_type(PriceKind::Percent, None, Some("10"), None),
            None
        );
    }

    #[test]
    fn bad_input_yields_none_not_panic() {
        assert_eq!(price_by_type(PriceKind::Amount, Some(""), None, None), None);
        assert_eq!(price_by_type(PriceKind::Amount, None, None, None), None);
        assert_eq!(
            price_by_type(PriceKind::Amount, Some("not a number"), None, None),
            None
        );
        assert_eq!(
            price_by_type(PriceKind::Percent, None, Some(""), Some(50_000.0)),
            None
        );
        assert_eq!(
            price_by_type(PriceKind::Percent, None, Some(" "), Some(50_000.0)),
            None
        );
    }

    #[test]
    fn aliases_share_the_contract() {
        assert_eq!(
            target_price(PriceKind::Percent, None, Some("10"), Some(100_000.0)),
            Some(110_000.0)
        );
        assert_eq!(
            stop_loss_price(PriceKind::Percent, None, Some("-5"), Some(100_000.0)),
            Some(95_000.0)
        );
    }

    #[test]
    fn fee_and_tax_arithmetic() {
        assert_eq!(trading_fee(1_000_000.0), 1_000);
        assert_eq!(transaction_tax(1_000_000.0), 2_500);
        assert_eq!(total_trading_cost(1_000_000.0, true), 3_500);
        assert_eq!(total_trading_cost(1_000_000.0, false), 1_000);
    }

    #[test]
    fn cost_breakdown_matches_totals() {
        let sell = trading_cost(1_000_000.0, true);
        assert_eq!(
            sell,
            TradingCost {
                fee: 1_000,
                tax: 2_500,
                total: 3_500
            }
        );
        let buy = trading_cost(1_000_000.0, false);
        assert_eq!(buy.tax, 0);
        assert_eq!(buy.total, buy.fee);
    }
}
