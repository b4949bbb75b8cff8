//! Order cost summary.
//!
//! All arithmetic is done on [`Decimal`]; rounding only happens when a
//! value is turned into a display string.

use crate::entities::OrderDetail;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use storefront_sdk::objects::OrderCostSummary;

/// Flat shipping charge per item.
pub const SHIPPING_PER_ITEM: Decimal = dec!(5.00);

/// Tax rate applied to subtotal plus shipping.
pub const TAX_RATE: Decimal = dec!(0.05);

/// Exact cost figures of one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostBreakdown {
    pub items_count: i64,
    pub sub_total: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CostBreakdown {
    /// Compute the breakdown for an order's lines. Absent lines cost nothing.
    pub fn for_details(details: Option<&[OrderDetail]>) -> Self {
        let details = details.unwrap_or_default();

        let items_count = line_item_count(details);
        let sub_total: Decimal = details
            .iter()
            .map(|d| Decimal::from(d.quantity) * d.product.price)
            .sum();
        let shipping = Decimal::from(items_count) * SHIPPING_PER_ITEM;
        let tax = (sub_total + shipping) * TAX_RATE;
        let total = sub_total + shipping + tax;

        Self {
            items_count,
            sub_total,
            shipping,
            tax,
            total,
        }
    }

    pub fn to_summary(&self, format: &CurrencyFormat) -> OrderCostSummary {
        OrderCostSummary {
            cart_sub_total: format.format(self.sub_total),
            cart_shipping: format.format(self.shipping),
            cart_tax: format.format(self.tax),
            cart_total: format.format(self.total),
        }
    }
}

/// Total quantity over all lines.
pub fn line_item_count(details: &[OrderDetail]) -> i64 {
    details.iter().map(|d| i64::from(d.quantity)).sum()
}

/// How money is rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub group_separator: String,
    pub decimal_separator: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            group_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
        }
    }
}

impl CurrencyFormat {
    /// Render `value` with two decimals, rounding half away from zero.
    pub fn format(&self, value: Decimal) -> String {
        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();

        let digits = format!("{:.2}", rounded.abs());
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut out = String::with_capacity(digits.len() + self.symbol.len() + 4);
        if negative {
            out.push('-');
        }
        out.push_str(&self.symbol);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                out.push_str(&self.group_separator);
            }
            out.push(ch);
        }
        out.push_str(&self.decimal_separator);
        out.push_str(fraction);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Product;

    fn line(quantity: i32, price: Decimal) -> OrderDetail {
        OrderDetail {
            order_detail_id: 0,
            order_id: 1,
            quantity,
            unit_price: price,
            product: Product {
                product_id: 1,
                sku_number: "SKU".to_string(),
                title: "Part".to_string(),
                price,
                sale_price: price,
                product_art_url: String::new(),
            },
        }
    }

    #[test]
    fn test_two_line_order() {
        let details = vec![line(2, dec!(10.00)), line(1, dec!(5.00))];
        let costs = CostBreakdown::for_details(Some(details.as_slice()));
        assert_eq!(costs.items_count, 3);
        assert_eq!(costs.sub_total, dec!(25.00));
        assert_eq!(costs.shipping, dec!(15.00));
        assert_eq!(costs.tax, dec!(2.00));
        assert_eq!(costs.total, dec!(42.00));
    }

    #[test]
    fn test_absent_details_cost_nothing() {
        let costs = CostBreakdown::for_details(None);
        assert_eq!(costs.items_count, 0);
        assert!(costs.sub_total.is_zero());
        assert!(costs.shipping.is_zero());
        assert!(costs.tax.is_zero());
        assert!(costs.total.is_zero());
    }

    #[test]
    fn test_no_binary_float_drift() {
        // 0.1 + 0.2 style values stay exact.
        let details = vec![line(3, dec!(0.10)), line(1, dec!(0.20))];
        let costs = CostBreakdown::for_details(Some(details.as_slice()));
        assert_eq!(costs.sub_total, dec!(0.50));
        assert_eq!(costs.shipping, dec!(20.00));
        assert_eq!(costs.tax, dec!(1.0250));
        assert_eq!(costs.total, dec!(21.5250));
    }

    #[test]
    fn test_summary_strings() {
        let details = vec![line(2, dec!(10.00)), line(1, dec!(5.00))];
        let summary = CostBreakdown::for_details(Some(details.as_slice()))
            .to_summary(&CurrencyFormat::default());
        assert_eq!(summary.cart_sub_total, "$25.00");
        assert_eq!(summary.cart_shipping, "$15.00");
        assert_eq!(summary.cart_tax, "$2.00");
        assert_eq!(summary.cart_total, "$42.00");
    }

    #[test]
    fn test_currency_format() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(dec!(0)), "$0.00");
        assert_eq!(fmt.format(dec!(1234.5)), "$1,234.50");
        assert_eq!(fmt.format(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(fmt.format(dec!(1.275)), "$1.28");
        assert_eq!(fmt.format(dec!(1.2749)), "$1.27");
        assert_eq!(fmt.format(dec!(-3.5)), "-$3.50");
        assert_eq!(fmt.format(dec!(-0.001)), "$0.00");
        assert_eq!(fmt.format(dec!(999.999)), "$1,000.00");
    }

    #[test]
    fn test_currency_format_custom_separators() {
        let fmt = CurrencyFormat {
            symbol: "€".to_string(),
            group_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
        };
        assert_eq!(fmt.format(dec!(9876.5)), "€9.876,50");
    }
}
