use bistro_core::billing::aggregate;
use bistro_core::tax::{split_tax, TaxRateTable};
use bistro_core::{Discount, Jurisdiction, LineItem, Money, TaxRate};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn money(paise: i64) -> Money {
    Money::from_paise(paise)
}

fn arb_jurisdiction() -> impl Strategy<Value = Jurisdiction> {
    any::<bool>().prop_map(Jurisdiction::from_inter_state)
}

fn arb_hsn_code() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("0401".to_string())),
        Just(Some("1905".to_string())),
        Just(Some("2106".to_string())),
        Just(Some("2202".to_string())),
        Just(Some("nonexistent-code".to_string())),
    ]
}

fn arb_discount() -> impl Strategy<Value = Option<Discount>> {
    prop_oneof![
        Just(None),
        (0i64..=100).prop_map(|pct| Some(Discount::Percentage(Decimal::new(pct, 2)))),
        (0i64..50_000).prop_map(|paise| Some(Discount::Absolute(Money::from_paise(paise)))),
    ]
}

// Includes negative prices and zero or negative quantities: the calculator
// computes them as given.
fn arb_item() -> impl Strategy<Value = LineItem> {
    (-1_000_000i64..1_000_000, -999i64..=999, arb_discount(), arb_hsn_code()).prop_map(
        |(paise, quantity, discount, hsn_code)| LineItem {
            name: None,
            price: money(paise),
            quantity,
            discount,
            hsn_code,
        },
    )
}

proptest! {
    #[test]
    fn subtotal_without_discount_is_price_times_quantity(
        paise in 0i64..10_000_000,
        quantity in 1i64..=999,
        jurisdiction in arb_jurisdiction(),
    ) {
        let table = TaxRateTable::default();
        let bill = aggregate(&table, &[LineItem::new(money(paise), quantity)], jurisdiction);
        prop_assert_eq!(bill.subtotal, money(paise) * quantity);
    }

    #[test]
    fn intra_state_split_is_symmetric(
        paise in 0i64..10_000_000,
        bps in 0u32..=10_000,
    ) {
        let taxable = money(paise);
        let rate = TaxRate::from_bps(bps);
        let tax = split_tax(taxable, rate, Jurisdiction::IntraState);

        let expected_half = Money::new(taxable.amount() * rate.percent() / Decimal::ONE_HUNDRED / Decimal::TWO);
        prop_assert_eq!(tax.cgst, tax.sgst);
        prop_assert_eq!(tax.cgst, expected_half);
        prop_assert!(tax.igst.is_zero());
        prop_assert_eq!(tax.total, tax.cgst + tax.sgst + tax.igst);
    }

    #[test]
    fn inter_state_split_is_all_igst(
        paise in 0i64..10_000_000,
        bps in 0u32..=10_000,
    ) {
        let taxable = money(paise);
        let rate = TaxRate::from_bps(bps);
        let tax = split_tax(taxable, rate, Jurisdiction::InterState);

        prop_assert_eq!(tax.igst, Money::new(taxable.amount() * rate.percent() / Decimal::ONE_HUNDRED));
        prop_assert!(tax.cgst.is_zero());
        prop_assert!(tax.sgst.is_zero());
        prop_assert_eq!(tax.total, tax.igst);
    }

    #[test]
    fn bill_invariants_hold(
        items in prop::collection::vec(arb_item(), 0..20),
        jurisdiction in arb_jurisdiction(),
    ) {
        let table = TaxRateTable::default();
        let bill = aggregate(&table, &items, jurisdiction);
        let tax = bill.tax_breakdown;

        prop_assert_eq!(bill.grand_total, bill.subtotal + tax.total);
        prop_assert_eq!(tax.total, tax.cgst + tax.sgst + tax.igst);
        if jurisdiction.is_inter_state() {
            prop_assert!(tax.cgst.is_zero() && tax.sgst.is_zero());
        } else {
            prop_assert!(tax.igst.is_zero());
        }

        let gross: Money = items.iter().map(LineItem::line_total).sum();
        prop_assert_eq!(bill.subtotal + bill.total_discount, gross);
        prop_assert_eq!(bill.lines.len(), items.len());
        prop_assert_eq!(&bill.items, &items);
    }

    #[test]
    fn aggregate_is_idempotent(
        items in prop::collection::vec(arb_item(), 0..20),
        jurisdiction in arb_jurisdiction(),
    ) {
        let table = TaxRateTable::default();
        prop_assert_eq!(
            aggregate(&table, &items, jurisdiction),
            aggregate(&table, &items, jurisdiction)
        );
    }

    #[test]
    fn huge_amounts_never_panic(
        mantissa in any::<i64>(),
        quantity in any::<i64>(),
        bps in 0u32..=10_000,
        jurisdiction in arb_jurisdiction(),
    ) {
        let price = Money::new(Decimal::from(mantissa) * Decimal::from(1_000_000_000i64));
        let item = LineItem::new(price, quantity).with_discount(Discount::Percentage(Decimal::new(5, 1)));
        let bill = aggregate(&TaxRateTable::default(), &[item.clone(), item], jurisdiction);

        let tax = split_tax(bill.subtotal, TaxRate::from_bps(bps), jurisdiction);
        prop_assert_eq!(tax.cgst, tax.sgst);
        prop_assert_eq!(bill.lines.len(), 2);
    }

    #[test]
    fn bare_discount_magnitude_rule(whole in 2i64..10_000, fraction_bp in 0i64..=100) {
        let absolute = Discount::from_magnitude(Decimal::from(whole));
        prop_assert_eq!(absolute, Discount::Absolute(Money::from_rupees(whole)));

        let fraction = Decimal::new(fraction_bp, 2);
        prop_assert_eq!(Discount::from_magnitude(fraction), Discount::Percentage(fraction));
    }
}

#[test]
fn discount_disambiguation_examples() {
    let table = TaxRateTable::default();

    let pct = aggregate(
        &table,
        &[LineItem::new(Money::from_rupees(100), 1).with_discount(Discount::from_magnitude(Decimal::new(1, 1)))],
        Jurisdiction::IntraState,
    );
    assert_eq!(pct.total_discount, Money::from_rupees(10));

    let abs = aggregate(
        &table,
        &[LineItem::new(Money::from_rupees(100), 1).with_discount(Discount::from_magnitude(Decimal::from(10)))],
        Jurisdiction::IntraState,
    );
    assert_eq!(abs.total_discount, Money::from_rupees(10));

    let unambiguous = aggregate(
        &table,
        &[LineItem::new(Money::from_rupees(100), 2).with_discount(Discount::from_magnitude(Decimal::from(50)))],
        Jurisdiction::IntraState,
    );
    assert_eq!(unambiguous.total_discount, Money::from_rupees(50));
    assert_eq!(unambiguous.subtotal, Money::from_rupees(150));
}
