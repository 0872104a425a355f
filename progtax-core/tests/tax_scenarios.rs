//! End-to-end scenarios for the aggregator and the progressive engine using
//! the built-in schedule.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use progtax_core::calculations::{EstimateForm, TaxEstimator, compute_tax, compute_taxable_income};
use progtax_core::{Bracket, BracketTable, DeductionConfig, TaxCalculation, TaxProfile};

fn incomes() -> Vec<Decimal> {
    vec![
        dec!(0),
        dec!(0.01),
        dec!(999.99),
        dec!(22847.75),
        dec!(22847.76),
        dec!(22847.77),
        dec!(30000),
        dec!(33919.80),
        dec!(45012.60),
        dec!(53400),
        dec!(55976.16),
        dec!(55976.17),
        dec!(100000),
        dec!(2500000.55),
    ]
}

fn amounts(result: &TaxCalculation) -> Vec<Decimal> {
    result.allocations.iter().map(|a| a.amount).collect()
}

// =========================================================================
// Concrete scenarios
// =========================================================================

#[test]
fn zero_taxable_income_owes_nothing() {
    let result = compute_tax(dec!(0), &BracketTable::default());

    assert_eq!(result.total_tax, dec!(0));
    assert!(result.allocations.iter().all(|a| a.amount == dec!(0) && a.tax == dec!(0)));
}

#[test]
fn income_at_first_boundary_owes_nothing() {
    let result = compute_tax(dec!(22847.76), &BracketTable::default());

    assert_eq!(result.total_tax, dec!(0));
    assert_eq!(result.allocations[0].amount, dec!(22847.76));
    assert_eq!(result.allocations[1].amount, dec!(0));
}

#[test]
fn income_in_second_bracket() {
    let result = compute_tax(dec!(30000), &BracketTable::default());

    assert_eq!(result.allocations[0].amount, dec!(22847.76));
    assert_eq!(result.allocations[0].tax, dec!(0));
    assert_eq!(result.allocations[1].amount, dec!(7152.24));
    assert_eq!(result.allocations[1].rate, dec!(0.075));
    assert_eq!(result.allocations[1].tax, dec!(536.418));
    assert_eq!(result.total_tax, dec!(536.418));
}

#[test]
fn monthly_salary_without_dependents() {
    let config = DeductionConfig::default();
    let figures = compute_taxable_income(
        dec!(5000),
        true,
        dec!(0),
        config.per_dependent_monthly_deduction,
        config.payroll_withholding_rate,
        dec!(0),
    );

    assert_eq!(figures.annual_gross_income, dec!(60000));
    assert_eq!(figures.deductions.withholding, dec!(6600));
    assert_eq!(figures.taxable_income, dec!(53400));

    let result = compute_tax(figures.taxable_income, &BracketTable::default());

    assert_eq!(
        amounts(&result),
        vec![
            dec!(22847.76),
            dec!(11072.04),
            dec!(11092.80),
            dec!(8387.40),
            dec!(0),
        ]
    );
    // 0 + 830.403 + 1663.92 + 1887.165
    assert_eq!(result.total_tax, dec!(4381.488));
    assert_eq!(result.marginal_rate(), dec!(0.225));
}

#[test]
fn single_unbounded_bracket_is_a_flat_tax() {
    let table = BracketTable::new(vec![Bracket::unbounded(dec!(0.18))]).unwrap();

    for income in incomes() {
        let result = compute_tax(income, &table);
        assert_eq!(result.total_tax, income * dec!(0.18));
    }
}

#[test]
fn form_recompute_matches_manual_pipeline() {
    let profile = TaxProfile::default();
    let form = EstimateForm {
        gross_income: "8.000,00".to_string(),
        is_monthly: true,
        dependents: "2".to_string(),
        other_deductions: "R$ 3000".to_string(),
        use_default_brackets: true,
    };

    let estimate = TaxEstimator::new(&profile).recompute(&form);

    // "8.000,00" coerces to 8.00000
    let figures = compute_taxable_income(
        dec!(8),
        true,
        dec!(2),
        dec!(189.59),
        dec!(0.11),
        dec!(3000),
    );
    assert_eq!(estimate.figures, figures);
    assert_eq!(estimate.tax, compute_tax(figures.taxable_income, &BracketTable::default()));
    assert_eq!(estimate.figures.taxable_income, dec!(0));
}

// =========================================================================
// Properties over a spread of incomes
// =========================================================================

#[test]
fn total_tax_is_sum_of_amount_times_rate() {
    let table = BracketTable::default();

    for income in incomes() {
        let result = compute_tax(income, &table);
        let expected: Decimal = result.allocations.iter().map(|a| a.amount * a.rate).sum();
        assert_eq!(result.total_tax, expected, "income {income}");
    }
}

#[test]
fn allocated_amounts_sum_to_taxable_income() {
    let table = BracketTable::default();

    for income in incomes() {
        let result = compute_tax(income, &table);
        assert_eq!(result.taxed_income(), income, "income {income}");
    }
}

#[test]
fn tax_never_decreases_as_income_grows() {
    let table = BracketTable::default();
    let mut previous = Decimal::ZERO;

    for income in incomes() {
        let total = compute_tax(income, &table).total_tax;
        assert!(total >= previous, "tax fell at income {income}");
        previous = total;
    }
}

#[test]
fn repeated_calls_give_identical_results() {
    let table = BracketTable::default();

    for income in incomes() {
        assert_eq!(compute_tax(income, &table), compute_tax(income, &table));
    }
}

#[test]
fn negative_income_owes_nothing() {
    let result = compute_tax(dec!(-1234.56), &BracketTable::default());

    assert_eq!(result.total_tax, dec!(0));
    assert_eq!(result.taxed_income(), dec!(0));
}
