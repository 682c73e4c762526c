//! Pure aggregation over record sets: totals, net balance, and monthly
//! rollups. Nothing here performs I/O or mutates its inputs.

use crate::model::RecordSet;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sums the amounts of a record set, coercing non-numeric cells to zero.
pub fn total(set: &RecordSet) -> Decimal {
    set.records()
        .iter()
        .map(|r| r.amount_value().value())
        .sum()
}

/// Total income minus total expenses.
pub fn net_balance(income: &RecordSet, expenses: &RecordSet) -> Decimal {
    total(income) - total(expenses)
}

/// One month's income, expenses, and net, keyed by `YYYY-MM`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MonthlyAggregate {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

/// Groups both record sets by calendar month and outer-joins the monthly sums.
///
/// A month present in only one set contributes zero on the other side. Records
/// whose date does not parse are excluded from the grouping (they still count
/// toward [`total`]). The result is sorted by month key ascending.
pub fn monthly_breakdown(income: &RecordSet, expenses: &RecordSet) -> Vec<MonthlyAggregate> {
    let income_by_month = sum_by_month(income);
    let expenses_by_month = sum_by_month(expenses);

    let mut months: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for (month, sum) in income_by_month {
        months.entry(month).or_default().0 = sum;
    }
    for (month, sum) in expenses_by_month {
        months.entry(month).or_default().1 = sum;
    }

    months
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyAggregate {
            month,
            income,
            expenses,
            net: income - expenses,
        })
        .collect()
}

fn sum_by_month(set: &RecordSet) -> BTreeMap<String, Decimal> {
    let mut sums: BTreeMap<String, Decimal> = BTreeMap::new();
    for record in set.records() {
        if let Some(month) = record.month_key() {
            *sums.entry(month).or_default() += record.amount_value().value();
        }
    }
    sums
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, RecordSet};
    use std::str::FromStr;

    fn set(records: &[(&str, &str, &str, &str)]) -> RecordSet {
        RecordSet::new(
            records
                .iter()
                .map(|(sr, date, name, amount)| Record::new(*sr, *date, *name, *amount))
                .collect(),
        )
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_total_empty_set() {
        assert_eq!(total(&RecordSet::default()), Decimal::ZERO);
    }

    #[test]
    fn test_total_coerces_garbage_to_zero() {
        let s = set(&[
            ("1", "2024-01-05", "Dues", "100.00"),
            ("2", "2024-01-06", "Mystery", "n/a"),
            ("3", "2024-01-07", "Fine", ""),
        ]);
        assert_eq!(total(&s), dec("100.00"));
    }

    #[test]
    fn test_total_is_order_invariant() {
        let forward = set(&[
            ("1", "2024-01-05", "A", "10.25"),
            ("2", "2024-01-06", "B", "20.50"),
            ("3", "2024-01-07", "C", "30.75"),
        ]);
        let reversed = set(&[
            ("1", "2024-01-07", "C", "30.75"),
            ("2", "2024-01-06", "B", "20.50"),
            ("3", "2024-01-05", "A", "10.25"),
        ]);
        assert_eq!(total(&forward), total(&reversed));
    }

    #[test]
    fn test_net_balance() {
        let income = set(&[("1", "2024-01-05", "Dues", "100.00")]);
        let expenses = set(&[("1", "2024-01-15", "Rent", "30.00")]);
        assert_eq!(net_balance(&income, &expenses), dec("70.00"));
        assert_eq!(
            net_balance(&RecordSet::default(), &RecordSet::default()),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_monthly_breakdown_outer_join() {
        let income = set(&[
            ("1", "2024-01-10", "Dues", "200"),
            ("2", "2024-02-01", "Donation", "50"),
        ]);
        let expenses = set(&[("1", "2024-01-15", "Rent", "30")]);

        let breakdown = monthly_breakdown(&income, &expenses);
        assert_eq!(
            breakdown,
            vec![
                MonthlyAggregate {
                    month: "2024-01".to_string(),
                    income: dec("200"),
                    expenses: dec("30"),
                    net: dec("170"),
                },
                MonthlyAggregate {
                    month: "2024-02".to_string(),
                    income: dec("50"),
                    expenses: Decimal::ZERO,
                    net: dec("50"),
                },
            ]
        );
    }

    #[test]
    fn test_monthly_breakdown_skips_unparseable_dates() {
        let income = set(&[
            ("1", "2024-01-10", "Dues", "200"),
            ("2", "someday", "Donation", "50"),
        ]);
        let breakdown = monthly_breakdown(&income, &RecordSet::default());
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].income, dec("200"));
        // The unparseable-date row still counts toward the plain total.
        assert_eq!(total(&income), dec("250"));
    }

    #[test]
    fn test_monthly_breakdown_expense_only_month() {
        let expenses = set(&[("1", "2023-12-01", "Rent", "30")]);
        let breakdown = monthly_breakdown(&RecordSet::default(), &expenses);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].income, Decimal::ZERO);
        assert_eq!(breakdown[0].net, dec("-30"));
    }

    #[test]
    fn test_monthly_breakdown_sorted_ascending() {
        let income = set(&[
            ("1", "2024-03-10", "C", "1"),
            ("2", "2023-11-01", "A", "1"),
            ("3", "2024-01-01", "B", "1"),
        ]);
        let breakdown = monthly_breakdown(&income, &RecordSet::default());
        let months: Vec<&str> = breakdown.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2023-11", "2024-01", "2024-03"]);
    }
}
