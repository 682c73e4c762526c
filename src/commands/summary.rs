use crate::aggregate::{self, MonthlyAggregate};
use crate::api::{self, Store};
use crate::commands::Out;
use crate::model::Amount;
use crate::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals, net balance, and the monthly breakdown, recomputed from the current
/// ledger snapshot.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SummaryReport {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_balance: Decimal,
    pub monthly: Vec<MonthlyAggregate>,
}

/// Computes the summary figures for the ledger.
pub async fn summary(store: &mut (dyn Store + Send)) -> Result<Out<SummaryReport>> {
    let ledger = api::load_ledger(store).await;
    let report = SummaryReport {
        total_income: aggregate::total(&ledger.income),
        total_expenses: aggregate::total(&ledger.expenses),
        net_balance: aggregate::net_balance(&ledger.income, &ledger.expenses),
        monthly: aggregate::monthly_breakdown(&ledger.income, &ledger.expenses),
    };

    let mut message = format!(
        "Total Income: {}\nTotal Expenses: {}\nNet Balance: {}\n",
        currency(report.total_income),
        currency(report.total_expenses),
        currency(report.net_balance),
    );
    if !report.monthly.is_empty() {
        message.push_str("\nMonth    Income          Expenses        Net\n");
        for month in &report.monthly {
            message.push_str(&format!(
                "{}  {:<14}  {:<14}  {}\n",
                month.month,
                currency(month.income),
                currency(month.expenses),
                currency(month.net)
            ));
        }
    }
    Ok(Out::new(message.trim_end().to_string(), report))
}

fn currency(value: Decimal) -> String {
    Amount::new(value).display_currency()
}
