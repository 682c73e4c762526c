use crate::api::{self, Store};
use crate::commands::Out;
use crate::model::LedgerData;
use crate::Result;

/// Loads and returns both record sets.
pub async fn show(store: &mut (dyn Store + Send)) -> Result<Out<LedgerData>> {
    let ledger = api::load_ledger(store).await;
    let mut message = String::new();
    for (title, set) in [("Income", &ledger.income), ("Expenses", &ledger.expenses)] {
        message.push_str(&format!("{title} ({} records)\n", set.len()));
        for record in set.records() {
            message.push_str(&format!(
                "  {:>4}  {:<10}  {:<30}  {:>12}\n",
                record.sr,
                record.date,
                record.name,
                record.amount_value().display_currency()
            ));
        }
    }
    Ok(Out::new(message.trim_end().to_string(), ledger))
}
