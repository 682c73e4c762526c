use crate::api::{self, Store};
use crate::commands::Out;
use crate::model::{Record, RecordKind};
use crate::Result;
use anyhow::bail;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Appends a record to the income or expense ledger and writes the mutated
/// sheet back to the store in full.
pub async fn add(
    store: &mut (dyn Store + Send),
    kind: RecordKind,
    date: NaiveDate,
    name: &str,
    amount: Decimal,
) -> Result<Out<Record>> {
    if name.trim().is_empty() {
        bail!("A record needs a name");
    }
    if amount.is_sign_negative() {
        bail!("The amount must be non-negative, got {amount}");
    }

    let mut ledger = api::load_ledger(store).await;
    let set = ledger.set_mut(kind);
    let record = set.append(date, name.trim(), amount).clone();
    api::save_records(store, kind, ledger.set(kind)).await?;

    Ok(Out::new(
        format!(
            "Added {kind} record {} '{}' for {}",
            record.sr,
            record.name,
            record.amount_value().display_currency()
        ),
        record,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TestStore;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    #[tokio::test]
    async fn test_add_appends_and_saves() {
        let mut store = TestStore::default();
        let before = api::load_ledger(&mut store).await.income.len();

        let out = add(
            &mut store,
            RecordKind::Income,
            date("2024-03-01"),
            "Dues",
            Decimal::from_str("100.00").unwrap(),
        )
        .await
        .unwrap();

        let record = out.structure().unwrap();
        assert_eq!(record.sr, (before + 1).to_string());
        assert_eq!(record.date, "2024-03-01");

        // The mutated sheet was written through.
        let after = api::load_ledger(&mut store).await;
        assert_eq!(after.income.len(), before + 1);
        assert_eq!(after.income.records().last().unwrap(), record);
    }

    #[tokio::test]
    async fn test_add_to_unreachable_store_starts_from_empty() {
        // A store whose sheets cannot be read degrades to an empty ledger, so
        // the first added record gets Sr 1.
        let mut store = TestStore::empty();
        let out = add(
            &mut store,
            RecordKind::Expense,
            date("2024-03-01"),
            "Rent",
            Decimal::from_str("50").unwrap(),
        )
        .await
        .unwrap();
        assert_eq!(out.structure().unwrap().sr, "1");
    }

    #[tokio::test]
    async fn test_add_rejects_blank_name() {
        let mut store = TestStore::default();
        let result = add(
            &mut store,
            RecordKind::Income,
            date("2024-03-01"),
            "   ",
            Decimal::ONE,
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_add_rejects_negative_amount() {
        let mut store = TestStore::default();
        let result = add(
            &mut store,
            RecordKind::Income,
            date("2024-03-01"),
            "Dues",
            Decimal::from_str("-1").unwrap(),
        )
        .await;
        assert!(result.is_err());
    }
}
