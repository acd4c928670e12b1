use super::{balance, AccountSummary, BalanceStatus, StatementLine};
use crate::model::{Amount, LedgerTransaction, ResidentAccount};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

impl ResidentAccount {
    /// Ajoute un cargo (daté de maintenant si `date` est absent).
    pub fn add_charge(&mut self, concept: &str, amount: Amount, date: Option<DateTime<Utc>>) -> LedgerTransaction {
        let tx = LedgerTransaction::charge(concept, amount, date.unwrap_or_else(Utc::now));
        self.append(tx)
    }

    pub fn add_payment(&mut self, concept: &str, amount: Amount) -> LedgerTransaction {
        let tx = LedgerTransaction::payment(concept, amount, Utc::now());
        self.append(tx)
    }

    /// Ajoute une transaction déjà construite (ex. issue de `expand_recurring_charge`).
    pub fn append(&mut self, tx: LedgerTransaction) -> LedgerTransaction {
        debug!(
            resident = self.resident_id.as_str(),
            kind = %tx.kind,
            amount = %tx.amount,
            "ledger append"
        );
        self.transactions.push(tx.clone());
        tx
    }

    pub fn balance(&self) -> Decimal {
        balance::compute_balance(&self.transactions)
    }

    pub fn status(&self) -> BalanceStatus {
        balance::classify(self.balance())
    }

    pub fn summary(&self) -> AccountSummary {
        balance::summarize(&self.transactions)
    }

    pub fn statement(&self) -> Vec<StatementLine> {
        balance::running_balance(&self.transactions)
    }
}
