use crate::model::{TransactionId, TransactionKind};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

/// Classement d'un solde : positif = le résident doit, négatif = crédit en sa faveur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    Debtor,
    Creditor,
    Settled,
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceStatus::Debtor => f.write_str("Saldo Deudor"),
            BalanceStatus::Creditor => f.write_str("Saldo a Favor"),
            BalanceStatus::Settled => f.write_str("Al Día"),
        }
    }
}

/// Ligne de relevé : une transaction et le solde cumulé après elle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementLine {
    pub id: TransactionId,
    pub date: DateTime<Utc>,
    pub kind: TransactionKind,
    pub concept: String,
    pub amount: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountSummary {
    pub total_charges: Decimal,
    pub total_payments: Decimal,
    pub balance: Decimal,
    pub status: BalanceStatus,
}
