use super::{AccountSummary, BalanceStatus, StatementLine};
use crate::model::{LedgerTransaction, TransactionKind};
use rust_decimal::Decimal;

/// Solde = somme des cargos - somme des pagos. Indépendant de l'ordre.
pub fn compute_balance(transactions: &[LedgerTransaction]) -> Decimal {
    transactions.iter().map(LedgerTransaction::signed_amount).sum()
}

pub fn classify(balance: Decimal) -> BalanceStatus {
    if balance > Decimal::ZERO {
        BalanceStatus::Debtor
    } else if balance < Decimal::ZERO {
        BalanceStatus::Creditor
    } else {
        BalanceStatus::Settled
    }
}

/// Solde cumulé après chaque transaction, dans l'ordre d'insertion.
pub fn running_balance(transactions: &[LedgerTransaction]) -> Vec<StatementLine> {
    let mut balance = Decimal::ZERO;
    transactions
        .iter()
        .map(|tx| {
            balance += tx.signed_amount();
            StatementLine {
                id: tx.id.clone(),
                date: tx.date,
                kind: tx.kind,
                concept: tx.concept.clone(),
                amount: tx.amount.value(),
                balance,
            }
        })
        .collect()
}

pub fn summarize(transactions: &[LedgerTransaction]) -> AccountSummary {
    let total_of = |kind: TransactionKind| -> Decimal {
        transactions
            .iter()
            .filter(|tx| tx.kind == kind)
            .map(|tx| tx.amount.value())
            .sum()
    };
    let total_charges = total_of(TransactionKind::Charge);
    let total_payments = total_of(TransactionKind::Payment);
    let balance = total_charges - total_payments;

    AccountSummary {
        total_charges,
        total_payments,
        balance,
        status: classify(balance),
    }
}
