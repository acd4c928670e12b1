#![forbid(unsafe_code)]
use chrono::{Datelike, TimeZone, Utc};
use condo_ops::{
    ledger::{classify, compute_balance, expand_recurring_charge, render_statement, running_balance, BalanceStatus},
    model::{Amount, LedgerTransaction, ResidentAccount, ResidentId, SiteId, TransactionKind, ValidationError},
};
use rust_decimal::Decimal;
use std::num::NonZeroU32;

fn amount(s: &str) -> Amount {
    s.parse().unwrap()
}

fn account() -> ResidentAccount {
    ResidentAccount::new(ResidentId::new("R-101"), "Ana Perez", "Torre A 101", SiteId::new("A"))
}

#[test]
fn empty_ledger_is_settled() {
    assert_eq!(compute_balance(&[]), Decimal::ZERO);
    assert_eq!(account().status(), BalanceStatus::Settled);
}

#[test]
fn partial_payment_leaves_debtor_balance() {
    let mut acc = account();
    acc.add_charge("Cuota", amount("100"), None);
    acc.add_payment("Abono", amount("40"));

    assert_eq!(acc.balance(), Decimal::new(60, 0));
    assert_eq!(acc.status(), BalanceStatus::Debtor);
}

#[test]
fn full_payment_settles_the_account() {
    let mut acc = account();
    acc.add_charge("Cuota", amount("50"), None);
    acc.add_payment("Pago", amount("50"));

    assert_eq!(acc.balance(), Decimal::ZERO);
    assert_eq!(acc.status(), BalanceStatus::Settled);
}

#[test]
fn overpayment_is_a_credit() {
    let mut acc = account();
    acc.add_charge("Cuota", amount("75.50"), None);
    acc.add_payment("Pago", amount("100"));

    assert_eq!(acc.balance(), Decimal::new(-2450, 2));
    assert_eq!(classify(acc.balance()), BalanceStatus::Creditor);
}

#[test]
fn cents_do_not_drift() {
    let mut acc = account();
    for _ in 0..10 {
        acc.add_charge("Agua", amount("0.10"), None);
    }
    acc.add_payment("Pago", amount("1.00"));
    assert_eq!(acc.balance(), Decimal::ZERO);
}

#[test]
fn add_charge_keeps_existing_transactions() {
    let mut acc = account();
    let first = acc.add_charge("Cuota", amount("10"), None);
    let at = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
    let second = acc.add_charge("Multa", amount("5"), Some(at));

    assert_eq!(acc.transactions, vec![first, second.clone()]);
    assert_eq!(second.date, at);
    assert_eq!(second.kind, TransactionKind::Charge);
}

#[test]
fn running_balance_ends_on_computed_balance() {
    let mut acc = account();
    acc.add_charge("Cuota", amount("100"), None);
    acc.add_payment("Abono", amount("30"));
    acc.add_charge("Multa", amount("15.25"), None);

    let lines = running_balance(&acc.transactions);
    let cumulative: Vec<Decimal> = lines.iter().map(|l| l.balance).collect();
    assert_eq!(
        cumulative,
        vec![Decimal::new(100, 0), Decimal::new(70, 0), Decimal::new(8525, 2)]
    );
    assert_eq!(lines.last().unwrap().balance, acc.balance());
}

#[test]
fn monthly_charges_are_generated_from_start() {
    let start = Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap();
    let txs = expand_recurring_charge(start, NonZeroU32::new(1).unwrap(), "X", amount("100"), 3);

    assert_eq!(txs.len(), 3);
    let months: Vec<u32> = txs.iter().map(|t| t.date.month()).collect();
    assert_eq!(months, vec![1, 2, 3]);
    assert!(txs
        .iter()
        .all(|t| t.kind == TransactionKind::Charge && t.amount == amount("100") && t.date.day() == 5));
}

#[test]
fn bimonthly_charges_cross_the_year() {
    let start = Utc.with_ymd_and_hms(2024, 11, 1, 0, 0, 0).unwrap();
    let txs = expand_recurring_charge(
        start,
        NonZeroU32::new(2).unwrap(),
        "Cuota de Mantenimiento",
        amount("250"),
        3,
    );
    let concepts: Vec<&str> = txs.iter().map(|t| t.concept.as_str()).collect();
    insta::assert_debug_snapshot!(concepts, @r###"
    [
        "Cuota de Mantenimiento - Noviembre 2024",
        "Cuota de Mantenimiento - Enero 2025",
        "Cuota de Mantenimiento - Marzo 2025",
    ]
    "###);
}

#[test]
fn zero_count_yields_nothing() {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    assert!(expand_recurring_charge(start, NonZeroU32::new(1).unwrap(), "X", amount("1"), 0).is_empty());
}

#[test]
fn amounts_must_be_positive() {
    assert!(matches!("0".parse::<Amount>(), Err(ValidationError::NonPositiveAmount(_))));
    assert!(matches!("-5".parse::<Amount>(), Err(ValidationError::NonPositiveAmount(_))));
    assert!(matches!("abc".parse::<Amount>(), Err(ValidationError::InvalidAmount(_))));
    assert_eq!("pago".parse::<TransactionKind>(), Ok(TransactionKind::Payment));
}

#[test]
fn statement_renders_running_balance() {
    let mut acc = account();
    let jan5 = Utc.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap();
    let jan20 = Utc.with_ymd_and_hms(2025, 1, 20, 9, 0, 0).unwrap();
    acc.add_charge("Cuota de Mantenimiento - Enero 2025", amount("100"), Some(jan5));
    acc.append(LedgerTransaction::payment("Transferencia", amount("40"), jan20));

    insta::assert_snapshot!(render_statement(&acc), @r###"
    Ana Perez (R-101) | Torre A 101 | A
    2025-01-05 | Cargo | Cuota de Mantenimiento - Enero 2025 | 100.00 | 100.00
    2025-01-20 | Pago | Transferencia | 40.00 | 60.00
    Cargos: 100.00 | Pagos: 40.00 | Saldo: 60.00 (Saldo Deudor)
    "###);
}
