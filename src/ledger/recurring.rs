use crate::model::{Amount, LedgerTransaction};
use chrono::{DateTime, Datelike, Months, Utc};
use std::num::NonZeroU32;

const MONTHS_ES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Nom espagnol du mois d'une date.
pub fn month_name_es<D: Datelike>(date: &D) -> &'static str {
    MONTHS_ES[date.month0() as usize]
}

/// Génère `count` cargos espacés de `interval_months`, sans les persister.
///
/// Chaque date est calculée depuis `start` (pas d'accumulation) ; un 31
/// retombe sur le dernier jour des mois plus courts. `count == 0` donne une
/// séquence vide. La génération s'arrête à la première échéance qui dépasse
/// la date maximale de chrono : le résultat compte alors moins de `count`
/// cargos.
pub fn expand_recurring_charge(
    start: DateTime<Utc>,
    interval_months: NonZeroU32,
    concept: &str,
    amount: Amount,
    count: u32,
) -> Vec<LedgerTransaction> {
    (0..count)
        .map_while(|k| {
            let offset = k.checked_mul(interval_months.get())?;
            start.checked_add_months(Months::new(offset))
        })
        .map(|date| {
            let label = format!("{concept} - {} {}", month_name_es(&date), date.year());
            LedgerTransaction::charge(label, amount, date)
        })
        .collect()
}
