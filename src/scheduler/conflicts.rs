use super::{util, Attribution, ConflictReport, DoubleBooking};
use crate::model::{GuardId, Period, PlannedShift, Site, SlotKey};
use chrono::NaiveDate;
use std::collections::HashMap;

type Turn = (NaiveDate, Period, GuardId);

/// Agents déjà engagés ailleurs pour le même jour et le même turno que `candidate`.
///
/// Le poste candidat lui-même est ignoré : réaffecter un agent à son propre
/// poste n'est pas un conflit. Fonction pure, ne bloque rien.
pub fn find_conflicts(candidate: &SlotKey, shifts: &[PlannedShift], sites: &[Site]) -> ConflictReport {
    let mut report = ConflictReport::default();

    let committed = shifts
        .iter()
        .filter(|s| util::same_turn(s, candidate.date, candidate.period))
        .filter(|s| !(s.site == candidate.site && s.slot == candidate.slot));

    for shift in committed {
        let Some(guard) = shift.guard.as_ref() else {
            continue;
        };
        report.record(
            guard.clone(),
            Attribution {
                site: shift.site.clone(),
                site_name: util::site_name(sites, &shift.site),
            },
        );
    }

    report
}

/// Audit du roster : regroupe les postes qui partagent (date, turno, agent).
pub fn detect_double_bookings(shifts: &[PlannedShift]) -> Vec<DoubleBooking> {
    let mut order: Vec<Turn> = Vec::new();
    let mut groups: HashMap<Turn, Vec<SlotKey>> = HashMap::new();

    for shift in shifts {
        let Some(guard) = shift.guard.as_ref() else {
            continue;
        };
        let turn = (shift.date, shift.period, guard.clone());
        let slots = groups.entry(turn.clone()).or_default();
        if slots.is_empty() {
            order.push(turn);
        }
        slots.push(shift.key());
    }

    order
        .into_iter()
        .filter_map(|turn| {
            let slots = groups.remove(&turn)?;
            (slots.len() > 1).then(|| DoubleBooking { guard: turn.2, slots })
        })
        .collect()
}
