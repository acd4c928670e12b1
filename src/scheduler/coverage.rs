use crate::model::{DateRange, GuardId, Period, PlannedShift, Site, SlotKey};

/// Postes requis sans agent sur l'intervalle.
///
/// Ordre : date, ordre d'enregistrement des résidences, turno (jour puis nuit), slot.
pub(super) fn vacancies(shifts: &[PlannedShift], sites: &[Site], range: &DateRange) -> Vec<SlotKey> {
    let mut out = Vec::new();

    for date in range.days() {
        for site in sites {
            for period in Period::ALL {
                for slot in 1..=site.guards_per_period {
                    let staffed = shifts.iter().any(|s| {
                        s.site == site.id
                            && s.date == date
                            && s.period == period
                            && s.slot == slot
                            && s.guard.is_some()
                    });
                    if !staffed {
                        out.push(SlotKey {
                            site: site.id.clone(),
                            date,
                            period,
                            slot,
                        });
                    }
                }
            }
        }
    }

    out
}

pub(super) fn guard_schedule(shifts: &[PlannedShift], guard: &GuardId, range: &DateRange) -> Vec<PlannedShift> {
    let mut mine: Vec<PlannedShift> = shifts
        .iter()
        .filter(|s| s.guard.as_ref() == Some(guard) && range.contains(s.date))
        .cloned()
        .collect();
    mine.sort_by_key(|s| (s.date, s.period));
    mine
}
