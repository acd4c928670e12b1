use super::{util, Scheduler};
use crate::model::{GuardId, PlannedShift, SlotKey};
use tracing::debug;

/// Place `guard` sur le poste `key`, en créant l'enregistrement au besoin.
/// Idempotent. Aucun contrôle de conflit : voir `find_conflicts`.
pub(super) fn assign(scheduler: &mut Scheduler, key: &SlotKey, guard: &GuardId) {
    match util::find_shift_index(&scheduler.roster.shifts, key) {
        Some(pos) => {
            let shift = &mut scheduler.roster.shifts[pos];
            if shift.guard.as_ref() != Some(guard) {
                debug!(slot = %key, guard = guard.as_str(), "reassigning slot");
                shift.guard = Some(guard.clone());
            }
        }
        None => {
            debug!(slot = %key, guard = guard.as_str(), "creating slot");
            scheduler
                .roster
                .shifts
                .push(PlannedShift::new(key.clone(), Some(guard.clone())));
        }
    }
}

/// Libère le poste. Sans effet si le poste est absent ou déjà vacant.
pub(super) fn clear(scheduler: &mut Scheduler, key: &SlotKey) {
    if let Some(shift) = scheduler.roster.find_shift_mut(key) {
        if shift.guard.take().is_some() {
            debug!(slot = %key, "slot vacated");
        }
    }
}

/// Suppression physique de l'enregistrement du poste.
pub(super) fn remove_slot(scheduler: &mut Scheduler, key: &SlotKey) -> bool {
    let Some(pos) = util::find_shift_index(&scheduler.roster.shifts, key) else {
        return false;
    };
    scheduler.roster.shifts.remove(pos);
    debug!(slot = %key, "slot removed");
    true
}
