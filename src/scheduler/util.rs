use crate::model::{Period, PlannedShift, Site, SiteId, SlotKey};
use chrono::NaiveDate;

pub(super) fn same_turn(shift: &PlannedShift, date: NaiveDate, period: Period) -> bool {
    shift.date == date && shift.period == period
}

pub(super) fn find_shift_index(shifts: &[PlannedShift], key: &SlotKey) -> Option<usize> {
    shifts.iter().position(|s| s.has_key(key))
}

/// Nom affichable d'une résidence ; l'identifiant sert de repli.
pub(super) fn site_name(sites: &[Site], id: &SiteId) -> String {
    sites
        .iter()
        .find(|s| &s.id == id)
        .map_or_else(|| id.as_str().to_string(), |s| s.name.clone())
}
