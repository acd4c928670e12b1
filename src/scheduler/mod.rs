mod conflicts;
mod coverage;
mod mutate;
mod types;
mod util;

pub use conflicts::{detect_double_bookings, find_conflicts};
pub use types::{Attribution, ConflictReport, DoubleBooking};

use crate::model::{DateRange, Guard, GuardId, PlannedShift, Roster, Site, SlotKey};

/// Scheduler : encapsule le roster des gardes en cours d'édition
#[derive(Debug, Default)]
pub struct Scheduler {
    roster: Roster,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            roster: Roster::default(),
        }
    }

    pub fn with_roster(roster: Roster) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }
    pub fn into_roster(self) -> Roster {
        self.roster
    }

    pub fn add_sites(&mut self, sites: Vec<Site>) {
        self.roster.sites.extend(sites);
    }

    pub fn add_guards(&mut self, guards: Vec<Guard>) {
        self.roster.guards.extend(guards);
    }

    pub fn find_conflicts(&self, candidate: &SlotKey) -> ConflictReport {
        conflicts::find_conflicts(candidate, &self.roster.shifts, &self.roster.sites)
    }

    pub fn detect_double_bookings(&self) -> Vec<DoubleBooking> {
        conflicts::detect_double_bookings(&self.roster.shifts)
    }

    pub fn assign(&mut self, key: &SlotKey, guard: &GuardId) {
        mutate::assign(self, key, guard)
    }

    pub fn clear(&mut self, key: &SlotKey) {
        mutate::clear(self, key)
    }

    /// Retire l'enregistrement du poste ; `false` s'il n'existait pas.
    pub fn remove_slot(&mut self, key: &SlotKey) -> bool {
        mutate::remove_slot(self, key)
    }

    pub fn vacancies(&self, range: &DateRange) -> Vec<SlotKey> {
        coverage::vacancies(&self.roster.shifts, &self.roster.sites, range)
    }

    pub fn guard_schedule(&self, guard: &GuardId, range: &DateRange) -> Vec<PlannedShift> {
        coverage::guard_schedule(&self.roster.shifts, guard, range)
    }
}
