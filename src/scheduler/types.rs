use crate::model::{GuardId, SiteId, SlotKey};
use std::collections::BTreeMap;

/// Résidence à laquelle un agent indisponible est déjà affecté.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    pub site: SiteId,
    pub site_name: String,
}

/// Résultat de `find_conflicts` pour un poste candidat.
///
/// Un agent n'apparaît qu'une fois : si plusieurs postes le retiennent déjà,
/// seul le premier rencontré dans le roster lui est attribué.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictReport {
    attributions: BTreeMap<GuardId, Attribution>,
}

impl ConflictReport {
    pub(super) fn record(&mut self, guard: GuardId, attribution: Attribution) {
        self.attributions.entry(guard).or_insert(attribution);
    }

    pub fn is_empty(&self) -> bool {
        self.attributions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attributions.len()
    }

    pub fn is_unavailable(&self, guard: &GuardId) -> bool {
        self.attributions.contains_key(guard)
    }

    /// Agents indisponibles, triés par identifiant.
    pub fn unavailable(&self) -> impl Iterator<Item = &GuardId> {
        self.attributions.keys()
    }

    pub fn attribution(&self, guard: &GuardId) -> Option<&Attribution> {
        self.attributions.get(guard)
    }

    pub fn site_name(&self, guard: &GuardId) -> Option<&str> {
        self.attributions.get(guard).map(|a| a.site_name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GuardId, &Attribution)> {
        self.attributions.iter()
    }
}

/// Agent présent sur plusieurs postes pour un même jour et turno.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubleBooking {
    pub guard: GuardId,
    pub slots: Vec<SlotKey>,
}
