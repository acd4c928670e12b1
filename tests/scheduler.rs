#![forbid(unsafe_code)]
use chrono::NaiveDate;
use condo_ops::{
    model::{DateRange, Guard, Period, PlannedShift, Site, SiteId, SlotKey, ValidationError},
    scheduler::{find_conflicts, Scheduler},
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn key(site: &str, date: NaiveDate, period: Period, slot: u16) -> SlotKey {
    SlotKey::new(SiteId::new(site), date, period, slot).unwrap()
}

fn scheduler_with_sites() -> (Scheduler, Guard, Guard) {
    let mut s = Scheduler::new();
    s.add_sites(vec![
        Site::new(SiteId::new("A"), "Torres del Parque"),
        Site::new(SiteId::new("B"), "Condominio Los Pinos"),
    ]);
    let g1 = Guard::new("g1", "Guardia Uno");
    let g2 = Guard::new("g2", "Guardia Dos");
    s.add_guards(vec![g1.clone(), g2.clone()]);
    (s, g1, g2)
}

#[test]
fn guard_committed_elsewhere_is_unavailable() {
    let (mut s, g1, _) = scheduler_with_sites();
    let jan1 = day(2025, 1, 1);
    s.assign(&key("A", jan1, Period::Day, 1), &g1.id);

    let report = s.find_conflicts(&key("B", jan1, Period::Day, 1));
    assert!(report.is_unavailable(&g1.id));
    assert_eq!(report.site_name(&g1.id), Some("Torres del Parque"));
    assert_eq!(report.attribution(&g1.id).unwrap().site, SiteId::new("A"));
}

#[test]
fn own_slot_is_not_a_conflict() {
    let (mut s, g1, _) = scheduler_with_sites();
    let candidate = key("A", day(2025, 1, 1), Period::Day, 1);
    s.assign(&candidate, &g1.id);

    let report = s.find_conflicts(&candidate);
    assert!(report.is_empty());
}

#[test]
fn other_slot_on_same_site_is_a_conflict() {
    let (mut s, g1, _) = scheduler_with_sites();
    let jan1 = day(2025, 1, 1);
    s.assign(&key("A", jan1, Period::Night, 1), &g1.id);

    let report = s.find_conflicts(&key("A", jan1, Period::Night, 2));
    assert!(report.is_unavailable(&g1.id));
}

#[test]
fn other_period_or_date_does_not_conflict() {
    let (mut s, g1, _) = scheduler_with_sites();
    let jan1 = day(2025, 1, 1);
    s.assign(&key("A", jan1, Period::Day, 1), &g1.id);

    assert!(s.find_conflicts(&key("B", jan1, Period::Night, 1)).is_empty());
    assert!(s.find_conflicts(&key("B", day(2025, 1, 2), Period::Day, 1)).is_empty());
}

#[test]
fn vacant_slots_are_ignored() {
    let (mut s, g1, _) = scheduler_with_sites();
    let jan1 = day(2025, 1, 1);
    let a1 = key("A", jan1, Period::Day, 1);
    s.assign(&a1, &g1.id);
    s.clear(&a1);

    assert!(s.find_conflicts(&key("B", jan1, Period::Day, 1)).is_empty());
}

#[test]
fn first_site_found_wins_attribution() {
    let jan1 = day(2025, 1, 1);
    let g = Guard::new("g", "G");
    let shifts = vec![
        PlannedShift::new(key("B", jan1, Period::Day, 1), Some(g.id.clone())),
        PlannedShift::new(key("A", jan1, Period::Day, 1), Some(g.id.clone())),
    ];
    let report = find_conflicts(&key("C", jan1, Period::Day, 1), &shifts, &[]);

    assert_eq!(report.len(), 1);
    // site inconnu : l'identifiant sert de nom
    assert_eq!(report.site_name(&g.id), Some("B"));
}

#[test]
fn assign_is_idempotent_and_clear_tolerates_missing_slots() {
    let (mut s, g1, g2) = scheduler_with_sites();
    let slot = key("A", day(2025, 3, 10), Period::Day, 1);

    s.assign(&slot, &g1.id);
    s.assign(&slot, &g1.id);
    assert_eq!(s.roster().shifts.len(), 1);

    s.assign(&slot, &g2.id);
    assert_eq!(s.roster().shifts.len(), 1);
    assert_eq!(s.roster().find_shift(&slot).unwrap().guard, Some(g2.id.clone()));

    s.clear(&slot);
    s.clear(&slot);
    assert_eq!(s.roster().find_shift(&slot).unwrap().guard, None);

    let missing = key("B", day(2025, 3, 10), Period::Night, 1);
    s.clear(&missing);
    assert!(s.roster().find_shift(&missing).is_none());
}

#[test]
fn remove_slot_deletes_the_record() {
    let (mut s, g1, _) = scheduler_with_sites();
    let slot = key("A", day(2025, 3, 10), Period::Day, 1);
    s.assign(&slot, &g1.id);

    assert!(s.remove_slot(&slot));
    assert!(!s.remove_slot(&slot));
    assert!(s.roster().shifts.is_empty());
}

#[test]
fn audit_reports_every_slot_of_a_double_booking() {
    let (mut s, g1, g2) = scheduler_with_sites();
    let jan1 = day(2025, 1, 1);
    s.assign(&key("A", jan1, Period::Day, 1), &g1.id);
    s.assign(&key("B", jan1, Period::Day, 1), &g1.id);
    s.assign(&key("B", jan1, Period::Night, 1), &g1.id);
    s.assign(&key("A", jan1, Period::Night, 1), &g2.id);

    let bookings = s.detect_double_bookings();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].guard, g1.id);
    assert_eq!(
        bookings[0].slots,
        vec![key("A", jan1, Period::Day, 1), key("B", jan1, Period::Day, 1)]
    );
}

#[test]
fn vacancies_follow_required_guards_per_period() {
    let mut s = Scheduler::new();
    let lobby = Site::staffed(SiteId::new("A"), "Torres del Parque", 2).unwrap();
    s.add_sites(vec![lobby]);
    let g = Guard::new("g", "G");
    let jan1 = day(2025, 1, 1);
    s.assign(&key("A", jan1, Period::Day, 1), &g.id);

    let open = s.vacancies(&DateRange::new(jan1, day(2025, 1, 2)).unwrap());
    assert_eq!(open.len(), 7);
    assert_eq!(open[0], key("A", jan1, Period::Day, 2));
    assert_eq!(open[1], key("A", jan1, Period::Night, 1));
}

#[test]
fn guard_schedule_is_sorted_and_bounded() {
    let (mut s, g1, _) = scheduler_with_sites();
    s.assign(&key("B", day(2025, 1, 3), Period::Night, 1), &g1.id);
    s.assign(&key("A", day(2025, 1, 1), Period::Night, 1), &g1.id);
    s.assign(&key("A", day(2025, 1, 1), Period::Day, 1), &g1.id);
    s.assign(&key("A", day(2025, 1, 9), Period::Day, 1), &g1.id);

    let range = DateRange::new(day(2025, 1, 1), day(2025, 1, 5)).unwrap();
    let plan = s.guard_schedule(&g1.id, &range);
    let seen: Vec<(NaiveDate, Period)> = plan.iter().map(|p| (p.date, p.period)).collect();
    assert_eq!(
        seen,
        vec![
            (day(2025, 1, 1), Period::Day),
            (day(2025, 1, 1), Period::Night),
            (day(2025, 1, 3), Period::Night),
        ]
    );
}

#[test]
fn slot_zero_and_unknown_period_are_rejected() {
    assert_eq!(
        SlotKey::new(SiteId::new("A"), day(2025, 1, 1), Period::Day, 0),
        Err(ValidationError::ZeroSlot)
    );
    assert_eq!("Nocturno".parse::<Period>(), Ok(Period::Night));
    assert_eq!("diurno".parse::<Period>(), Ok(Period::Day));
    assert!(matches!(
        "tarde".parse::<Period>(),
        Err(ValidationError::UnknownPeriod(_))
    ));
    assert!(DateRange::new(day(2025, 1, 2), day(2025, 1, 1)).is_err());
    assert_eq!(
        Site::staffed(SiteId::new("A"), "Torres", 0),
        Err(ValidationError::ZeroGuardsPerPeriod)
    );
    assert_eq!(Site::staffed(SiteId::new("A"), "Torres", 3).unwrap().guards_per_period, 3);
}
