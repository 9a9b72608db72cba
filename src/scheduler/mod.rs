//! Générateur de planning équitable.
//!
//! Passe gloutonne, créneau par créneau :
//! 1. postes triés par effectif requis décroissant (tri stable) ;
//! 2. chaque place est donnée au candidat qualifié le moins passé par ce poste,
//!    puis le moins affecté au total, puis le premier dans le roster ;
//! 3. les membres encore libres complètent les postes incomplets.
//!
//! Coût O(créneaux × postes × staff). Aucun état ne survit à l'appel.

mod assignment;
mod conflicts;
mod redistribute;
mod tracking;
mod types;

pub use conflicts::check_schedule;
pub use types::{Conflict, ConflictKind, GenerateOptions, Generation, SchedError, Warning};

use crate::model::{SlotAssignment, StaffMember, Station, StationAssignment};
use tracking::{AssignmentCounters, ConsecutiveTracker};

/// Génère le planning de `slots` pour `staff` sur `stations`.
///
/// Déterministe : mêmes entrées, dans le même ordre, même résultat.
/// Les entrées vides sont refusées (`SchedError`) ; le sous-effectif ne l'est
/// jamais et remonte dans `Generation::warnings`.
pub fn generate<S: AsRef<str>>(
    staff: &[StaffMember],
    stations: &[Station],
    slots: &[S],
    opts: GenerateOptions,
) -> Result<Generation, SchedError> {
    validate(staff, stations, slots, opts)?;

    let plan = Plan::new(staff, stations);
    let mut state = State::new(staff.len(), stations.len());
    let mut generation = Generation::default();

    for (slot, label) in slots.iter().enumerate() {
        let label = label.as_ref();
        #[cfg(feature = "logging")]
        tracing::debug!(slot = label, "filling slot");

        let mut fill = assignment::fill_slot(&plan, &mut state, slot, opts);
        if !fill.pool.is_empty() {
            redistribute::redistribute(&plan, &mut state, &mut fill, slot);
        }

        for &station in &plan.order {
            let required = plan.stations[station].required_staff;
            let filled = fill.seats[station].len() as u32;
            if filled < required {
                #[cfg(feature = "logging")]
                tracing::warn!(
                    slot = label,
                    station = %plan.stations[station].name,
                    seats_short = required - filled,
                    "not enough qualified staff"
                );
                generation.warnings.push(Warning {
                    slot: label.to_string(),
                    station: plan.stations[station].name.clone(),
                    seats_short: required - filled,
                });
            }
        }

        generation.schedule.slots.push(fill.into_slot(&plan, label));
    }

    Ok(generation)
}

fn validate<S: AsRef<str>>(
    staff: &[StaffMember],
    stations: &[Station],
    slots: &[S],
    opts: GenerateOptions,
) -> Result<(), SchedError> {
    if staff.is_empty() {
        return Err(SchedError::EmptyRoster);
    }
    if stations.is_empty() {
        return Err(SchedError::EmptyStations);
    }
    if slots.is_empty() {
        return Err(SchedError::EmptySlots);
    }
    if opts.max_consecutive == 0 {
        return Err(SchedError::InvalidOption("max_consecutive must be at least 1"));
    }
    for (idx, station) in stations.iter().enumerate() {
        if station.required_staff == 0 {
            return Err(SchedError::InvalidRequirement(station.name.clone()));
        }
        if stations[..idx].iter().any(|s| s.name == station.name) {
            return Err(SchedError::DuplicateStation(station.name.clone()));
        }
    }
    for (idx, member) in staff.iter().enumerate() {
        if staff[..idx].iter().any(|m| m.name == member.name) {
            return Err(SchedError::DuplicateStaff(member.name.clone()));
        }
    }
    for (idx, slot) in slots.iter().enumerate() {
        if slots[..idx].iter().any(|s| s.as_ref() == slot.as_ref()) {
            return Err(SchedError::DuplicateSlot(slot.as_ref().to_string()));
        }
    }
    Ok(())
}

/// Vue en lecture seule des entrées, indexée par position.
pub(super) struct Plan<'a> {
    pub(super) staff: &'a [StaffMember],
    pub(super) stations: &'a [Station],
    /// Ordre de remplissage : effectif requis décroissant, ordre d'entrée à égalité.
    pub(super) order: Vec<usize>,
    qualified: Vec<bool>,
}

impl<'a> Plan<'a> {
    fn new(staff: &'a [StaffMember], stations: &'a [Station]) -> Self {
        let mut order: Vec<usize> = (0..stations.len()).collect();
        order.sort_by(|&a, &b| stations[b].required_staff.cmp(&stations[a].required_staff));

        let qualified = staff
            .iter()
            .flat_map(|m| stations.iter().map(move |s| m.is_qualified_for(&s.name)))
            .collect();

        Self {
            staff,
            stations,
            order,
            qualified,
        }
    }

    pub(super) fn qualified(&self, staff: usize, station: usize) -> bool {
        self.qualified[staff * self.stations.len() + station]
    }

    pub(super) fn required(&self, station: usize) -> usize {
        self.stations[station].required_staff as usize
    }
}

/// Compteurs mutables pendant la génération.
pub(super) struct State {
    pub(super) counters: AssignmentCounters,
    pub(super) tracker: ConsecutiveTracker,
}

impl State {
    fn new(staff: usize, stations: usize) -> Self {
        Self {
            counters: AssignmentCounters::new(staff, stations),
            tracker: ConsecutiveTracker::new(staff),
        }
    }

    pub(super) fn record(&mut self, staff: usize, station: usize, slot: usize) {
        self.counters.increment(staff, station);
        self.tracker.record(staff, station, slot);
    }
}

/// Remplissage d'un créneau en cours.
#[derive(Debug)]
pub(super) struct SlotFill {
    /// Membres encore libres, dans l'ordre du roster.
    pub(super) pool: Vec<usize>,
    /// Membres affectés, par poste (indexé comme le plan de postes).
    pub(super) seats: Vec<Vec<usize>>,
}

impl SlotFill {
    pub(super) fn new(plan: &Plan<'_>) -> Self {
        Self {
            pool: (0..plan.staff.len()).collect(),
            seats: vec![Vec::new(); plan.stations.len()],
        }
    }

    pub(super) fn take(&mut self, staff: usize, station: usize) {
        self.pool.retain(|&s| s != staff);
        self.seats[station].push(staff);
    }

    fn into_slot(self, plan: &Plan<'_>, label: &str) -> SlotAssignment {
        SlotAssignment {
            slot: label.to_string(),
            stations: plan
                .stations
                .iter()
                .zip(self.seats)
                .map(|(station, seats)| StationAssignment {
                    station: station.name.clone(),
                    staff: seats
                        .into_iter()
                        .map(|s| plan.staff[s].name.clone())
                        .collect(),
                })
                .collect(),
        }
    }
}
