//! État dérivé, propre à un appel de génération.

/// Compteur d'affectations par (membre, poste), indexé par position dans
/// le roster et dans le plan de postes.
#[derive(Debug, Clone)]
pub(super) struct AssignmentCounters {
    stations: usize,
    counts: Vec<u32>,
    totals: Vec<u32>,
}

impl AssignmentCounters {
    pub(super) fn new(staff: usize, stations: usize) -> Self {
        Self {
            stations,
            counts: vec![0; staff * stations],
            totals: vec![0; staff],
        }
    }

    pub(super) fn get(&self, staff: usize, station: usize) -> u32 {
        self.counts[staff * self.stations + station]
    }

    /// Somme des affectations du membre, tous postes confondus.
    pub(super) fn total(&self, staff: usize) -> u32 {
        self.totals[staff]
    }

    pub(super) fn increment(&mut self, staff: usize, station: usize) {
        self.counts[staff * self.stations + station] += 1;
        self.totals[staff] += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Streak {
    station: usize,
    slot: usize,
    len: u32,
}

/// Dernier poste tenu par chaque membre et longueur de la série en cours.
///
/// Une série n'est prolongée que si le membre a travaillé le créneau
/// immédiatement précédent ; un créneau sans affectation la remet à zéro.
#[derive(Debug, Clone)]
pub(super) struct ConsecutiveTracker {
    streaks: Vec<Option<Streak>>,
}

impl ConsecutiveTracker {
    pub(super) fn new(staff: usize) -> Self {
        Self {
            streaks: vec![None; staff],
        }
    }

    /// Longueur de la série de `staff` sur `station` juste avant `slot`.
    pub(super) fn streak_before(&self, staff: usize, station: usize, slot: usize) -> u32 {
        match self.streaks[staff] {
            Some(s) if s.station == station && s.slot + 1 == slot => s.len,
            _ => 0,
        }
    }

    pub(super) fn record(&mut self, staff: usize, station: usize, slot: usize) {
        let len = self.streak_before(staff, station, slot) + 1;
        self.streaks[staff] = Some(Streak { station, slot, len });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_track_station_and_total() {
        let mut counters = AssignmentCounters::new(2, 3);
        counters.increment(1, 2);
        counters.increment(1, 0);
        counters.increment(1, 2);
        assert_eq!(counters.get(1, 2), 2);
        assert_eq!(counters.get(1, 0), 1);
        assert_eq!(counters.get(0, 2), 0);
        assert_eq!(counters.total(1), 3);
        assert_eq!(counters.total(0), 0);
    }

    #[test]
    fn streak_grows_on_consecutive_slots_only() {
        let mut tracker = ConsecutiveTracker::new(1);
        tracker.record(0, 1, 0);
        tracker.record(0, 1, 1);
        assert_eq!(tracker.streak_before(0, 1, 2), 2);
        assert_eq!(tracker.streak_before(0, 0, 2), 0);

        // créneau 2 non travaillé : la série est rompue
        assert_eq!(tracker.streak_before(0, 1, 3), 0);
        tracker.record(0, 1, 3);
        assert_eq!(tracker.streak_before(0, 1, 4), 1);
    }

    #[test]
    fn changing_station_resets_streak() {
        let mut tracker = ConsecutiveTracker::new(1);
        tracker.record(0, 0, 0);
        tracker.record(0, 0, 1);
        tracker.record(0, 1, 2);
        assert_eq!(tracker.streak_before(0, 1, 3), 1);
        assert_eq!(tracker.streak_before(0, 0, 3), 0);
    }
}
