use super::{GenerateOptions, Plan, SlotFill, State};

/// Passe principale d'un créneau : postes dans l'ordre du plan, place par place.
pub(super) fn fill_slot(
    plan: &Plan<'_>,
    state: &mut State,
    slot: usize,
    opts: GenerateOptions,
) -> SlotFill {
    let mut fill = SlotFill::new(plan);

    for &station in &plan.order {
        while fill.seats[station].len() < plan.required(station) {
            let Some(chosen) = pick_candidate(plan, state, &fill.pool, station, slot, opts) else {
                break;
            };
            #[cfg(feature = "logging")]
            tracing::debug!(
                staff = %plan.staff[chosen].name,
                station = %plan.stations[station].name,
                "seat assigned"
            );
            fill.take(chosen, station);
            state.record(chosen, station, slot);
        }
    }

    fill
}

/// Choisit le meilleur candidat du pool pour une place de `station`.
///
/// Les membres déjà en série de `max_consecutive` créneaux sur ce poste ne
/// sont écartés que s'il reste quelqu'un d'autre. Départage, dans cet ordre :
/// passages sur ce poste, passages au total, position dans le roster.
pub(super) fn pick_candidate(
    plan: &Plan<'_>,
    state: &State,
    pool: &[usize],
    station: usize,
    slot: usize,
    opts: GenerateOptions,
) -> Option<usize> {
    let candidates: Vec<usize> = pool
        .iter()
        .copied()
        .filter(|&s| plan.qualified(s, station))
        .collect();

    let rested: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&s| state.tracker.streak_before(s, station, slot) < opts.max_consecutive)
        .collect();

    let eligible = if rested.is_empty() {
        &candidates
    } else {
        &rested
    };

    eligible
        .iter()
        .copied()
        .min_by_key(|&s| (state.counters.get(s, station), state.counters.total(s), s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StaffMember, Station};

    fn fixture() -> (Vec<StaffMember>, Vec<Station>) {
        let staff = vec![
            StaffMember::new("A", ["Bar", "Door"]),
            StaffMember::new("B", ["Bar"]),
            StaffMember::new("C", ["Bar", "Door"]),
        ];
        let stations = vec![
            Station::new("Bar", 1).unwrap(),
            Station::new("Door", 1).unwrap(),
        ];
        (staff, stations)
    }

    #[test]
    fn fresh_state_picks_first_listed() {
        let (staff, stations) = fixture();
        let plan = Plan::new(&staff, &stations);
        let state = State::new(3, 2);
        let pick = pick_candidate(&plan, &state, &[0, 1, 2], 0, 0, GenerateOptions::default());
        assert_eq!(pick, Some(0));
    }

    #[test]
    fn station_count_beats_total_count() {
        let (staff, stations) = fixture();
        let plan = Plan::new(&staff, &stations);
        let mut state = State::new(3, 2);
        // A : 1 Bar ; C : 2 Door (total plus élevé mais jamais au Bar)
        state.counters.increment(0, 0);
        state.counters.increment(2, 1);
        state.counters.increment(2, 1);
        let pick = pick_candidate(&plan, &state, &[0, 2], 0, 5, GenerateOptions::default());
        assert_eq!(pick, Some(2));
    }

    #[test]
    fn total_count_breaks_station_ties() {
        let (staff, stations) = fixture();
        let plan = Plan::new(&staff, &stations);
        let mut state = State::new(3, 2);
        state.counters.increment(0, 1);
        let pick = pick_candidate(&plan, &state, &[0, 1, 2], 0, 5, GenerateOptions::default());
        assert_eq!(pick, Some(1));
    }

    #[test]
    fn streak_cap_is_soft() {
        let (staff, stations) = fixture();
        let plan = Plan::new(&staff, &stations);
        let mut state = State::new(3, 2);
        state.record(1, 0, 0);
        state.record(1, 0, 1);

        // B a fait 2 créneaux de suite au Bar : A passe devant malgré l'égalité
        state.counters.increment(0, 0);
        state.counters.increment(0, 0);
        state.counters.increment(0, 0);
        let pick = pick_candidate(&plan, &state, &[0, 1], 0, 2, GenerateOptions::default());
        assert_eq!(pick, Some(0));

        // seul candidat restant : la série est ignorée
        let pick = pick_candidate(&plan, &state, &[1], 0, 2, GenerateOptions::default());
        assert_eq!(pick, Some(1));
    }

    #[test]
    fn unqualified_pool_yields_nothing() {
        let (staff, stations) = fixture();
        let plan = Plan::new(&staff, &stations);
        let state = State::new(3, 2);
        let pick = pick_candidate(&plan, &state, &[1], 1, 0, GenerateOptions::default());
        assert_eq!(pick, None);
    }

    #[test]
    fn fill_slot_never_reuses_a_member() {
        let (staff, stations) = fixture();
        let plan = Plan::new(&staff, &stations);
        let mut state = State::new(3, 2);
        let fill = fill_slot(&plan, &mut state, 0, GenerateOptions::default());
        assert_eq!(fill.seats, vec![vec![0], vec![2]]);
        assert_eq!(fill.pool, vec![1]);
        assert_eq!(state.counters.total(0), 1);
        assert_eq!(state.counters.total(2), 1);
    }
}
