use super::{Plan, SlotFill, State};

/// Place les membres restés libres sur le premier poste incomplet pour lequel
/// ils sont qualifiés (ordre du plan). Sans limite de série : cette passe ne
/// sert qu'à réduire le sous-effectif. Les autres restent au repos.
pub(super) fn redistribute(plan: &Plan<'_>, state: &mut State, fill: &mut SlotFill, slot: usize) {
    let leftovers = fill.pool.clone();
    for staff in leftovers {
        let open = plan
            .order
            .iter()
            .copied()
            .find(|&station| {
                plan.qualified(staff, station) && fill.seats[station].len() < plan.required(station)
            });
        if let Some(station) = open {
            #[cfg(feature = "logging")]
            tracing::debug!(
                staff = %plan.staff[staff].name,
                station = %plan.stations[station].name,
                "leftover redistributed"
            );
            fill.take(staff, station);
            state.record(staff, station, slot);
        }
    }
}
