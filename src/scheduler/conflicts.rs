use super::{Conflict, ConflictKind};
use crate::model::{Schedule, StaffMember, Station};

/// Contrôle un planning (généré ou retouché à la main) contre le roster et
/// le plan de postes courants.
pub fn check_schedule(
    schedule: &Schedule,
    staff: &[StaffMember],
    stations: &[Station],
) -> Vec<Conflict> {
    let mut out = Vec::new();

    for slot in &schedule.slots {
        let conflict = |station: &str, name: Option<&String>, kind| Conflict {
            slot: slot.slot.clone(),
            station: station.to_string(),
            staff: name.cloned(),
            kind,
        };

        let mut seen: Vec<(&str, &str)> = Vec::new();
        for assignment in &slot.stations {
            let Some(station) = stations.iter().find(|s| s.name == assignment.station) else {
                out.push(conflict(&assignment.station, None, ConflictKind::UnknownStation));
                continue;
            };
            if assignment.staff.len() > station.required_staff as usize {
                out.push(conflict(&station.name, None, ConflictKind::OverCapacity));
            }

            for (idx, name) in assignment.staff.iter().enumerate() {
                if assignment.staff[..idx].contains(name) {
                    out.push(conflict(&station.name, Some(name), ConflictKind::DuplicateSeat));
                    continue;
                }
                if let Some((_, first)) = seen.iter().find(|(n, _)| *n == name.as_str()) {
                    if *first != station.name {
                        out.push(conflict(&station.name, Some(name), ConflictKind::DoubleBooking));
                    }
                } else {
                    seen.push((name.as_str(), station.name.as_str()));
                }

                match staff.iter().find(|m| &m.name == name) {
                    None => out.push(conflict(&station.name, Some(name), ConflictKind::UnknownStaff)),
                    Some(member) if !member.is_qualified_for(&station.name) => {
                        out.push(conflict(&station.name, Some(name), ConflictKind::Unqualified))
                    }
                    Some(_) => {}
                }
            }
        }
    }

    out
}
