use crate::model::{Roster, Schedule, StaffMember, Station};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import du staff depuis CSV: header `name,stations` (postes séparés par `;`)
pub fn import_staff_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<StaffMember>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let stations = rec.get(1).context("missing stations")?;
        if name.is_empty() {
            bail!("invalid staff row (empty name)");
        }
        let stations: Vec<&str> = stations
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if stations.is_empty() {
            bail!("staff member {name} has no station");
        }
        out.push(StaffMember::new(name, stations));
    }
    Ok(out)
}

/// Import des postes: header `name,required_staff`
pub fn import_stations_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Station>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let required = rec.get(1).context("missing required_staff")?.trim();
        if name.is_empty() {
            bail!("invalid station row (empty name)");
        }
        let required: u32 = required
            .parse()
            .with_context(|| format!("invalid required_staff for station {name}"))?;
        let station = Station::new(name, required)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("station {name}"))?;
        out.push(station);
    }
    Ok(out)
}

/// Ajoute staff et postes importés au roster en appliquant ses règles
/// (noms uniques, effectif >= 1).
pub fn merge_into_roster(
    roster: &mut Roster,
    staff: Vec<StaffMember>,
    stations: Vec<Station>,
) -> anyhow::Result<()> {
    for station in stations {
        roster.add_station(station.name, station.required_staff)?;
    }
    for member in staff {
        roster.add_staff(member.name, member.qualified_stations)?;
    }
    Ok(())
}

/// Export JSON (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du planning: header `slot,station,seat,staff`, une ligne par place tenue
pub fn export_schedule_csv<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["slot", "station", "seat", "staff"])?;
    for slot in &schedule.slots {
        for assignment in &slot.stations {
            for (seat, name) in assignment.staff.iter().enumerate() {
                let seat = (seat + 1).to_string();
                w.write_record([
                    slot.slot.as_str(),
                    assignment.station.as_str(),
                    seat.as_str(),
                    name.as_str(),
                ])?;
            }
        }
    }
    w.flush()?;
    Ok(())
}

/// Tableau texte : une ligne par créneau, une colonne par poste.
pub fn render_schedule_table(schedule: &Schedule) -> String {
    let Some(first) = schedule.slots.first() else {
        return String::new();
    };

    let columns: Vec<&str> = first.stations.iter().map(|a| a.station.as_str()).collect();

    let mut header = vec!["Time".to_string()];
    header.extend(columns.iter().map(|c| c.to_string()));

    let mut rows = vec![header];
    for slot in &schedule.slots {
        let mut row = vec![slot.slot.clone()];
        for column in &columns {
            let cell = slot
                .station(column)
                .filter(|a| !a.staff.is_empty())
                .map(|a| a.staff.join(", "))
                .unwrap_or_else(|| "-".to_string());
            row.push(cell);
        }
        rows.push(row);
    }

    let widths: Vec<usize> = (0..rows[0].len())
        .map(|col| {
            rows.iter()
                .map(|r| r[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join(" | ").trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SlotAssignment, StationAssignment};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_tmp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn staff_csv_splits_stations() {
        let file = write_tmp("name,stations\nAlice,Bar;Door\nBob, Bar ;\n");
        let staff = import_staff_csv(file.path()).unwrap();
        assert_eq!(staff.len(), 2);
        assert_eq!(staff[0].qualified_stations, vec!["Bar", "Door"]);
        assert_eq!(staff[1].name, "Bob");
        assert_eq!(staff[1].qualified_stations, vec!["Bar"]);
    }

    #[test]
    fn staff_without_station_is_rejected() {
        let file = write_tmp("name,stations\nAlice,\n");
        assert!(import_staff_csv(file.path()).is_err());
    }

    #[test]
    fn stations_csv_validates_requirement() {
        let file = write_tmp("name,required_staff\nBar,3\nDoor,1\n");
        let stations = import_stations_csv(file.path()).unwrap();
        assert_eq!(stations[0].name, "Bar");
        assert_eq!(stations[0].required_staff, 3);

        let file = write_tmp("name,required_staff\nBar,0\n");
        assert!(import_stations_csv(file.path()).is_err());
        let file = write_tmp("name,required_staff\nBar,lots\n");
        assert!(import_stations_csv(file.path()).is_err());
    }

    #[test]
    fn csv_export_has_one_row_per_seat() {
        let schedule = Schedule {
            slots: vec![SlotAssignment {
                slot: "18:00".into(),
                stations: vec![
                    StationAssignment {
                        station: "Bar".into(),
                        staff: vec!["Alice".into(), "Bob".into()],
                    },
                    StationAssignment {
                        station: "Door".into(),
                        staff: vec![],
                    },
                ],
            }],
        };
        let file = NamedTempFile::new().unwrap();
        export_schedule_csv(file.path(), &schedule).unwrap();
        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            content,
            "slot,station,seat,staff\n18:00,Bar,1,Alice\n18:00,Bar,2,Bob\n"
        );
    }

    #[test]
    fn empty_schedule_renders_nothing() {
        assert_eq!(render_schedule_table(&Schedule::default()), "");
    }
}
