use crate::scheduler::{self, GenerateOptions, Generation, SchedError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Identifiant fort pour StaffMember
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffId(String);

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Station
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StationId(String);

impl StationId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Membre du staff et postes sur lesquels il est qualifié.
///
/// `name` sert de clé d'affichage : il est traité comme unique pendant une génération.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    /// Noms de postes, dans l'ordre de saisie, sans doublon.
    pub qualified_stations: Vec<String>,
}

impl StaffMember {
    pub fn new<N, I, S>(name: N, stations: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut qualified_stations: Vec<String> = Vec::new();
        for station in stations {
            let station: String = station.into();
            if !qualified_stations.contains(&station) {
                qualified_stations.push(station);
            }
        }
        Self {
            id: StaffId::random(),
            name: name.into(),
            qualified_stations,
        }
    }

    pub fn is_qualified_for(&self, station: &str) -> bool {
        self.qualified_stations.iter().any(|s| s == station)
    }
}

/// Poste de travail et effectif requis par créneau (>= 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub required_staff: u32,
}

impl Station {
    /// Crée un poste en validant `required_staff >= 1`.
    pub fn new<N: Into<String>>(name: N, required_staff: u32) -> Result<Self, String> {
        if required_staff == 0 {
            return Err("required_staff must be at least 1".to_string());
        }
        Ok(Self {
            id: StationId::random(),
            name: name.into(),
            required_staff,
        })
    }
}

/// Affectations d'un poste sur un créneau, dans l'ordre des places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationAssignment {
    pub station: String,
    pub staff: Vec<String>,
}

/// Affectations de tous les postes pour un créneau.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub slot: String,
    pub stations: Vec<StationAssignment>,
}

impl SlotAssignment {
    pub fn station(&self, station: &str) -> Option<&StationAssignment> {
        self.stations.iter().find(|s| s.station == station)
    }
}

/// Planning : créneau -> poste -> noms affectés.
///
/// Les créneaux gardent l'ordre d'entrée, les postes l'ordre du plan de postes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schedule {
    pub slots: Vec<SlotAssignment>,
}

impl Schedule {
    pub fn slot(&self, slot: &str) -> Option<&SlotAssignment> {
        self.slots.iter().find(|s| s.slot == slot)
    }

    /// Noms affectés à `station` pendant `slot`.
    pub fn assigned(&self, slot: &str, station: &str) -> Option<&[String]> {
        self.slot(slot)
            .and_then(|s| s.station(station))
            .map(|a| a.staff.as_slice())
    }

    /// Poste tenu par `name` pendant `slot`, s'il y en a un.
    pub fn station_of(&self, slot: &str, name: &str) -> Option<&str> {
        self.slot(slot)?
            .stations
            .iter()
            .find(|a| a.staff.iter().any(|n| n == name))
            .map(|a| a.station.as_str())
    }

    /// Nombre de places tenues par personne, dans l'ordre de première apparition.
    pub fn assignment_totals(&self) -> Vec<(String, usize)> {
        let mut totals: Vec<(String, usize)> = Vec::new();
        for name in self
            .slots
            .iter()
            .flat_map(|s| s.stations.iter())
            .flat_map(|a| a.staff.iter())
        {
            match totals.iter_mut().find(|(n, _)| n == name) {
                Some((_, count)) => *count += 1,
                None => totals.push((name.clone(), 1)),
            }
        }
        totals
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RosterError {
    #[error("name cannot be empty")]
    EmptyName,
    #[error("staff member {0} must be qualified for at least one station")]
    NoQualification(String),
    #[error("staff member already exists: {0}")]
    DuplicateStaff(String),
    #[error("station already exists: {0}")]
    DuplicateStation(String),
    #[error("station {0}: required staff must be at least 1")]
    InvalidRequirement(String),
    #[error("unknown staff member: {0}")]
    UnknownStaff(String),
    #[error("unknown station: {0}")]
    UnknownStation(String),
}

/// Roster complet : staff, postes et dernier planning généré.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    pub staff: Vec<StaffMember>,
    pub stations: Vec<Station>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Generation>,
}

impl Roster {
    pub fn find_staff<'a>(&'a self, name: &str) -> Option<&'a StaffMember> {
        self.staff.iter().find(|m| m.name == name)
    }
    pub fn find_staff_by_id<'a>(&'a self, id: &StaffId) -> Option<&'a StaffMember> {
        self.staff.iter().find(|m| &m.id == id)
    }
    pub fn find_station<'a>(&'a self, name: &str) -> Option<&'a Station> {
        self.stations.iter().find(|s| s.name == name)
    }

    /// Ajoute un membre. Les postes inconnus sont acceptés : ils seront ignorés à la génération.
    pub fn add_staff<N, I, S>(&mut self, name: N, stations: I) -> Result<StaffId, RosterError>
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name: String = name.into();
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if self.find_staff(&name).is_some() {
            return Err(RosterError::DuplicateStaff(name));
        }
        let member = StaffMember::new(
            name.clone(),
            stations
                .into_iter()
                .map(|s| Into::<String>::into(s).trim().to_string())
                .filter(|s| !s.is_empty()),
        );
        if member.qualified_stations.is_empty() {
            return Err(RosterError::NoQualification(name));
        }
        let id = member.id.clone();
        self.staff.push(member);
        Ok(id)
    }

    pub fn add_station<N: Into<String>>(
        &mut self,
        name: N,
        required_staff: u32,
    ) -> Result<StationId, RosterError> {
        let name: String = name.into();
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if self.find_station(&name).is_some() {
            return Err(RosterError::DuplicateStation(name));
        }
        let station = Station::new(name.clone(), required_staff)
            .map_err(|_| RosterError::InvalidRequirement(name))?;
        let id = station.id.clone();
        self.stations.push(station);
        Ok(id)
    }

    /// Supprime un membre et invalide le planning courant.
    pub fn remove_staff(&mut self, name: &str) -> Result<StaffMember, RosterError> {
        let pos = self
            .staff
            .iter()
            .position(|m| m.name == name)
            .ok_or_else(|| RosterError::UnknownStaff(name.to_string()))?;
        self.schedule = None;
        Ok(self.staff.remove(pos))
    }

    /// Supprime un poste (et les qualifications associées) puis invalide le planning courant.
    pub fn remove_station(&mut self, name: &str) -> Result<Station, RosterError> {
        let pos = self
            .stations
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| RosterError::UnknownStation(name.to_string()))?;
        for member in &mut self.staff {
            member.qualified_stations.retain(|s| s != name);
        }
        self.schedule = None;
        Ok(self.stations.remove(pos))
    }

    /// Nombre total de places à pourvoir par créneau.
    pub fn seat_demand(&self) -> u32 {
        self.stations.iter().map(|s| s.required_staff).sum()
    }

    /// Génère un planning à partir de l'état courant et le conserve (le dernier gagne).
    pub fn generate<S: AsRef<str>>(
        &mut self,
        slots: &[S],
        opts: GenerateOptions,
    ) -> Result<&Generation, SchedError> {
        let generation = scheduler::generate(&self.staff, &self.stations, slots, opts)?;
        Ok(self.schedule.insert(generation))
    }
}
