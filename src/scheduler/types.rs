use crate::model::Schedule;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options de génération
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Série de créneaux consécutifs sur un même poste à partir de laquelle
    /// un membre n'est plus prioritaire pour ce poste.
    pub max_consecutive: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self { max_consecutive: 2 }
    }
}

/// Sous-effectif : places restées vides pour un poste sur un créneau.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub slot: String,
    pub station: String,
    pub seats_short: u32,
}

/// Résultat d'une génération : planning + avertissements de sous-effectif.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Generation {
    pub schedule: Schedule,
    #[serde(default)]
    pub warnings: Vec<Warning>,
}

impl Generation {
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn warning_for(&self, slot: &str, station: &str) -> Option<&Warning> {
        self.warnings
            .iter()
            .find(|w| w.slot == slot && w.station == station)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    DoubleBooking,
    DuplicateSeat,
    Unqualified,
    OverCapacity,
    UnknownStaff,
    UnknownStation,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::DoubleBooking => "double",
            ConflictKind::DuplicateSeat => "duplicate",
            ConflictKind::Unqualified => "unqualified",
            ConflictKind::OverCapacity => "capacity",
            ConflictKind::UnknownStaff => "unknown-staff",
            ConflictKind::UnknownStation => "unknown-station",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub slot: String,
    pub station: String,
    pub staff: Option<String>,
    pub kind: ConflictKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("roster is empty: add staff members before generating")]
    EmptyRoster,
    #[error("station plan is empty: add stations before generating")]
    EmptyStations,
    #[error("no time slot to schedule")]
    EmptySlots,
    #[error("duplicate staff name: {0}")]
    DuplicateStaff(String),
    #[error("duplicate station name: {0}")]
    DuplicateStation(String),
    #[error("duplicate time slot: {0}")]
    DuplicateSlot(String),
    #[error("station {0}: required staff must be at least 1")]
    InvalidRequirement(String),
    #[error("invalid option: {0}")]
    InvalidOption(&'static str),
}
