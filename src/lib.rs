#![forbid(unsafe_code)]
//! Planning-bar — génération de plannings de postes équitables (sans BD).
//!
//! - Stockage fichiers (JSON/CSV).
//! - Répartition gloutonne équilibrée, créneau par créneau.
//! - Sous-effectif signalé par des avertissements, jamais par une erreur.
//! - Préréglages de créneaux horaires (jeudi, vendredi, ou sur disque).

pub mod io;
pub mod model;
pub mod notice;
pub mod preset;
pub mod scheduler;
pub mod storage;

pub use model::{
    Roster, RosterError, Schedule, SlotAssignment, StaffId, StaffMember, Station,
    StationAssignment, StationId,
};
pub use notice::{prepare_notices, Notice, NoticeRenderer, TextNotice};
pub use preset::{builtin_presets, parse_slot_list, Preset, PresetInfo, PresetStore};
pub use scheduler::{
    check_schedule, generate, Conflict, ConflictKind, GenerateOptions, Generation, SchedError,
    Warning,
};
pub use storage::{JsonStorage, Storage};
