use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_step_minutes() -> u16 {
    60
}

/// Préréglage de créneaux : une heure de début et un nombre de créneaux réguliers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: NaiveTime,
    pub hours: u8,
    #[serde(default = "default_step_minutes")]
    pub step_minutes: u16,
}

impl Preset {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            bail!("preset id cannot be empty");
        }
        if self.name.trim().is_empty() {
            bail!("preset name cannot be empty");
        }
        if self.hours == 0 {
            bail!("preset must contain at least one slot");
        }
        if self.step_minutes == 0 {
            bail!("step_minutes must be > 0");
        }
        if u32::from(self.hours) * u32::from(self.step_minutes) > 24 * 60 {
            bail!("preset {} spans more than 24 hours", self.id);
        }
        Ok(())
    }

    /// Libellés `HH:MM` des créneaux ; passe minuit si besoin.
    pub fn labels(&self) -> Vec<String> {
        let step = Duration::minutes(i64::from(self.step_minutes));
        let mut current = self.start_time;
        let mut out = Vec::with_capacity(usize::from(self.hours));
        for _ in 0..self.hours {
            out.push(current.format("%H:%M").to_string());
            // NaiveTime + Duration boucle sur 24 h
            current += step;
        }
        out
    }
}

/// Préréglages fournis : soirée du jeudi (17h-01h) et du vendredi (19h-03h).
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset {
            id: "thursday".into(),
            name: "Thursday Pub (17-01)".into(),
            description: None,
            start_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
            hours: 9,
            step_minutes: 60,
        },
        Preset {
            id: "friday".into(),
            name: "Friday/Tenta Pub (19-03)".into(),
            description: None,
            start_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap_or_default(),
            hours: 9,
            step_minutes: 60,
        },
    ]
}

#[derive(Debug, Clone)]
pub struct PresetInfo {
    pub preset: Preset,
    pub path: Option<PathBuf>,
    pub modified: Option<DateTime<Utc>>,
}

/// Préréglages persistés sur disque, un fichier JSON par id.
#[derive(Debug, Clone)]
pub struct PresetStore {
    base_dir: PathBuf,
}

impl PresetStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            base_dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.base_dir.join(format!("{id}.json"))
    }

    pub fn save(&self, preset: &Preset) -> Result<PathBuf> {
        preset.validate()?;
        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("creating preset directory {}", self.base_dir.display()))?;
        let path = self.path_for(&preset.id);
        let json = serde_json::to_string_pretty(preset)?;
        fs::write(&path, json).with_context(|| format!("writing preset {}", path.display()))?;
        Ok(path)
    }

    pub fn load(&self, id: &str) -> Result<Preset> {
        let path = self.path_for(id);
        let data = fs::read(&path).with_context(|| format!("reading preset {}", path.display()))?;
        let preset: Preset = serde_json::from_slice(&data)
            .with_context(|| format!("parsing preset {}", path.display()))?;
        preset.validate()?;
        Ok(preset)
    }

    /// Cherche d'abord sur disque, puis parmi les préréglages fournis.
    pub fn resolve(&self, id: &str) -> Result<Preset> {
        if self.path_for(id).exists() {
            return self.load(id);
        }
        builtin_presets()
            .into_iter()
            .find(|p| p.id == id)
            .with_context(|| format!("unknown preset: {id}"))
    }

    /// Préréglages fournis puis ceux du répertoire (triés par id). Un fichier
    /// illisible est ignoré.
    pub fn list(&self) -> Result<Vec<PresetInfo>> {
        let mut infos: Vec<PresetInfo> = builtin_presets()
            .into_iter()
            .map(|preset| PresetInfo {
                preset,
                path: None,
                modified: None,
            })
            .collect();
        if !self.base_dir.exists() {
            return Ok(infos);
        }

        let mut stored = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let data = fs::read(&path)?;
            let preset: Preset = match serde_json::from_slice(&data) {
                Ok(p) => p,
                Err(_err) => {
                    #[cfg(feature = "logging")]
                    tracing::warn!(path = %path.display(), error = %_err, "skipping unreadable preset");
                    continue;
                }
            };
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .ok()
                .map(DateTime::<Utc>::from);
            stored.push(PresetInfo {
                preset,
                path: Some(path),
                modified,
            });
        }
        stored.sort_by(|a, b| a.preset.id.cmp(&b.preset.id));
        infos.extend(stored);
        Ok(infos)
    }
}

/// Découpe une liste `a,b,c` en libellés de créneaux.
pub fn parse_slot_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_labels_wrap_past_midnight() {
        let presets = builtin_presets();
        assert_eq!(
            presets[0].labels(),
            vec!["17:00", "18:00", "19:00", "20:00", "21:00", "22:00", "23:00", "00:00", "01:00"]
        );
        assert_eq!(
            presets[1].labels(),
            vec!["19:00", "20:00", "21:00", "22:00", "23:00", "00:00", "01:00", "02:00", "03:00"]
        );
    }

    #[test]
    fn half_hour_steps() {
        let preset = Preset {
            id: "short".into(),
            name: "Short".into(),
            description: None,
            start_time: NaiveTime::from_hms_opt(23, 30, 0).unwrap(),
            hours: 3,
            step_minutes: 30,
        };
        assert_eq!(preset.labels(), vec!["23:30", "00:00", "00:30"]);
    }

    #[test]
    fn validation_rejects_overlong_or_empty() {
        let mut preset = builtin_presets().remove(0);
        preset.hours = 25;
        assert!(preset.validate().is_err());
        preset.hours = 0;
        assert!(preset.validate().is_err());
        preset.hours = 24;
        assert!(preset.validate().is_ok());
    }

    #[test]
    fn slot_list_parsing_skips_blanks() {
        assert_eq!(parse_slot_list(" 18:00, ,19:00,"), vec!["18:00", "19:00"]);
    }
}
