use crate::scheduler::{Generation, Warning};

/// Avis de sous-effectif prêt à afficher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub slot: String,
    pub station: String,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, toast, etc.).
pub trait NoticeRenderer {
    fn render(&self, warning: &Warning) -> String;
}

/// Rendu texte d'une ligne.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNotice;

impl NoticeRenderer for TextNotice {
    fn render(&self, warning: &Warning) -> String {
        let seats = if warning.seats_short == 1 { "seat" } else { "seats" };
        format!(
            "{slot}: not enough qualified staff for station {station} ({short} {seats} unfilled)",
            slot = warning.slot,
            station = warning.station,
            short = warning.seats_short,
        )
    }
}

/// Un avis par avertissement, dans l'ordre de la génération.
pub fn prepare_notices(generation: &Generation, renderer: &dyn NoticeRenderer) -> Vec<Notice> {
    generation
        .warnings
        .iter()
        .map(|warning| Notice {
            slot: warning.slot.clone(),
            station: warning.station.clone(),
            content: renderer.render(warning),
        })
        .collect()
}

/// Regroupe les avertissements par poste : (poste, créneaux touchés, places manquantes).
pub fn summarize_by_station(generation: &Generation) -> Vec<(String, usize, u32)> {
    let mut out: Vec<(String, usize, u32)> = Vec::new();
    for warning in &generation.warnings {
        match out.iter_mut().find(|(station, _, _)| *station == warning.station) {
            Some((_, slots, seats)) => {
                *slots += 1;
                *seats += warning.seats_short;
            }
            None => out.push((warning.station.clone(), 1, warning.seats_short)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(slot: &str, station: &str, short: u32) -> Warning {
        Warning {
            slot: slot.into(),
            station: station.into(),
            seats_short: short,
        }
    }

    #[test]
    fn text_notice_mentions_station_and_shortfall() {
        let generation = Generation {
            warnings: vec![warning("18:00", "Bar", 1), warning("19:00", "Door", 2)],
            ..Generation::default()
        };
        let notices = prepare_notices(&generation, &TextNotice);
        assert_eq!(notices.len(), 2);
        assert_eq!(
            notices[0].content,
            "18:00: not enough qualified staff for station Bar (1 seat unfilled)"
        );
        assert_eq!(
            notices[1].content,
            "19:00: not enough qualified staff for station Door (2 seats unfilled)"
        );
    }

    #[test]
    fn summary_groups_by_station() {
        let generation = Generation {
            warnings: vec![
                warning("18:00", "Bar", 1),
                warning("18:00", "Door", 1),
                warning("19:00", "Bar", 2),
            ],
            ..Generation::default()
        };
        assert_eq!(
            summarize_by_station(&generation),
            vec![("Bar".to_string(), 2, 3), ("Door".to_string(), 1, 1)]
        );
    }
}
