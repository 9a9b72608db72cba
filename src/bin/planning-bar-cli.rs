#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use planning_bar::{
    check_schedule, io,
    notice::{prepare_notices, summarize_by_station, TextNotice},
    parse_slot_list,
    storage::{JsonStorage, Storage},
    GenerateOptions, Preset, PresetStore,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération de plannings de postes (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du roster
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    /// Répertoire des préréglages de créneaux
    #[arg(long, global = true, default_value = "presets")]
    presets_dir: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter un membre du staff
    AddStaff {
        #[arg(long)]
        name: String,
        /// liste "Bar,Door,..."
        #[arg(long)]
        stations: String,
    },

    /// Supprimer un membre (invalide le planning)
    RemoveStaff {
        #[arg(long)]
        name: String,
    },

    /// Ajouter un poste
    AddStation {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 1)]
        required: u32,
    },

    /// Supprimer un poste (invalide le planning)
    RemoveStation {
        #[arg(long)]
        name: String,
    },

    /// Importer du staff depuis un CSV
    ImportStaff {
        #[arg(long)]
        csv: String,
    },

    /// Importer des postes depuis un CSV
    ImportStations {
        #[arg(long)]
        csv: String,
    },

    /// Générer le planning
    Generate {
        /// Préréglage (`thursday`, `friday` ou id du répertoire)
        #[arg(long, conflicts_with = "slots")]
        preset: Option<String>,
        /// liste "18:00,19:00,..."
        #[arg(long)]
        slots: Option<String>,
        #[arg(long, default_value_t = 2)]
        max_consecutive: u32,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Afficher le planning courant
    Show,

    /// Vérifier le planning courant contre le roster
    Check {
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Écrire les avis de sous-effectif
    Notices {
        /// Fichier de sortie (texte brut) ; sinon sortie standard
        #[arg(long)]
        out: Option<String>,
    },

    /// Lister les préréglages
    Presets,

    /// Enregistrer un préréglage
    SavePreset {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        /// HH:MM
        #[arg(long)]
        start: String,
        #[arg(long)]
        hours: u8,
        #[arg(long, default_value_t = 60)]
        step_minutes: u16,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.roster);
    let mut roster = storage.load_or_default()?;
    let presets = PresetStore::new(&cli.presets_dir);

    let code = match cli.cmd {
        Commands::AddStaff { name, stations } => {
            roster.add_staff(name, parse_slot_list(&stations))?;
            storage.save(&roster)?;
            0
        }
        Commands::RemoveStaff { name } => {
            roster.remove_staff(&name)?;
            storage.save(&roster)?;
            0
        }
        Commands::AddStation { name, required } => {
            roster.add_station(name, required)?;
            storage.save(&roster)?;
            0
        }
        Commands::RemoveStation { name } => {
            roster.remove_station(&name)?;
            storage.save(&roster)?;
            0
        }
        Commands::ImportStaff { csv } => {
            let staff = io::import_staff_csv(csv)?;
            io::merge_into_roster(&mut roster, staff, Vec::new())?;
            storage.save(&roster)?;
            0
        }
        Commands::ImportStations { csv } => {
            let stations = io::import_stations_csv(csv)?;
            io::merge_into_roster(&mut roster, Vec::new(), stations)?;
            storage.save(&roster)?;
            0
        }
        Commands::Generate {
            preset,
            slots,
            max_consecutive,
            out_json,
            out_csv,
        } => {
            let labels = match (preset, slots) {
                (_, Some(list)) => parse_slot_list(&list),
                (Some(id), None) => presets.resolve(&id)?.labels(),
                (None, None) => presets.resolve("thursday")?.labels(),
            };
            let seats = roster.seat_demand() as usize;
            if roster.staff.len() < seats {
                eprintln!(
                    "Note: {} staff member(s) for {} seat(s) per slot",
                    roster.staff.len(),
                    seats
                );
            }

            let opts = GenerateOptions { max_consecutive };
            let generation = roster.generate(labels.as_slice(), opts)?.clone();
            storage.save(&roster)?;

            if let Some(path) = out_json {
                io::export_schedule_json(path, &generation.schedule)?;
            }
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, &generation.schedule)?;
            }
            print!("{}", io::render_schedule_table(&generation.schedule));
            for notice in prepare_notices(&generation, &TextNotice) {
                eprintln!("Warning: {}", notice.content);
            }
            // Code 2 = WARNING/INCOMPLETE
            if generation.is_complete() {
                0
            } else {
                2
            }
        }
        Commands::Show => {
            let Some(generation) = roster.schedule.as_ref() else {
                bail!("no schedule: run `generate` first");
            };
            print!("{}", io::render_schedule_table(&generation.schedule));
            for (name, count) in generation.schedule.assignment_totals() {
                println!("{name}: {count} slot(s)");
            }
            0
        }
        Commands::Check { report } => {
            let Some(generation) = roster.schedule.as_ref() else {
                bail!("no schedule: run `generate` first");
            };
            let conflicts =
                check_schedule(&generation.schedule, &roster.staff, &roster.stations);
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                if let Some(path) = report {
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["slot", "station", "staff", "kind"])?;
                    for c in &conflicts {
                        w.write_record([
                            c.slot.as_str(),
                            c.station.as_str(),
                            c.staff.as_deref().unwrap_or(""),
                            c.kind.as_str(),
                        ])?;
                    }
                    w.flush()?;
                }
                2
            }
        }
        Commands::Notices { out } => {
            let Some(generation) = roster.schedule.as_ref() else {
                bail!("no schedule: run `generate` first");
            };
            let notices = prepare_notices(generation, &TextNotice);
            let mut content: String = notices.iter().map(|n| format!("{}\n", n.content)).collect();
            for (station, slots, seats) in summarize_by_station(generation) {
                content.push_str(&format!(
                    "{station}: short in {slots} slot(s), {seats} seat(s) total\n"
                ));
            }
            match out {
                Some(path) => {
                    std::fs::write(&path, &content)?;
                    println!("{} notice(s) written to {path}", notices.len());
                }
                None => print!("{content}"),
            }
            0
        }
        Commands::Presets => {
            for info in presets.list()? {
                let origin = info
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "builtin".to_string());
                println!(
                    "{} | {} | {} | {}",
                    info.preset.id,
                    info.preset.name,
                    info.preset.labels().join(","),
                    origin
                );
            }
            0
        }
        Commands::SavePreset {
            id,
            name,
            start,
            hours,
            step_minutes,
        } => {
            let start_time = NaiveTime::parse_from_str(&start, "%H:%M")?;
            let preset = Preset {
                id,
                name,
                description: None,
                start_time,
                hours,
                step_minutes,
            };
            let path = presets.save(&preset)?;
            println!("Preset saved to {}", path.display());
            0
        }
    };

    std::process::exit(code);
}
