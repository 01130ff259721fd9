//! `agenda`: console front end for the clinic scheduling engine.
//!
//! # Usage
//!
//! ```text
//! agenda --config demo/agenda.toml --data demo/clinic.json show --mode month --date 2024-06-12
//! agenda --config demo/agenda.toml --data demo/clinic.json --professional p1 book --date 2024-06-12 --hour 14 --title "Ana Lima"
//! agenda --config demo/agenda.toml --data demo/clinic.json conflicts --date 2024-06-12
//! ```
//!
//! The data file is read once; bookings live for the duration of the command.

mod data;
mod render;

use std::path::PathBuf;

use agenda_core::{
  appointment::{PatientId, ProfessionalId},
  calendar::ViewMode,
  clock::SystemClock,
  config::ScheduleConfig,
  directory::Directory,
  draft::{DraftKind, DraftModality},
  identity::RandomIdentity,
};
use agenda_schedule::Agenda;
use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use clap::{Parser, Subcommand};
use data::DataFile;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

type ConsoleAgenda = Agenda<Directory, RandomIdentity, SystemClock>;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "agenda", version, about = "Clinic appointment calendar")]
struct Args {
  /// Path to a TOML file with schedule settings.
  #[arg(short, long, value_name = "FILE", default_value = "agenda.toml")]
  config: PathBuf,

  /// JSON file with professionals, availability and appointments.
  #[arg(short, long, value_name = "FILE", env = "AGENDA_DATA")]
  data: Option<PathBuf>,

  /// Professional assigned to new bookings (default: first id in the data
  /// file).
  #[arg(short, long, env = "AGENDA_PROFESSIONAL")]
  professional: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Print the calendar for a period.
  Show {
    #[arg(short, long, default_value_t = ViewMode::Week)]
    mode: ViewMode,

    /// Date inside the period (default: today).
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Emit the rendered view as JSON.
    #[arg(long)]
    json: bool,
  },

  /// Book the slot at DATE HOUR and print the day.
  Book {
    #[arg(long)]
    date: NaiveDate,

    #[arg(long)]
    hour: u32,

    #[arg(long, default_value = "")]
    title: String,

    #[arg(long)]
    patient: Option<String>,

    /// Hold the session by video; a meeting link is generated.
    #[arg(long, conflicts_with = "block")]
    remote: bool,

    /// Block the time off instead of booking a patient.
    #[arg(long)]
    block: bool,

    /// Length in minutes (default from config).
    #[arg(long)]
    minutes: Option<u32>,

    #[arg(long)]
    json: bool,
  },

  /// List overlapping appointments of the same professional.
  Conflicts {
    #[arg(long)]
    date: NaiveDate,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(args.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("AGENDA"))
    .build()
    .context("failed to read config file")?;
  let schedule: ScheduleConfig = settings
    .try_deserialize()
    .context("failed to deserialise ScheduleConfig")?;

  let data = match &args.data {
    Some(path) => DataFile::load(path)?,
    None => DataFile::default(),
  };

  let professional = match args.professional.as_deref() {
    Some(id) => ProfessionalId::from(id),
    None => data
      .default_professional()
      .context("no --professional given and the data file lists no professionals")?,
  };
  tracing::debug!(%professional, appointments = data.appointments.len(), "data loaded");

  let mut agenda = build_agenda(schedule, data, professional)?;

  match args.command {
    Command::Show { mode, date, json } => show(&mut agenda, mode, date, json),
    Command::Book { date, hour, title, patient, remote, block, minutes, json } => {
      let kind = if block {
        DraftKind::Block
      } else {
        DraftKind::Consultation {
          patient_id: patient.as_deref().map(PatientId::from),
          modality:   Some(if remote {
            DraftModality::Remote { meeting_reference: None }
          } else {
            DraftModality::InPerson
          }),
        }
      };
      book(&mut agenda, date, hour, title, kind, minutes, json)
    }
    Command::Conflicts { date } => conflicts(&agenda, date),
  }
}

fn build_agenda(
  schedule: ScheduleConfig,
  data: DataFile,
  professional: ProfessionalId,
) -> Result<ConsoleAgenda> {
  let DataFile { professionals, mut availability, appointments } = data;
  let hours = availability.remove(&professional);

  let agenda = Agenda::new(schedule, professionals, professional, RandomIdentity, SystemClock)
    .context("invalid schedule configuration")?
    .with_appointments(appointments)
    .context("data file contains an invalid appointment")?;

  Ok(match hours {
    Some(hours) => agenda.with_availability(hours),
    None => agenda,
  })
}

// ─── Commands ─────────────────────────────────────────────────────────────────

fn show(agenda: &mut ConsoleAgenda, mode: ViewMode, date: Option<NaiveDate>, json: bool) -> Result<()> {
  agenda.set_mode(mode);
  match date {
    Some(date) => agenda.jump_to(date),
    None => agenda.jump_to_today(),
  }

  let view = agenda.render();
  if json {
    println!("{}", serde_json::to_string_pretty(&view)?);
  } else {
    print!("{}", render::calendar(&view, agenda.directory(), agenda.now_indicator()));
  }
  Ok(())
}

fn book(
  agenda: &mut ConsoleAgenda,
  date: NaiveDate,
  hour: u32,
  title: String,
  kind: DraftKind,
  minutes: Option<u32>,
  json: bool,
) -> Result<()> {
  agenda.set_mode(ViewMode::Day);
  agenda.jump_to(date);

  let start = agenda
    .on_slot_click(date, hour)
    .with_context(|| format!("cannot book {date} at {hour}:00"))?
    .start;
  if let Some(minutes) = minutes {
    agenda.set_draft_range(start, start + Duration::minutes(i64::from(minutes)))?;
  }
  agenda.set_draft_title(title)?;
  let flags = agenda.set_draft_kind(kind)?;

  if let Some(availability) = flags.availability
    && !availability.is_available()
  {
    tracing::warn!(?availability, "booking outside the professional's working hours");
  }

  let booking = agenda.save().context("booking rejected")?;
  if json {
    println!("{}", serde_json::to_string_pretty(&booking)?);
    return Ok(());
  }

  print!("{}", render::booking(&booking));
  println!();
  print!("{}", render::calendar(&agenda.render(), agenda.directory(), agenda.now_indicator()));
  Ok(())
}

fn conflicts(agenda: &ConsoleAgenda, date: NaiveDate) -> Result<()> {
  let pairs = agenda.conflicts_on(date);
  if pairs.is_empty() {
    println!("No overlapping appointments on {date}.");
    return Ok(());
  }
  print!("{}", render::conflicts(&pairs, agenda.directory()));
  Ok(())
}
