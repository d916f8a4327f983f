//! Subcommand handlers

use std::path::Path;

use chrono::NaiveDate;
use timetable_core::{ClassHour, Database, TimetableEngine};
use tracing::info;
use uuid::Uuid;

use crate::error::CliError;
use crate::fixture::{Fixture, RequestBatch};

pub type Engine = TimetableEngine<Database>;

pub fn generate(engine: &Engine, program_id: Uuid, from: Option<NaiveDate>) -> Result<(), CliError> {
    let slots = match from {
        Some(date) => engine.generate_timetable_from(program_id, date)?,
        None => engine.generate_timetable(program_id)?,
    };
    println!("Generated {} class hours for program {}", slots.len(), program_id);
    Ok(())
}

pub fn assign(engine: &Engine, path: &Path) -> Result<(), CliError> {
    let batch = RequestBatch::load(path)?;
    info!(requests = batch.requests.len(), path = %path.display(), "Loaded assignment requests");

    let updated = engine.assign_class_hours(&batch.requests)?;
    for class_hour in &updated {
        println!("{}", format_row(class_hour));
    }
    Ok(())
}

pub fn show(engine: &Engine, program_id: Uuid, json: bool) -> Result<(), CliError> {
    let class_hours = engine.timetable(program_id)?;

    if json {
        let out = serde_json::to_string_pretty(&class_hours).map_err(timetable_core::Error::from)?;
        println!("{out}");
        return Ok(());
    }

    let mut current_day = None;
    for class_hour in &class_hours {
        let day = class_hour.begins_at.date();
        if current_day != Some(day) {
            println!("{}", day.format("%A %Y-%m-%d"));
            current_day = Some(day);
        }
        println!("  {}", format_row(class_hour));
    }
    Ok(())
}

pub fn seed(engine: &Engine, path: &Path) -> Result<(), CliError> {
    let fixture = Fixture::load(path)?;
    let seeded = fixture.apply(engine.storage())?;

    if let Some((name, id)) = &seeded.school {
        println!("school   {id}  {name}");
    }
    for (name, id) in &seeded.programs {
        println!("program  {id}  {name}");
    }
    for (name, id) in &seeded.users {
        println!("user     {id}  {name}");
    }
    Ok(())
}

fn format_row(class_hour: &ClassHour) -> String {
    let mut row = format!(
        "{}  {}-{}  {:<13}",
        class_hour.id,
        class_hour.begins_at.format("%H:%M"),
        class_hour.ends_at.format("%H:%M"),
        class_hour.status.as_str(),
    );
    if let Some(room) = class_hour.room_no {
        row.push_str(&format!("  room {room}"));
    }
    if let Some(subject) = &class_hour.subject {
        row.push_str(&format!("  {subject}"));
    }
    row
}
