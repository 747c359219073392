// Formation Calendar
// Command-line front end: lays out a JSON event list or replays a drop

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};

use formation_calendar::models::event::CalendarEvent;
use formation_calendar::models::settings::CalendarSettings;
use formation_calendar::models::ui::ViewMode;
use formation_calendar::services::event::OptimisticEvents;
use formation_calendar::ui::controller::CalendarController;
use formation_calendar::ui::drag::{DragOutcome, DropTarget, Point, PointerKind};
use formation_calendar::ui::views::utils::format_event_tooltip;
use formation_calendar::ui::views::{RenderContext, ViewLayout, DEFAULT_MONTH_CELL_HEIGHT};

const USAGE: &str = "\
Usage:
  formation-calendar layout <events.json> [--view month|week|day|agenda]
                            [--date YYYY-MM-DD] [--settings FILE]
  formation-calendar move <events.json> <event-id> <YYYY-MM-DDTHH:MM>
                          [--view ...] [--settings FILE]";

struct CliOptions {
    positional: Vec<String>,
    view: ViewMode,
    date: Option<NaiveDate>,
    settings_path: Option<PathBuf>,
}

impl CliOptions {
    fn parse(args: &[String]) -> Result<Self> {
        let mut options = CliOptions {
            positional: Vec::new(),
            view: ViewMode::default(),
            date: None,
            settings_path: None,
        };

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--view" => {
                    let value = iter.next().ok_or_else(|| anyhow!("--view needs a value"))?;
                    options.view = value.parse().map_err(|e: String| anyhow!(e))?;
                }
                "--date" => {
                    let value = iter.next().ok_or_else(|| anyhow!("--date needs a value"))?;
                    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                        .with_context(|| format!("Invalid date '{}'", value))?;
                    options.date = Some(date);
                }
                "--settings" => {
                    let value = iter.next().ok_or_else(|| anyhow!("--settings needs a value"))?;
                    options.settings_path = Some(PathBuf::from(value));
                }
                _ => options.positional.push(arg.clone()),
            }
        }

        Ok(options)
    }

    fn settings(&self) -> Result<CalendarSettings> {
        let path = match &self.settings_path {
            Some(path) => Some(path.clone()),
            None => CalendarSettings::default_path(),
        };
        match path {
            Some(path) => CalendarSettings::load(&path)
                .with_context(|| format!("Failed to load settings from {}", path.display())),
            None => {
                log::warn!("No config directory available, using default settings");
                Ok(CalendarSettings::default())
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    log::info!("Starting Formation Calendar");

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let options = CliOptions::parse(rest)?;
    match command.as_str() {
        "layout" => run_layout(&options),
        "move" => run_move(&options),
        "help" | "--help" | "-h" => {
            println!("{}", USAGE);
            Ok(())
        }
        other => bail!("Unknown command '{}'\n{}", other, USAGE),
    }
}

fn load_events(path: &Path) -> Result<Vec<CalendarEvent>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read events from {}", path.display()))?;
    let events: Vec<CalendarEvent> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse events in {}", path.display()))?;

    let mut valid = Vec::with_capacity(events.len());
    for event in events {
        match event.validate() {
            Ok(()) => valid.push(event),
            Err(e) => log::warn!("Skipping event {}: {}", event.id, e),
        }
    }
    log::info!("Loaded {} events from {}", valid.len(), path.display());
    Ok(valid)
}

fn print_layout(
    events: &[CalendarEvent],
    view: ViewMode,
    anchor: NaiveDate,
    now: NaiveDateTime,
    settings: &CalendarSettings,
) -> Result<()> {
    let context = RenderContext {
        view,
        anchor,
        now,
        settings,
        dragging: None,
        month_cell_height: DEFAULT_MONTH_CELL_HEIGHT,
    };
    let layout = ViewLayout::build(events, &context);
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}

fn run_layout(options: &CliOptions) -> Result<()> {
    let [events_path] = options.positional.as_slice() else {
        bail!("layout expects one events file\n{}", USAGE);
    };
    let settings = options.settings()?;
    let events = load_events(Path::new(events_path))?;
    let now = Local::now().naive_local();
    let anchor = options.date.unwrap_or(now.date());

    print_layout(&events, options.view, anchor, now, &settings)
}

fn run_move(options: &CliOptions) -> Result<()> {
    let [events_path, event_id, target] = options.positional.as_slice() else {
        bail!("move expects an events file, an event id and a target time\n{}", USAGE);
    };
    let settings = options.settings()?;
    let events = load_events(Path::new(events_path))?;
    let target = NaiveDateTime::parse_from_str(target, "%Y-%m-%dT%H:%M")
        .with_context(|| format!("Invalid target time '{}'", target))?;

    let event = events
        .iter()
        .find(|event| &event.id == event_id)
        .cloned()
        .ok_or_else(|| anyhow!("No event with id '{}'", event_id))?;

    let mut controller = CalendarController::new(OptimisticEvents::new(events), settings.clone());
    controller.pointer_down(&event, Point::ZERO, PointerKind::Mouse, Instant::now());
    match controller.pointer_up(Some(DropTarget::at(target.date(), target.time()))) {
        DragOutcome::Moved(updated) => {
            log::info!("Moved {} to {} - {}", updated.id, updated.start, updated.end);
            eprintln!("{}", format_event_tooltip(&updated));
        }
        DragOutcome::Unchanged => log::info!("Event {} already starts at {}", event_id, target),
        DragOutcome::Cancelled => bail!("Drop on {} was rejected", target),
    }

    let displayed = controller.sink().displayed();
    let now = Local::now().naive_local();
    let anchor = options.date.unwrap_or(target.date());
    print_layout(&displayed, options.view, anchor, now, &settings)
}
