// Settings module
// Grid configuration: business-hours window and pixel units

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Snap unit for drag-and-drop and slot hit-testing, in minutes.
pub const SNAP_MINUTES: u32 = 15;
/// Quarter-hour slots per hour.
pub const SLOTS_PER_HOUR: u32 = 60 / SNAP_MINUTES;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("start hour {start} must be before end hour {end}")]
    InvalidHours { start: u32, end: u32 },
    #[error("end hour {0} is past midnight")]
    EndHourOutOfRange(u32),
    #[error("{0} must be a positive number")]
    NonPositive(&'static str),
    #[error("first day of week must be 0-6, got {0}")]
    InvalidFirstDay(u8),
    #[error("failed to read settings file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize settings")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// First visible hour of the time grid.
    pub start_hour: u32,
    /// Hour at which the time grid stops (exclusive).
    pub end_hour: u32,
    /// Height of one hour row in the week and day grids.
    pub week_cells_height: f32,
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u8,
    pub agenda_days: u32,
    /// Height of a single event chip in month cells.
    pub event_height: f32,
    pub event_gap: f32,
    pub default_event_minutes: u32,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 17,
            week_cells_height: 64.0,
            first_day_of_week: 0, // Sunday
            agenda_days: 30,
            event_height: 24.0,
            event_gap: 4.0,
            default_event_minutes: 60,
        }
    }
}

impl CalendarSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.start_hour >= self.end_hour {
            return Err(SettingsError::InvalidHours {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        if self.end_hour > 24 {
            return Err(SettingsError::EndHourOutOfRange(self.end_hour));
        }
        if !(self.week_cells_height > 0.0) {
            return Err(SettingsError::NonPositive("week_cells_height"));
        }
        if !(self.event_height > 0.0) {
            return Err(SettingsError::NonPositive("event_height"));
        }
        if self.agenda_days == 0 {
            return Err(SettingsError::NonPositive("agenda_days"));
        }
        if self.default_event_minutes == 0 {
            return Err(SettingsError::NonPositive("default_event_minutes"));
        }
        if self.first_day_of_week > 6 {
            return Err(SettingsError::InvalidFirstDay(self.first_day_of_week));
        }
        Ok(())
    }

    /// Number of hour rows shown in the time grid.
    pub fn visible_hours(&self) -> u32 {
        self.end_hour - self.start_hour
    }

    /// Total pixel height of the time grid.
    pub fn grid_height(&self) -> f32 {
        self.visible_hours() as f32 * self.week_cells_height
    }

    /// Location of the settings file in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "FormationCalendar", "FormationCalendar")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
    }

    /// Load settings from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::info!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = toml::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        self.validate()?;
        let raw = toml::to_string_pretty(self)?;
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, raw).map_err(io_err)
    }
}
