// UI models module
// View modes and the date range each one covers

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::settings::CalendarSettings;
use crate::utils::date::get_week_start;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Month,
    #[default]
    Week,
    Day,
    Agenda,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    Previous,
    Next,
}

impl ViewMode {
    /// Dates rendered by this view around `anchor`, in ascending order.
    pub fn visible_dates(&self, anchor: NaiveDate, settings: &CalendarSettings) -> Vec<NaiveDate> {
        let (first, count) = match self {
            ViewMode::Day => (anchor, 1),
            ViewMode::Week => (get_week_start(anchor, settings.first_day_of_week), 7),
            ViewMode::Month => {
                let month_start = anchor.with_day(1).unwrap_or(anchor);
                let month_end = last_day_of_month(anchor);
                let first = get_week_start(month_start, settings.first_day_of_week);
                let last =
                    get_week_start(month_end, settings.first_day_of_week) + Duration::days(6);
                (first, (last - first).num_days() + 1)
            }
            ViewMode::Agenda => (anchor, i64::from(settings.agenda_days)),
        };

        (0..count).map(|offset| first + Duration::days(offset)).collect()
    }

    /// Anchor date after paging one view-length in `direction`.
    pub fn navigate(
        &self,
        anchor: NaiveDate,
        direction: NavigationDirection,
        settings: &CalendarSettings,
    ) -> NaiveDate {
        let sign = match direction {
            NavigationDirection::Previous => -1,
            NavigationDirection::Next => 1,
        };
        match self {
            ViewMode::Month => {
                let shifted = match direction {
                    NavigationDirection::Previous => anchor.checked_sub_months(Months::new(1)),
                    NavigationDirection::Next => anchor.checked_add_months(Months::new(1)),
                };
                shifted.unwrap_or(anchor)
            }
            ViewMode::Week => anchor + Duration::days(7 * sign),
            ViewMode::Day => anchor + Duration::days(sign),
            ViewMode::Agenda => anchor + Duration::days(i64::from(settings.agenda_days) * sign),
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "month" => Ok(ViewMode::Month),
            "week" => Ok(ViewMode::Week),
            "day" => Ok(ViewMode::Day),
            "agenda" => Ok(ViewMode::Agenda),
            other => Err(format!("Unknown view '{}'", other)),
        }
    }
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .map(|next_first| next_first - Duration::days(1))
        .unwrap_or(date)
}
