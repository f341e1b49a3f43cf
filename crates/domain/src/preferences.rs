use chrono_tz::{Tz, UTC};
use serde::{Deserialize, Serialize};

/// Per user preferences handed to the web frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub timezone: Tz,
    pub language: String,
    pub date_format: String,
    pub time_format: String,
    /// First day of the week, 0 is Sunday
    pub weekstart: isize,
    pub show_week_nb: bool,
    pub show_now_indicator: bool,
    /// Number of days shown on the list view
    pub list_days: usize,
    pub default_view: String,
    pub default_calendar: Option<String>,
    pub hidden_calendars: Vec<String>,
}

impl Preferences {
    pub fn set_weekstart(&mut self, wkst: isize) -> bool {
        if (0..=6).contains(&wkst) {
            self.weekstart = wkst;
            true
        } else {
            false
        }
    }

    pub fn set_timezone(&mut self, timezone: &str) -> bool {
        match timezone.parse::<Tz>() {
            Ok(tzid) => {
                self.timezone = tzid;
                true
            }
            Err(_) => false,
        }
    }

    pub fn set_list_days(&mut self, list_days: usize) -> bool {
        if (1..=31).contains(&list_days) {
            self.list_days = list_days;
            true
        } else {
            false
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            timezone: UTC,
            language: "en".into(),
            date_format: "ymd".into(),
            time_format: "24".into(),
            weekstart: 0,
            show_week_nb: false,
            show_now_indicator: true,
            list_days: 7,
            default_view: "month".into(),
            default_calendar: None,
            hidden_calendars: Vec::new(),
        }
    }
}
