mod alarm;
mod interval;
mod preferences;
mod reminder;
mod settings;

pub use alarm::{
    AlarmAction, AlarmTrigger, CalendarParseError, EventAlarms, TriggerParseError, Valarm,
    ValarmParseError, REMINDER_DESCRIPTION,
};
pub use interval::{
    Interval, IntervalParseError, TimeUnit, MINUTES_PER_DAY, MINUTES_PER_HOUR, MINUTES_PER_MONTH,
    MINUTES_PER_WEEK,
};
pub use preferences::Preferences;
pub use reminder::{Reminder, ReminderError, ReminderInput, UNMATCHED_PARSED_WHEN};
pub use settings::{workflow_key, SiteConfig};
