use crate::{
    alarm::{AlarmTrigger, EventAlarms, Valarm},
    interval::{
        Interval, IntervalParseError, TimeUnit, MINUTES_PER_DAY, MINUTES_PER_HOUR,
        MINUTES_PER_MONTH,
    },
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned by `Reminder::parsed_when` if no unit matched, which should never happen
pub const UNMATCHED_PARSED_WHEN: (i64, TimeUnit) = (99999, TimeUnit::Months);

/// Units a user can pick when creating a reminder
const INPUT_UNITS: [TimeUnit; 3] = [TimeUnit::Minutes, TimeUnit::Hours, TimeUnit::Days];

/// Units tried, in this order, when importing an alarm trigger
const TRIGGER_UNITS: [TimeUnit; 4] = [
    TimeUnit::Minutes,
    TimeUnit::Hours,
    TimeUnit::Days,
    TimeUnit::Weeks,
];

/// Units tried, in this order, when presenting a reminder
const DISPLAY_UNITS: [TimeUnit; 5] = [
    TimeUnit::Months,
    TimeUnit::Weeks,
    TimeUnit::Days,
    TimeUnit::Hours,
    TimeUnit::Minutes,
];

/// A `Reminder` is a notification some time before the start of a calendar event.
///
/// It is the simplified view of a VALARM: only display alarms relative to the
/// start of the event and firing before (or exactly at) the start are covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    when: Interval,
    /// Position of the VALARM this `Reminder` was imported from inside its event
    position: Option<usize>,
}

/// Reminder as submitted by a user form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderInput {
    /// Number of `unit`s
    pub count: String,
    /// One of minutes, hours or days
    pub unit: String,
    #[serde(default)]
    pub position: Option<String>,
}

#[derive(Error, Debug, PartialEq)]
pub enum ReminderError {
    #[error("Reminder count: `{0}` is not a non-negative integer")]
    InvalidCount(String),
    #[error("Reminder unit: `{0}` is not one of minutes, hours or days")]
    InvalidUnit(String),
    #[error("Reminder position: `{0}` is not a non-negative integer")]
    InvalidPosition(String),
    #[error(transparent)]
    Interval(#[from] IntervalParseError),
}

impl Reminder {
    pub fn new(when: Interval, position: Option<usize>) -> Self {
        Self { when, position }
    }

    /// Creates a `Reminder` for `count` `unit`s before the start of an event.
    /// Only minutes, hours and days are accepted.
    pub fn from_user_input(
        count: u64,
        unit: TimeUnit,
        position: Option<usize>,
    ) -> Result<Self, ReminderError> {
        if !INPUT_UNITS.contains(&unit) {
            return Err(ReminderError::InvalidUnit(unit.to_string()));
        }

        let when = format!("{} {}", count, unit).parse::<Interval>()?;
        Ok(Self::new(when, position))
    }

    /// Parses the fields of a reminder form.
    ///
    /// Units are matched case-insensitively and may be singular or short
    /// (`min`), but must still be minutes, hours or days.
    /// A missing, blank or `"0"` position means no position, the same way
    /// the web frontend has always sent it.
    pub fn from_input(input: &ReminderInput) -> Result<Self, ReminderError> {
        let count = input
            .count
            .trim()
            .parse::<u64>()
            .map_err(|_| ReminderError::InvalidCount(input.count.clone()))?;
        let unit = TimeUnit::from_name(input.unit.trim())
            .ok_or_else(|| ReminderError::InvalidUnit(input.unit.clone()))?;

        let position = match input.position.as_deref().map(str::trim) {
            None | Some("") | Some("0") => None,
            Some(position) => Some(
                position
                    .parse::<usize>()
                    .map_err(|_| ReminderError::InvalidPosition(position.to_string()))?,
            ),
        };

        Self::from_user_input(count, unit, position)
    }

    /// Imports an alarm trigger.
    ///
    /// Returns `None` when the trigger can not be represented as a `Reminder`:
    /// it is anchored to the end of the event, or it fires some time after the start.
    pub fn from_trigger(trigger: &AlarmTrigger, position: usize) -> Option<Self> {
        if !trigger.related_start {
            return None;
        }

        let total_minutes = trigger.total_minutes()?;

        // Triggering right on start is fine whatever the direction
        if !trigger.before && total_minutes != 0 {
            return None;
        }

        let used_unit = TRIGGER_UNITS
            .iter()
            .find(|unit| total_minutes % unit.minutes() == 0)?;
        let count = total_minutes / used_unit.minutes();
        let when = format!("{} {}", count, used_unit.trigger_field())
            .parse::<Interval>()
            .ok()?;

        Some(Self::new(when, Some(position)))
    }

    /// Imports a VALARM. Absolute triggers are not supported.
    pub fn from_valarm(valarm: &Valarm, position: usize) -> Option<Self> {
        valarm
            .trigger
            .as_ref()
            .and_then(|trigger| Self::from_trigger(trigger, position))
    }

    pub fn to_trigger(&self) -> AlarmTrigger {
        let (count, unit) = self.parsed_when();
        AlarmTrigger::before_start(count, unit)
    }

    pub fn to_valarm(&self) -> Valarm {
        Valarm::display(self.to_trigger())
    }

    /// Expresses this reminder as a count of the coarsest unit that divides it.
    ///
    /// Only the first non-zero field of the underlying breakdown, scanning
    /// minutes, hours, days and then months, is taken into account.
    pub fn parsed_when(&self) -> (i64, TimeUnit) {
        let breakdown = [
            (self.when.minutes, 1),
            (self.when.hours, MINUTES_PER_HOUR),
            (self.when.days, MINUTES_PER_DAY),
            (self.when.months, MINUTES_PER_MONTH),
        ];

        let count_minutes = breakdown
            .iter()
            .find(|(value, _)| *value != 0)
            .map(|(value, minutes)| value.saturating_mul(*minutes))
            .unwrap_or(0);

        if count_minutes == 0 {
            return (0, TimeUnit::Minutes);
        }

        for unit in DISPLAY_UNITS.iter() {
            if count_minutes % unit.minutes() == 0 {
                return (count_minutes / unit.minutes(), *unit);
            }
        }

        UNMATCHED_PARSED_WHEN
    }

    /// Offset before the start of the event in minutes
    pub fn offset_minutes(&self) -> i64 {
        self.when.total_minutes()
    }

    pub fn when(&self) -> &Interval {
        &self.when
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }
}

impl EventAlarms {
    /// Imports the alarms of this event, skipping those that can not be read
    /// or are not supported. Each `Reminder` keeps the position of its alarm.
    pub fn reminders(&self) -> Vec<Reminder> {
        self.alarms
            .iter()
            .enumerate()
            .filter_map(|(position, alarm)| {
                alarm
                    .as_ref()
                    .ok()
                    .and_then(|valarm| Reminder::from_valarm(valarm, position))
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::alarm::{AlarmAction, ValarmParseError};

    fn trigger(related_start: bool, before: bool) -> AlarmTrigger {
        AlarmTrigger {
            related_start,
            before,
            ..Default::default()
        }
    }

    fn input(count: &str, unit: &str, position: Option<&str>) -> ReminderInput {
        ReminderInput {
            count: count.into(),
            unit: unit.into(),
            position: position.map(String::from),
        }
    }

    #[test]
    fn user_input_in_minutes() {
        let reminder = Reminder::from_user_input(15, TimeUnit::Minutes, None).unwrap();
        assert_eq!(reminder.offset_minutes(), 15);
        assert_eq!(reminder.parsed_when(), (15, TimeUnit::Minutes));
        assert_eq!(reminder.position(), None);
    }

    #[test]
    fn user_input_in_days() {
        let reminder = Reminder::from_user_input(2, TimeUnit::Days, Some(1)).unwrap();
        assert_eq!(reminder.offset_minutes(), 2880);
        assert_eq!(reminder.parsed_when(), (2, TimeUnit::Days));
        assert_eq!(reminder.position(), Some(1));
    }

    #[test]
    fn user_input_offset_is_count_times_unit() {
        for unit in INPUT_UNITS.iter() {
            for count in &[0, 1, 7, 13, 24, 60, 90, 365, 1000] {
                let reminder = Reminder::from_user_input(*count, *unit, None).unwrap();
                assert_eq!(reminder.offset_minutes(), *count as i64 * unit.minutes());
            }
        }
    }

    #[test]
    fn user_input_rejects_coarse_units() {
        assert_eq!(
            Reminder::from_user_input(1, TimeUnit::Weeks, None),
            Err(ReminderError::InvalidUnit("weeks".into()))
        );
        assert_eq!(
            Reminder::from_user_input(1, TimeUnit::Months, None),
            Err(ReminderError::InvalidUnit("months".into()))
        );
    }

    #[test]
    fn coarsest_unit_is_presented() {
        let cases = vec![
            (120, TimeUnit::Minutes, (2, TimeUnit::Hours)),
            (48, TimeUnit::Hours, (2, TimeUnit::Days)),
            (14, TimeUnit::Days, (2, TimeUnit::Weeks)),
            (28, TimeUnit::Days, (1, TimeUnit::Months)),
            (90, TimeUnit::Minutes, (90, TimeUnit::Minutes)),
        ];
        for (count, unit, expected) in cases {
            let reminder = Reminder::from_user_input(count, unit, None).unwrap();
            assert_eq!(reminder.parsed_when(), expected);
        }
    }

    #[test]
    fn zero_offset_is_presented_in_minutes() {
        for unit in INPUT_UNITS.iter() {
            let reminder = Reminder::from_user_input(0, *unit, None).unwrap();
            assert_eq!(reminder.parsed_when(), (0, TimeUnit::Minutes));
        }
        let reminder = Reminder::new(Interval::default(), None);
        assert_eq!(reminder.parsed_when(), (0, TimeUnit::Minutes));
    }

    #[test]
    fn only_first_non_zero_field_is_presented() {
        let when = Interval {
            months: 1,
            days: 1,
            hours: 2,
            minutes: 0,
        };
        let reminder = Reminder::new(when, None);
        assert_eq!(reminder.parsed_when(), (2, TimeUnit::Hours));
        assert_eq!(reminder.offset_minutes(), 40320 + 1440 + 120);
    }

    #[test]
    fn form_input() {
        let reminder = Reminder::from_input(&input("15", "minutes", None)).unwrap();
        assert_eq!(reminder.offset_minutes(), 15);
        assert_eq!(reminder.position(), None);

        let reminder = Reminder::from_input(&input(" 3 ", "hours", Some("2"))).unwrap();
        assert_eq!(reminder.offset_minutes(), 180);
        assert_eq!(reminder.position(), Some(2));
    }

    #[test]
    fn form_input_units_ignore_case() {
        for (unit, minutes) in &[("Minutes", 5), ("HOURS", 300), ("Day", 7200), ("min", 5)] {
            let reminder = Reminder::from_input(&input("5", unit, None)).unwrap();
            assert_eq!(reminder.offset_minutes(), *minutes);
        }
    }

    #[test]
    fn form_input_without_position() {
        for position in &[None, Some(""), Some("  "), Some("0")] {
            let reminder = Reminder::from_input(&input("1", "days", *position)).unwrap();
            assert_eq!(reminder.position(), None);
        }
    }

    #[test]
    fn form_input_errors() {
        assert_eq!(
            Reminder::from_input(&input("-1", "minutes", None)),
            Err(ReminderError::InvalidCount("-1".into()))
        );
        assert_eq!(
            Reminder::from_input(&input("ten", "minutes", None)),
            Err(ReminderError::InvalidCount("ten".into()))
        );
        assert_eq!(
            Reminder::from_input(&input("1", "weeks", None)),
            Err(ReminderError::InvalidUnit("weeks".into()))
        );
        assert_eq!(
            Reminder::from_input(&input("1", "fortnights", None)),
            Err(ReminderError::InvalidUnit("fortnights".into()))
        );
        assert_eq!(
            Reminder::from_input(&input("1", "days", Some("first"))),
            Err(ReminderError::InvalidPosition("first".into()))
        );
    }

    #[test]
    fn huge_counts_are_rejected() {
        let res = Reminder::from_user_input(u64::MAX, TimeUnit::Days, None);
        assert!(matches!(res, Err(ReminderError::Interval(_))));
    }

    #[test]
    fn trigger_one_day_before_start() {
        let mut t = trigger(true, true);
        t.day = Some(1);
        let reminder = Reminder::from_trigger(&t, 0).unwrap();
        assert_eq!(reminder.offset_minutes(), 1440);
        assert_eq!(reminder.position(), Some(0));
    }

    #[test]
    fn trigger_related_to_end_is_unsupported() {
        let mut t = trigger(false, true);
        t.hour = Some(1);
        assert_eq!(Reminder::from_trigger(&t, 0), None);
    }

    #[test]
    fn trigger_after_start_is_unsupported() {
        let mut t = trigger(true, false);
        t.hour = Some(1);
        assert_eq!(Reminder::from_trigger(&t, 0), None);
    }

    #[test]
    fn trigger_on_start_is_supported_in_any_direction() {
        for before in &[true, false] {
            let reminder = Reminder::from_trigger(&trigger(true, *before), 3).unwrap();
            assert_eq!(reminder.offset_minutes(), 0);
            assert_eq!(reminder.position(), Some(3));
        }

        let mut t = trigger(true, false);
        t.min = Some(0);
        assert!(Reminder::from_trigger(&t, 0).is_some());
    }

    #[test]
    fn trigger_import_always_stores_minutes() {
        let mut t = trigger(true, true);
        t.hour = Some(2);
        let reminder = Reminder::from_trigger(&t, 0).unwrap();
        assert_eq!(reminder.when().minutes, 120);
        assert_eq!(reminder.when().hours, 0);
        assert_eq!(reminder.parsed_when(), (2, TimeUnit::Hours));
    }

    #[test]
    fn trigger_months_are_ignored() {
        let mut t = trigger(true, true);
        t.month = Some(1);
        let reminder = Reminder::from_trigger(&t, 0).unwrap();
        assert_eq!(reminder.offset_minutes(), 0);
    }

    #[test]
    fn trigger_fields_are_summed() {
        let t = AlarmTrigger {
            related_start: true,
            before: true,
            min: Some(30),
            hour: Some(1),
            day: Some(1),
            week: Some(1),
            month: None,
        };
        let reminder = Reminder::from_trigger(&t, 0).unwrap();
        assert_eq!(reminder.offset_minutes(), 10080 + 1440 + 60 + 30);
    }

    #[test]
    fn export_trigger() {
        let reminder = Reminder::from_user_input(48, TimeUnit::Hours, None).unwrap();
        assert_eq!(
            reminder.to_trigger(),
            AlarmTrigger::before_start(2, TimeUnit::Days)
        );

        let reminder = Reminder::from_user_input(28, TimeUnit::Days, None).unwrap();
        let trigger = reminder.to_trigger();
        assert_eq!(trigger.month, Some(1));
        assert!(trigger.related_start);
        assert!(trigger.before);
    }

    #[test]
    fn export_valarm() {
        let reminder = Reminder::from_user_input(10, TimeUnit::Minutes, None).unwrap();
        let valarm = reminder.to_valarm();
        assert_eq!(valarm.action, AlarmAction::Display);
        assert_eq!(valarm.description.as_deref(), Some("Reminder set in AgenDAV"));
        assert_eq!(
            valarm.trigger,
            Some(AlarmTrigger::before_start(10, TimeUnit::Minutes))
        );
    }

    #[test]
    fn export_then_import_keeps_offset() {
        for unit in INPUT_UNITS.iter() {
            for count in &[0, 1, 5, 15, 30, 45, 60, 90, 120, 180, 720] {
                let reminder = Reminder::from_user_input(*count, *unit, None).unwrap();
                if reminder.parsed_when().1 == TimeUnit::Months {
                    continue;
                }
                let imported = Reminder::from_trigger(&reminder.to_trigger(), 0).unwrap();
                assert_eq!(imported.offset_minutes(), reminder.offset_minutes());
            }
        }
    }

    #[test]
    fn import_alarms_of_event() {
        let event = EventAlarms {
            uid: Some("dentist".into()),
            alarms: vec![
                Ok(Valarm::display(AlarmTrigger::before_start(
                    15,
                    TimeUnit::Minutes,
                ))),
                Ok(Valarm {
                    trigger: None,
                    action: AlarmAction::Other("NONE".into()),
                    description: None,
                }),
                Ok(Valarm::display(AlarmTrigger {
                    related_start: false,
                    before: true,
                    hour: Some(1),
                    ..Default::default()
                })),
                Err(ValarmParseError::MissingTrigger),
                Ok(Valarm::display(AlarmTrigger::before_start(
                    1,
                    TimeUnit::Weeks,
                ))),
            ],
        };

        let reminders = event.reminders();
        assert_eq!(reminders.len(), 2);
        assert_eq!(reminders[0].position(), Some(0));
        assert_eq!(reminders[0].offset_minutes(), 15);
        assert_eq!(reminders[1].position(), Some(4));
        assert_eq!(reminders[1].parsed_when(), (1, TimeUnit::Weeks));
    }
}
