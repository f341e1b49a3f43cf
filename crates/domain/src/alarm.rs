use crate::interval::TimeUnit;
use ical::{parser::ical::component::IcalAlarm, property::Property, IcalParser};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, io::BufReader};
use thiserror::Error;

/// Description attached to every alarm generated from a `Reminder`
pub const REMINDER_DESCRIPTION: &str = "Reminder set in AgenDAV";

/// Relative trigger of a VALARM.
///
/// Every present field holds a magnitude. The direction is given by
/// `before` and the anchor by `related_start`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmTrigger {
    /// The offset is measured from the start of the event, otherwise from its end
    pub related_start: bool,
    /// The alarm fires before the anchor, otherwise after it
    pub before: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<i64>,
    /// Only ever set on export. Imports never read it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<i64>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TriggerParseError {
    #[error("Trigger: `{0}` is not a valid duration")]
    Malformed(String),
    #[error("Trigger: `{0}` is an absolute date-time")]
    Absolute(String),
}

impl AlarmTrigger {
    /// Trigger firing `count` `unit`s before the start of the event
    pub fn before_start(count: i64, unit: TimeUnit) -> Self {
        let mut trigger = Self {
            related_start: true,
            before: true,
            ..Default::default()
        };
        let field = match unit {
            TimeUnit::Minutes => &mut trigger.min,
            TimeUnit::Hours => &mut trigger.hour,
            TimeUnit::Days => &mut trigger.day,
            TimeUnit::Weeks => &mut trigger.week,
            TimeUnit::Months => &mut trigger.month,
        };
        *field = Some(count);
        trigger
    }

    /// Sum of the `min`, `hour`, `day` and `week` fields in minutes.
    /// `None` on overflow.
    pub fn total_minutes(&self) -> Option<i64> {
        let fields = [
            (self.min, TimeUnit::Minutes),
            (self.hour, TimeUnit::Hours),
            (self.day, TimeUnit::Days),
            (self.week, TimeUnit::Weeks),
        ];

        let mut total: i64 = 0;
        for (value, unit) in fields.iter() {
            if let Some(value) = value {
                total = total.checked_add(value.checked_mul(unit.minutes())?)?;
            }
        }
        Some(total)
    }

    /// Parses the value of a relative TRIGGER property, e.g. `-PT15M` or `P1W`
    pub fn from_ical(value: &str, related_start: bool) -> Result<Self, TriggerParseError> {
        let malformed = || TriggerParseError::Malformed(value.to_string());

        let normalized = value.trim().to_ascii_uppercase();
        if normalized.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(TriggerParseError::Absolute(value.to_string()));
        }
        let (before, rest) = match normalized.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, normalized.strip_prefix('+').unwrap_or(&normalized)),
        };
        let rest = rest.strip_prefix('P').ok_or_else(malformed)?;

        let mut trigger = Self {
            related_start,
            before,
            ..Default::default()
        };
        let mut digits = String::new();
        let mut in_time = false;
        let mut has_component = false;

        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                'T' if !in_time && digits.is_empty() => in_time = true,
                designator => {
                    let n = digits.parse::<i64>().map_err(|_| malformed())?;
                    digits.clear();
                    match (in_time, designator) {
                        (false, 'W') => trigger.week = Some(n),
                        (false, 'D') => trigger.day = Some(n),
                        (true, 'H') => trigger.hour = Some(n),
                        (true, 'M') => trigger.min = Some(n),
                        // Seconds are below the resolution of reminders
                        (true, 'S') => {}
                        _ => return Err(malformed()),
                    }
                    has_component = true;
                }
            }
        }

        if !digits.is_empty() || !has_component {
            return Err(malformed());
        }

        Ok(trigger)
    }

    /// Renders this trigger as an RFC 5545 duration.
    /// Months are rendered as 4 weeks each.
    pub fn to_ical_value(&self) -> String {
        let weeks = self.week.unwrap_or(0) + self.month.unwrap_or(0) * 4;
        let days = self.day.unwrap_or(0);
        let hours = self.hour.unwrap_or(0);
        let minutes = self.min.unwrap_or(0);

        if weeks == 0 && days == 0 && hours == 0 && minutes == 0 {
            return "PT0S".into();
        }

        let mut duration = String::from(if self.before { "-P" } else { "P" });
        if days == 0 && hours == 0 && minutes == 0 {
            duration.push_str(&format!("{}W", weeks));
            return duration;
        }

        // Weeks can not be mixed with other components
        let days = days + weeks * 7;
        if days != 0 {
            duration.push_str(&format!("{}D", days));
        }
        if hours != 0 || minutes != 0 {
            duration.push('T');
            if hours != 0 {
                duration.push_str(&format!("{}H", hours));
            }
            if minutes != 0 {
                duration.push_str(&format!("{}M", minutes));
            }
        }
        duration
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlarmAction {
    Display,
    Audio,
    Email,
    /// Any other action, e.g. `NONE` or an x-name, uppercased
    Other(String),
}

impl AlarmAction {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Display => "DISPLAY",
            Self::Audio => "AUDIO",
            Self::Email => "EMAIL",
            Self::Other(action) => action,
        }
    }
}

impl Display for AlarmAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for AlarmAction {
    fn from(action: &str) -> Self {
        match action.trim().to_ascii_uppercase().as_str() {
            "DISPLAY" => Self::Display,
            "AUDIO" => Self::Audio,
            "EMAIL" => Self::Email,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for AlarmAction {
    fn from(action: String) -> Self {
        Self::from(action.as_str())
    }
}

impl From<AlarmAction> for String {
    fn from(action: AlarmAction) -> Self {
        action.as_str().to_string()
    }
}

/// Reasons a single VALARM can not be read
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValarmParseError {
    #[error("VALARM has no ACTION")]
    MissingAction,
    #[error("VALARM has no TRIGGER")]
    MissingTrigger,
    #[error(transparent)]
    Trigger(#[from] TriggerParseError),
}

#[derive(Error, Debug, PartialEq)]
#[error("Calendar data is not valid: {0}")]
pub struct CalendarParseError(pub String);

/// A VALARM component of a calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valarm {
    /// `None` when the alarm uses an absolute date-time trigger
    pub trigger: Option<AlarmTrigger>,
    pub action: AlarmAction,
    pub description: Option<String>,
}

/// The VALARMs of one VEVENT, in the order they appear in it
#[derive(Debug, Clone, PartialEq)]
pub struct EventAlarms {
    pub uid: Option<String>,
    /// An alarm that could not be read keeps its slot, so the position
    /// of every alarm is its index here
    pub alarms: Vec<Result<Valarm, ValarmParseError>>,
}

impl Valarm {
    /// A display alarm as generated for reminders
    pub fn display(trigger: AlarmTrigger) -> Self {
        Self {
            trigger: Some(trigger),
            action: AlarmAction::Display,
            description: Some(REMINDER_DESCRIPTION.into()),
        }
    }

    pub fn to_ical(&self) -> String {
        let mut lines = vec![
            "BEGIN:VALARM".to_string(),
            format!("ACTION:{}", self.action),
        ];
        if let Some(description) = &self.description {
            lines.push(format!("DESCRIPTION:{}", escape_text(description)));
        }
        if let Some(trigger) = &self.trigger {
            let related = if trigger.related_start {
                ""
            } else {
                ";RELATED=END"
            };
            lines.push(format!("TRIGGER{}:{}", related, trigger.to_ical_value()));
        }
        lines.push("END:VALARM".into());

        let mut ical = lines.join("\r\n");
        ical.push_str("\r\n");
        ical
    }

    /// Reads the alarms of every VEVENT of the given VCALENDAR text.
    ///
    /// Only text that is not valid iCalendar fails as a whole. A single
    /// alarm that can not be read is reported in its slot.
    pub fn parse_events(ical: &str) -> Result<Vec<EventAlarms>, CalendarParseError> {
        let parser = IcalParser::new(BufReader::new(ical.as_bytes()));

        let mut events = Vec::new();
        for calendar in parser {
            let calendar = calendar.map_err(|e| CalendarParseError(e.to_string()))?;
            for event in calendar.events {
                events.push(EventAlarms {
                    uid: property_value(&event.properties, "UID").map(String::from),
                    alarms: event.alarms.iter().map(Self::from_ical_alarm).collect(),
                });
            }
        }

        Ok(events)
    }

    pub fn from_ical_alarm(alarm: &IcalAlarm) -> Result<Self, ValarmParseError> {
        let action =
            property_value(&alarm.properties, "ACTION").ok_or(ValarmParseError::MissingAction)?;
        let trigger =
            find_property(&alarm.properties, "TRIGGER").ok_or(ValarmParseError::MissingTrigger)?;

        Ok(Self {
            trigger: parse_trigger(trigger)?,
            action: AlarmAction::from(action),
            description: property_value(&alarm.properties, "DESCRIPTION").map(unescape_text),
        })
    }
}

fn find_property<'a>(properties: &'a [Property], name: &str) -> Option<&'a Property> {
    properties
        .iter()
        .find(|property| property.name.eq_ignore_ascii_case(name))
}

fn property_value<'a>(properties: &'a [Property], name: &str) -> Option<&'a str> {
    find_property(properties, name)?
        .value
        .as_deref()
        .map(str::trim)
}

fn param<'a>(property: &'a Property, key: &str) -> Option<&'a str> {
    property
        .params
        .as_ref()?
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .and_then(|(_, values)| values.first())
        .map(|value| value.trim_matches('"'))
}

/// `None` for absolute date-time triggers
fn parse_trigger(property: &Property) -> Result<Option<AlarmTrigger>, ValarmParseError> {
    let is_date_time = param(property, "VALUE")
        .map(|value| value.eq_ignore_ascii_case("DATE-TIME"))
        .unwrap_or(false);
    if is_date_time {
        return Ok(None);
    }

    let related_start = !param(property, "RELATED")
        .map(|related| related.eq_ignore_ascii_case("END"))
        .unwrap_or(false);
    let value = property.value.as_deref().unwrap_or_default();

    match AlarmTrigger::from_ical(value, related_start) {
        Ok(trigger) => Ok(Some(trigger)),
        Err(TriggerParseError::Absolute(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

fn unescape_text(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => unescaped.push('\n'),
            Some(other) => unescaped.push(other),
            None => unescaped.push('\\'),
        }
    }
    unescaped
}
