use davcal_domain::{AlarmAction, AlarmTrigger, Reminder, TimeUnit, Valarm};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ValarmDTO {
    pub trigger: Option<AlarmTrigger>,
    pub action: AlarmAction,
    pub description: Option<String>,
    /// The alarm as an iCalendar VALARM component
    pub ical: String,
}

impl ValarmDTO {
    pub fn new(valarm: Valarm) -> Self {
        Self {
            ical: valarm.to_ical(),
            trigger: valarm.trigger,
            action: valarm.action,
            description: valarm.description,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub count: i64,
    pub unit: TimeUnit,
    pub position: Option<usize>,
}

impl ReminderDTO {
    pub fn new(reminder: &Reminder) -> Self {
        let (count, unit) = reminder.parsed_when();
        Self {
            count,
            unit,
            position: reminder.position(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventRemindersDTO {
    pub uid: Option<String>,
    pub reminders: Vec<ReminderDTO>,
}

impl EventRemindersDTO {
    pub fn new(uid: Option<String>, reminders: &[Reminder]) -> Self {
        Self {
            uid,
            reminders: reminders.iter().map(ReminderDTO::new).collect(),
        }
    }
}
