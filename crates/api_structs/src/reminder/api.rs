use crate::dtos::{EventRemindersDTO, ValarmDTO};
use davcal_domain::{ReminderInput, Valarm};
use serde::{Deserialize, Serialize};

pub mod create_valarms {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub reminders: Vec<ReminderInput>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub alarms: Vec<ValarmDTO>,
    }

    impl APIResponse {
        pub fn new(alarms: Vec<Valarm>) -> Self {
            Self {
                alarms: alarms.into_iter().map(ValarmDTO::new).collect(),
            }
        }
    }
}

pub mod import_reminders {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// iCalendar text of a calendar object, including the VALARM components of its events
        pub ical: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// One entry per VEVENT, in the order they appear
        pub events: Vec<EventRemindersDTO>,
    }

    impl APIResponse {
        pub fn new(events: Vec<EventRemindersDTO>) -> Self {
            Self { events }
        }
    }
}
