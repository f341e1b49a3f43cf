use crate::error::DavcalError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use davcal_api_structs::dtos::EventRemindersDTO;
use davcal_api_structs::import_reminders::*;
use davcal_domain::{CalendarParseError, Reminder, Valarm};
use davcal_infra::DavcalContext;
use tracing::debug;

pub async fn import_reminders_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<DavcalContext>,
) -> Result<HttpResponse, DavcalError> {
    let usecase = ImportRemindersUseCase { ical: body.0.ical };

    execute(usecase, &ctx)
        .await
        .map(|events| {
            let events = events
                .into_iter()
                .map(|event| EventRemindersDTO::new(event.uid, &event.reminders))
                .collect();
            HttpResponse::Ok().json(APIResponse::new(events))
        })
        .map_err(DavcalError::from)
}

/// Reads the VALARMs of every event in a calendar object and keeps those
/// that can be shown as reminders
#[derive(Debug)]
pub struct ImportRemindersUseCase {
    pub ical: String,
}

/// Reminders of one event, identified by its UID when it has one
#[derive(Debug, PartialEq)]
pub struct EventReminders {
    pub uid: Option<String>,
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseErrors {
    InvalidCalendarData(CalendarParseError),
}

impl From<UseCaseErrors> for DavcalError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::InvalidCalendarData(e) => Self::BadClientData(e.to_string()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ImportRemindersUseCase {
    type Response = Vec<EventReminders>;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "ImportReminders";

    async fn execute(&mut self, _ctx: &DavcalContext) -> Result<Self::Response, Self::Errors> {
        let events =
            Valarm::parse_events(&self.ical).map_err(UseCaseErrors::InvalidCalendarData)?;

        let mut res = Vec::with_capacity(events.len());
        for event in events {
            for (position, alarm) in event.alarms.iter().enumerate() {
                match alarm {
                    Err(e) => debug!(
                        "Skipping unreadable VALARM at position {} of event {:?}: {}",
                        position, event.uid, e
                    ),
                    Ok(valarm) if Reminder::from_valarm(valarm, position).is_none() => debug!(
                        "Skipping VALARM at position {} of event {:?} as it can not be shown as a reminder: {:?}",
                        position, event.uid, valarm.trigger
                    ),
                    Ok(_) => {}
                }
            }

            res.push(EventReminders {
                reminders: event.reminders(),
                uid: event.uid,
            });
        }

        Ok(res)
    }
}
