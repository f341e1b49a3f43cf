use crate::error::DavcalError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use davcal_api_structs::create_valarms::*;
use davcal_domain::{Reminder, ReminderError, ReminderInput, Valarm};
use davcal_infra::DavcalContext;

pub async fn create_valarms_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<DavcalContext>,
) -> Result<HttpResponse, DavcalError> {
    let usecase = CreateValarmsUseCase {
        reminders: body.0.reminders,
    };

    execute(usecase, &ctx)
        .await
        .map(|alarms| HttpResponse::Ok().json(APIResponse::new(alarms)))
        .map_err(DavcalError::from)
}

/// Turns reminders submitted by the user into the VALARMs to store in the event
#[derive(Debug)]
pub struct CreateValarmsUseCase {
    pub reminders: Vec<ReminderInput>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseErrors {
    InvalidReminder(usize, ReminderError),
}

impl From<UseCaseErrors> for DavcalError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::InvalidReminder(index, e) => {
                Self::BadClientData(format!("Reminder number {} is invalid: {}", index + 1, e))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateValarmsUseCase {
    type Response = Vec<Valarm>;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "CreateValarms";

    async fn execute(&mut self, _ctx: &DavcalContext) -> Result<Self::Response, Self::Errors> {
        self.reminders
            .iter()
            .enumerate()
            .map(|(index, input)| {
                Reminder::from_input(input)
                    .map(|reminder| reminder.to_valarm())
                    .map_err(|e| UseCaseErrors::InvalidReminder(index, e))
            })
            .collect()
    }
}
