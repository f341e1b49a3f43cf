use actix_web::{dev::ServiceResponse, test, web, App};
use davcal_api::configure_server_api;
use davcal_infra::{Config, DavcalContext, StaticSys};
use std::sync::Arc;

pub const SESSION_HEADER: &str = "x-davcal-user";
/// Sun, 06 Nov 1994 08:49:37 GMT
pub const NOW_MILLIS: i64 = 784111777000;

/// Context independent of the environment the tests run in
pub fn setup_ctx() -> DavcalContext {
    let mut ctx = DavcalContext::create_inmemory();
    ctx.config = Config::from_lookup(|_| None);
    ctx.sys = Arc::new(StaticSys {
        timestamp_millis: NOW_MILLIS,
    });
    ctx
}

pub async fn perform(ctx: DavcalContext, req: test::TestRequest) -> ServiceResponse {
    let service = test::init_service(
        App::new()
            .app_data(web::Data::new(ctx))
            .configure(configure_server_api),
    )
    .await;
    test::call_service(&service, req.to_request()).await
}
