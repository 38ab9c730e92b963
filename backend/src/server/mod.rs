//! Server construction and route wiring.

mod config;

pub use config::{ServerConfig, ServerSettings, SettingsError};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::Trace;
use crate::domain::VoteService;
use crate::domain::ports::VoteCommand;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::votes::{not_found, submit_vote, vote_json_config};
use crate::outbound::persistence::{
    DbPool, DieselSubmissionRegistry, DieselUserRegistry, DieselVoteLedger,
};

/// Wire the vote service to the Diesel adapters sharing `pool`.
pub fn diesel_vote_command(pool: DbPool) -> Arc<dyn VoteCommand> {
    Arc::new(VoteService::new(
        Arc::new(DieselUserRegistry::new(pool.clone())),
        Arc::new(DieselSubmissionRegistry::new(pool.clone())),
        Arc::new(DieselVoteLedger::new(pool)),
    ))
}

/// Build the application: `POST /vote` plus a JSON 404 for everything else,
/// including other methods on `/vote`.
pub fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(vote_json_config())
        .wrap(Trace)
        .service(
            web::resource("/vote")
                .route(web::post().to(submit_vote))
                .default_service(web::to(not_found)),
        )
        .default_service(web::to(not_found))
}

/// Bind the HTTP server.
///
/// The returned [`Server`] must be awaited to serve requests.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when the socket cannot be bound.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig { bind_addr, db_pool } = config;
    let state = web::Data::new(HttpState::new(diesel_vote_command(db_pool)));

    let server = HttpServer::new(move || build_app(state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "vote service listening");
    Ok(server)
}
