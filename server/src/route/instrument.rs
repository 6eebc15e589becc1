mod request;
mod response;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::instrument::request::{SearchRequest, Transformer};
use crate::route::instrument::response::Presenter;
use application::service::GetAvailableInstrumentService;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::Router;

pub trait InstrumentRouter {
    fn route_instrument(self) -> Self;
}

impl InstrumentRouter for Router<AppModule> {
    fn route_instrument(self) -> Self {
        self.route(
            "/instruments",
            get(|State(handler): State<AppModule>| async move {
                let _turn = handler.sequencer().lock().await;
                Controller::new((), Presenter)
                    .bypass(|| handler.pgpool().get_all_available())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/instruments/search",
            get(
                |State(handler): State<AppModule>, Query(req): Query<SearchRequest>| async move {
                    let _turn = handler.sequencer().lock().await;
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| handler.pgpool().get_all_available_by_name(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
