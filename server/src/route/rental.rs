mod request;
mod response;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::rental::request::{
    ActiveRentalRequest, RentRequest, TerminateRequest, Transformer,
};
use crate::route::rental::response::{CreatedPresenter, Presenter};
use application::service::{
    GetActiveRentalService, RentInstrumentService, TerminateRentalService,
};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Router;

pub trait RentalRouter {
    fn route_rental(self) -> Self;
}

impl RentalRouter for Router<AppModule> {
    fn route_rental(self) -> Self {
        self.route(
            "/rentals",
            post(
                |State(handler): State<AppModule>, Query(req): Query<RentRequest>| async move {
                    let _turn = handler.sequencer().lock().await;
                    Controller::new(Transformer, CreatedPresenter)
                        .intake(req)
                        .handle(|dto| handler.pgpool().rent_instrument(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(handler): State<AppModule>, Query(req): Query<TerminateRequest>| async move {
                    let _turn = handler.sequencer().lock().await;
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| handler.pgpool().terminate_rental(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/students/:student_id/rentals",
            get(
                |State(handler): State<AppModule>, Path(student_id): Path<String>| async move {
                    let _turn = handler.sequencer().lock().await;
                    Controller::new(Transformer, Presenter)
                        .intake(ActiveRentalRequest::new(student_id))
                        .handle(|dto| handler.pgpool().get_active_rentals(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
