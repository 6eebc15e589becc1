use application::RentalError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_stack::{AttachmentKind, FrameKind, Report};
use kernel::KernelError;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<RentalError>);

impl From<Report<RentalError>> for ErrorStatus {
    fn from(e: Report<RentalError>) -> Self {
        ErrorStatus(e)
    }
}

impl ErrorStatus {
    fn status(&self) -> StatusCode {
        match self.0.current_context() {
            RentalError::InstrumentUnavailable => StatusCode::CONFLICT,
            RentalError::RentalLimitExceeded => StatusCode::UNPROCESSABLE_ENTITY,
            RentalError::RentFailed
            | RentalError::ListFailed
            | RentalError::SearchFailed
            | RentalError::TerminationFailed => {
                let store = self
                    .0
                    .frames()
                    .find_map(|frame| frame.downcast_ref::<KernelError>());
                match store {
                    None | Some(KernelError::InvalidValue) => StatusCode::BAD_REQUEST,
                    Some(KernelError::Timeout) => StatusCode::REQUEST_TIMEOUT,
                    Some(KernelError::Store) | Some(KernelError::Internal) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                }
            }
        }
    }

    /// Every context and printable attachment, newest first.
    fn describe(&self) -> String {
        self.0
            .frames()
            .filter_map(|frame| match frame.kind() {
                FrameKind::Context(context) => Some(context.to_string()),
                FrameKind::Attachment(AttachmentKind::Printable(printable)) => {
                    Some(printable.to_string())
                }
                FrameKind::Attachment(_) => None,
            })
            .collect::<Vec<_>>()
            .join(": ")
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{:?}", self.0);
        }
        (status, self.describe()).into_response()
    }
}
