//! Boundary to the external solver service.
//!
//! Transport is left to implementors; the session only needs these four
//! calls. Implementations report a non-`ok` response body as
//! [`AppError::Backend`](crate::AppError::Backend) or return it with
//! `ok == false`; the session treats both as failure.

use hen_payload::PayloadSi;

use crate::error::AppResult;
use crate::results::{BuildResponse, DetailMatrix, SolveResponse, StreamDetail, StreamUnit};

pub trait SolverBackend {
    /// Submit streams and configuration; the service builds the network.
    fn build(&mut self, payload: &PayloadSi) -> AppResult<BuildResponse>;

    /// Solve the most recently built network.
    fn solve(&mut self) -> AppResult<SolveResponse>;

    fn match_detail(&mut self, hot: &str, cold: &str) -> AppResult<DetailMatrix>;

    fn stream_detail(&mut self, name: &str, unit: StreamUnit) -> AppResult<StreamDetail>;
}
