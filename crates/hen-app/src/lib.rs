//! Session layer for the heat-exchanger-network stream editor.
//!
//! Shared by the CLI and any other frontend: stream-list editing, the
//! validation gate in front of the solver, solver responses and detail
//! caching.

pub mod backend;
pub mod detail_cache;
pub mod error;
pub mod format;
pub mod results;
pub mod session;
pub mod streamset_service;

pub use backend::SolverBackend;
pub use detail_cache::{DetailCache, Lookup, RequestToken};
pub use error::{AppError, AppResult};
pub use format::format_heat;
pub use results::{
    BuildResponse, DetailMatrix, EconomicReport, ReportRow, ResultEdge, SolutionReport,
    SolveResponse, StreamDetail, StreamUnit, flatten_solution_report, move_item,
};
pub use session::Session;
pub use streamset_service::{
    default_streamset_name, load_streamset, save_streamset, streamset_name_at,
};
