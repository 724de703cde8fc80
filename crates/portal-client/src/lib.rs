//! Portal Client
//!
//! Typed bindings to the analytics, ingestion, generation and segmentation
//! services, plus the small amount of orchestration the portal views share:
//! job status tracking, delayed follow-ups and predictor form validation.
//!
//! The crate is platform neutral. It builds for the browser (where the UI
//! drives it from `spawn_local`) and natively (where the tests drive it
//! against mocked HTTP servers).

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod job;
pub mod models;
pub mod predictor;
pub mod timer;

pub use client::{ApiClient, Service};
pub use config::PortalConfig;
pub use dashboard::{fetch_panel, DashboardPanel, PanelData, TopCustomersQuery};
pub use error::{ApiError, ConfigError, FormError, Result};
pub use job::{run_job, FollowUp, JobCommand, JobEvent, JobOutcome, JobStatus};
pub use models::{
    CustomerProfile, GenerationReport, JobAck, PredictionResponse, TopSpender, BANK_A, BANK_B,
    BANKS,
};
pub use predictor::{predict_first, SpendingCategory, SpendingForm};
pub use timer::Timer;
