//! Job Commands
//!
//! Ingestion, retraining and data generation all follow the same lifecycle:
//!
//! ```text
//! Idle -> Loading -> Succeeded | Failed
//! ```
//!
//! [`run_job`] drives one command through it, reporting each step as a
//! [`JobEvent`], then runs the command's follow-up (a delayed dashboard
//! refresh or a delayed message clear). The delay is a fixed heuristic: the
//! backend job is never polled, so a refresh may still see stale data.

use std::time::Duration;

use tracing::{error, info};

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{GenerationReport, JobAck};
use crate::timer::Timer;

/// Delay between a successful ingestion trigger and the dashboard refresh
pub const REFRESH_DELAY: Duration = Duration::from_millis(3000);

/// How long a generation result stays on screen
pub const MESSAGE_TTL: Duration = Duration::from_millis(3000);

/// Records requested when the user does not say otherwise
pub const DEFAULT_RECORD_COUNT: u32 = 100;

/// Parse a typed record count. Anything but a whole, non-negative number is
/// `None`.
pub fn parse_record_count(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// Status of one command button, owned by the view that issues it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum JobStatus {
    #[default]
    Idle,
    Loading(String),
    Succeeded(String),
    Failed(String),
}

impl JobStatus {
    /// True strictly while a request is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, JobStatus::Loading(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, JobStatus::Failed(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            JobStatus::Idle => None,
            JobStatus::Loading(m) | JobStatus::Succeeded(m) | JobStatus::Failed(m) => Some(m),
        }
    }

    /// Drop a success message once its time is up.
    ///
    /// Anything else stays: a newer call may already own the slot.
    pub fn expire(&mut self) {
        if matches!(self, JobStatus::Succeeded(_)) {
            *self = JobStatus::Idle;
        }
    }
}

/// Backend commands a view can issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobCommand {
    /// Start ingestion for every configured bank
    IngestAll,
    /// Start ingestion for a single bank
    Ingest { bank_id: String },
    /// Retrain the segmentation model
    Retrain,
    /// Generate synthetic transactions for a bank
    Generate { bank_id: String, count: u32 },
}

/// What a successful command returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Ack(JobAck),
    Generated(GenerationReport),
}

/// Delayed action after a successful command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Tell the dashboard to refetch after the delay
    NotifyRefresh(Duration),
    /// Clear the success message after the delay
    ExpireMessage(Duration),
}

/// Progress reported by [`run_job`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    Status(JobStatus),
    RefreshDue,
    MessageExpired,
}

impl JobCommand {
    pub fn generate(bank_id: impl Into<String>, count: u32) -> Self {
        JobCommand::Generate {
            bank_id: bank_id.into(),
            count,
        }
    }

    pub fn pending_message(&self) -> String {
        match self {
            JobCommand::IngestAll => "Job started, waiting for completion...".to_string(),
            JobCommand::Ingest { bank_id } => format!("Starting ingestion for {}...", bank_id),
            JobCommand::Retrain => "Model retraining initiated...".to_string(),
            JobCommand::Generate { bank_id, count } => {
                format!("Triggering generation for {} with {} records...", bank_id, count)
            }
        }
    }

    pub fn success_message(&self, outcome: &JobOutcome) -> String {
        let server_message = match outcome {
            JobOutcome::Ack(ack) => ack.message(),
            JobOutcome::Generated(_) => None,
        };

        match (self, outcome) {
            (JobCommand::IngestAll, _) => {
                "Ingestion command sent. Data will refresh shortly.".to_string()
            }
            (JobCommand::Ingest { bank_id }, _) => server_message
                .map(str::to_string)
                .unwrap_or_else(|| format!("Ingestion started for {}.", bank_id)),
            (JobCommand::Retrain, _) => server_message
                .unwrap_or("Retraining started successfully.")
                .to_string(),
            (JobCommand::Generate { bank_id, .. }, JobOutcome::Generated(report)) => {
                format!("Generated {} records for {}.", report.records_generated, bank_id)
            }
            (JobCommand::Generate { bank_id, count }, JobOutcome::Ack(_)) => {
                format!("Generated {} records for {}.", count, bank_id)
            }
        }
    }

    pub fn failure_message(&self) -> String {
        match self {
            JobCommand::IngestAll => "Error starting job.".to_string(),
            JobCommand::Ingest { bank_id } => format!("Error starting ingestion for {}.", bank_id),
            JobCommand::Retrain => "Error initiating retraining.".to_string(),
            JobCommand::Generate { bank_id, .. } => {
                format!("Error triggering generation for {}.", bank_id)
            }
        }
    }

    pub fn follow_up(&self) -> Option<FollowUp> {
        match self {
            JobCommand::IngestAll | JobCommand::Ingest { .. } => {
                Some(FollowUp::NotifyRefresh(REFRESH_DELAY))
            }
            JobCommand::Generate { .. } => Some(FollowUp::ExpireMessage(MESSAGE_TTL)),
            // The 202 is an acknowledgement, there is nothing to refresh yet
            JobCommand::Retrain => None,
        }
    }

    async fn dispatch(&self, client: &ApiClient) -> Result<JobOutcome> {
        match self {
            JobCommand::IngestAll => client.start_ingestion_all().await.map(JobOutcome::Ack),
            JobCommand::Ingest { bank_id } => {
                client.start_ingestion(bank_id).await.map(JobOutcome::Ack)
            }
            JobCommand::Retrain => client.trigger_retraining().await.map(JobOutcome::Ack),
            JobCommand::Generate { bank_id, count } => client
                .generate_data(bank_id, *count)
                .await
                .map(JobOutcome::Generated),
        }
    }
}

/// Run `command` to completion and return its settled status.
///
/// Emits `Status(Loading)` before the request, `Status(Succeeded | Failed)`
/// once it settles, then on success waits out the follow-up delay and emits
/// `RefreshDue` or `MessageExpired`. The settled status is returned only
/// after the follow-up has fired.
pub async fn run_job<T, F>(
    client: &ApiClient,
    timer: &T,
    command: &JobCommand,
    mut on_event: F,
) -> JobStatus
where
    T: Timer + ?Sized,
    F: FnMut(JobEvent),
{
    on_event(JobEvent::Status(JobStatus::Loading(command.pending_message())));

    let settled = match command.dispatch(client).await {
        Ok(outcome) => {
            info!(command = ?command, outcome = ?outcome, "Job command accepted");
            JobStatus::Succeeded(command.success_message(&outcome))
        }
        Err(err) => {
            error!(command = ?command, status = ?err.status(), error = %err, "Job command failed");
            JobStatus::Failed(command.failure_message())
        }
    };
    on_event(JobEvent::Status(settled.clone()));

    if let JobStatus::Succeeded(_) = settled {
        match command.follow_up() {
            Some(FollowUp::NotifyRefresh(delay)) => {
                timer.sleep(delay).await;
                on_event(JobEvent::RefreshDue);
            }
            Some(FollowUp::ExpireMessage(delay)) => {
                timer.sleep(delay).await;
                on_event(JobEvent::MessageExpired);
            }
            None => {}
        }
    }

    settled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_loading_is_busy() {
        assert!(!JobStatus::Idle.is_busy());
        assert!(JobStatus::Loading("x".into()).is_busy());
        assert!(!JobStatus::Succeeded("x".into()).is_busy());
        assert!(!JobStatus::Failed("x".into()).is_busy());
    }

    #[test]
    fn test_expire_only_clears_success() {
        let mut done = JobStatus::Succeeded("Generated 5 records for BANK_A.".into());
        done.expire();
        assert_eq!(done, JobStatus::Idle);

        let mut running = JobStatus::Loading("Triggering...".into());
        running.expire();
        assert!(running.is_busy());

        let mut failed = JobStatus::Failed("Error".into());
        failed.expire();
        assert!(failed.is_failed());
    }

    #[test]
    fn test_retrain_prefers_server_message() {
        let ack = JobAck {
            status: Some("STARTED".into()),
            message: Some("Model retraining started in the background.".into()),
        };
        assert_eq!(
            JobCommand::Retrain.success_message(&JobOutcome::Ack(ack)),
            "Model retraining started in the background."
        );
        assert_eq!(
            JobCommand::Retrain.success_message(&JobOutcome::Ack(JobAck::default())),
            "Retraining started successfully."
        );
    }

    #[test]
    fn test_ingest_all_ignores_server_message() {
        let ack = JobAck {
            status: Some("STARTED".into()),
            message: Some("Ingestion job launched for all configured banks".into()),
        };
        assert_eq!(
            JobCommand::IngestAll.success_message(&JobOutcome::Ack(ack)),
            "Ingestion command sent. Data will refresh shortly."
        );
    }

    #[test]
    fn test_generation_messages() {
        let command = JobCommand::generate("BANK_A", 100);
        assert_eq!(
            command.pending_message(),
            "Triggering generation for BANK_A with 100 records..."
        );
        let report = GenerationReport {
            records_generated: 98,
            bank_id: None,
            status: None,
            message: None,
        };
        assert_eq!(
            command.success_message(&JobOutcome::Generated(report)),
            "Generated 98 records for BANK_A."
        );
        assert_eq!(command.failure_message(), "Error triggering generation for BANK_A.");
    }

    #[test]
    fn test_parse_record_count() {
        assert_eq!(parse_record_count("250"), Some(250));
        assert_eq!(parse_record_count(" 0 "), Some(0));
        assert_eq!(parse_record_count(""), None);
        assert_eq!(parse_record_count("-5"), None);
        assert_eq!(parse_record_count("12.5"), None);
        assert_eq!(parse_record_count("lots"), None);
    }

    #[test]
    fn test_follow_ups() {
        assert_eq!(
            JobCommand::IngestAll.follow_up(),
            Some(FollowUp::NotifyRefresh(Duration::from_millis(3000)))
        );
        assert_eq!(
            JobCommand::generate("BANK_B", 1).follow_up(),
            Some(FollowUp::ExpireMessage(Duration::from_millis(3000)))
        );
        assert_eq!(JobCommand::Retrain.follow_up(), None);
    }
}
