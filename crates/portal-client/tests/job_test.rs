//! Job lifecycle tests: status transitions and delayed follow-ups.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use portal_client::{run_job, ApiClient, JobCommand, JobEvent, JobStatus, PortalConfig, Timer};
use tokio::sync::oneshot;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Timer that completes immediately and records what it was asked for
#[derive(Default)]
struct RecordingTimer {
    sleeps: RefCell<Vec<Duration>>,
}

#[async_trait(?Send)]
impl Timer for RecordingTimer {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}

/// Timer that completes only when the test opens the gate
struct GateTimer {
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

#[async_trait(?Send)]
impl Timer for GateTimer {
    async fn sleep(&self, _duration: Duration) {
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(PortalConfig::new(server.uri()).unwrap())
}

async fn ingestion_server(status: u16) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/ingestion/start-all"))
        .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
            "status": "STARTED",
            "message": "Ingestion job launched for all configured banks"
        })))
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_ingestion_success_refreshes_after_delay() {
    let mock_server = ingestion_server(200).await;
    let timer = RecordingTimer::default();
    let mut events = Vec::new();

    let settled = run_job(
        &client_for(&mock_server),
        &timer,
        &JobCommand::IngestAll,
        |event| events.push(event),
    )
    .await;

    assert_eq!(
        settled,
        JobStatus::Succeeded("Ingestion command sent. Data will refresh shortly.".into())
    );
    assert_eq!(
        events,
        vec![
            JobEvent::Status(JobStatus::Loading(
                "Job started, waiting for completion...".into()
            )),
            JobEvent::Status(settled.clone()),
            JobEvent::RefreshDue,
        ]
    );
    assert_eq!(*timer.sleeps.borrow(), vec![Duration::from_millis(3000)]);
}

#[tokio::test]
async fn test_refresh_does_not_fire_before_delay_elapses() {
    let mock_server = ingestion_server(200).await;
    let (open_gate, gate) = oneshot::channel();
    let timer = GateTimer {
        gate: RefCell::new(Some(gate)),
    };
    let events = Rc::new(RefCell::new(Vec::new()));
    let client = client_for(&mock_server);

    let sink = events.clone();
    let job = run_job(&client, &timer, &JobCommand::IngestAll, move |event| {
        sink.borrow_mut().push(event)
    });

    let observer = async {
        // Wait for the request to settle
        for _ in 0..500 {
            if events.borrow().len() >= 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let seen = events.borrow().clone();
        assert!(matches!(seen[1], JobEvent::Status(JobStatus::Succeeded(_))));
        assert!(!seen.contains(&JobEvent::RefreshDue));
        open_gate.send(()).unwrap();
    };

    let (settled, ()) = tokio::join!(job, observer);
    assert!(!settled.is_busy());
    assert_eq!(events.borrow().last(), Some(&JobEvent::RefreshDue));
}

#[tokio::test]
async fn test_ingestion_failure_reports_generic_error() {
    let mock_server = ingestion_server(500).await;
    let timer = RecordingTimer::default();
    let mut statuses = Vec::new();

    let settled = run_job(
        &client_for(&mock_server),
        &timer,
        &JobCommand::IngestAll,
        |event| {
            if let JobEvent::Status(status) = event {
                statuses.push(status);
            }
        },
    )
    .await;

    assert_eq!(settled, JobStatus::Failed("Error starting job.".into()));
    assert!(!settled.is_busy());
    assert_eq!(statuses.len(), 2);
    assert!(statuses[0].is_busy());
    // No refresh is scheduled after a failure
    assert!(timer.sleeps.borrow().is_empty());
}

#[tokio::test]
async fn test_failure_replaces_previous_success_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/segmentation/trigger-training"))
        .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
            "message": "Model retraining started in the background."
        })))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/segmentation/trigger-training"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let timer = RecordingTimer::default();
    let mut status = JobStatus::Idle;

    run_job(&client, &timer, &JobCommand::Retrain, |event| {
        if let JobEvent::Status(s) = event {
            status = s;
        }
    })
    .await;
    assert_eq!(
        status.message(),
        Some("Model retraining started in the background.")
    );

    run_job(&client, &timer, &JobCommand::Retrain, |event| {
        if let JobEvent::Status(s) = event {
            status = s;
        }
    })
    .await;
    assert_eq!(status, JobStatus::Failed("Error initiating retraining.".into()));
    assert!(!status.is_busy());
    // Retraining never schedules a follow-up
    assert!(timer.sleeps.borrow().is_empty());
}

#[tokio::test]
async fn test_generation_message_expires() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/generate/bank/BANK_A"))
        .and(query_param("count", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "recordsGenerated": "100"
        })))
        .mount(&mock_server)
        .await;

    let timer = RecordingTimer::default();
    let mut status = JobStatus::Idle;
    let mut expired = false;

    run_job(
        &client_for(&mock_server),
        &timer,
        &JobCommand::generate("BANK_A", 100),
        |event| match event {
            JobEvent::Status(s) => status = s,
            JobEvent::MessageExpired => {
                assert_eq!(status.message(), Some("Generated 100 records for BANK_A."));
                expired = true;
                status.expire();
            }
            JobEvent::RefreshDue => panic!("generation does not refresh the dashboard"),
        },
    )
    .await;

    assert!(expired);
    assert_eq!(status, JobStatus::Idle);
    assert_eq!(*timer.sleeps.borrow(), vec![Duration::from_millis(3000)]);
}

#[tokio::test]
async fn test_generation_failure_names_bank() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/generate/bank/BANK_B"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&mock_server)
        .await;

    let settled = run_job(
        &client_for(&mock_server),
        &RecordingTimer::default(),
        &JobCommand::generate("BANK_B", 100),
        |_| {},
    )
    .await;

    assert_eq!(
        settled,
        JobStatus::Failed("Error triggering generation for BANK_B.".into())
    );
}
