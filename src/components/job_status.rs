//! Job Status
//!
//! Shared plumbing for every view that launches backend jobs: a status
//! signal, a launcher that drives the job lifecycle, and the line that
//! renders the current status.

use leptos::prelude::*;
use leptos::task::spawn_local;
use portal_client::{run_job, JobCommand, JobEvent, JobStatus};
use tracing::debug;

use crate::context::use_portal;
use crate::timer::BrowserTimer;

/// Create a status signal and a launcher for job commands.
///
/// Commands launched from one runner share its status, the way one card
/// shows a single message for all of its buttons. Launching while a command
/// is in flight is ignored. `on_refresh` runs when a command's refresh
/// delay has elapsed.
pub fn use_job_runner(
    on_refresh: Option<Callback<()>>,
) -> (ReadSignal<JobStatus>, Callback<JobCommand>) {
    let ctx = use_portal();
    let (status, set_status) = signal(JobStatus::Idle);

    let launch = Callback::new(move |command: JobCommand| {
        if status.get_untracked().is_busy() {
            return;
        }
        let client = ctx.client();
        spawn_local(async move {
            run_job(&client, &BrowserTimer, &command, |event| {
                apply_event(event, set_status, on_refresh)
            })
            .await;
        });
    });

    (status, launch)
}

/// Route one job event into the view.
///
/// The follow-up fires after a delay, so the page that launched the job may
/// already be gone: a disposed status signal ignores writes and a disposed
/// refresh callback is skipped.
fn apply_event(
    event: JobEvent,
    set_status: WriteSignal<JobStatus>,
    on_refresh: Option<Callback<()>>,
) {
    match event {
        JobEvent::Status(next) => set_status.set(next),
        JobEvent::RefreshDue => {
            if let Some(on_refresh) = on_refresh {
                if on_refresh.try_run(()).is_none() {
                    debug!("Refresh skipped, view already closed");
                }
            }
        }
        JobEvent::MessageExpired => set_status.update(JobStatus::expire),
    }
}

/// Spinner plus message for a job status; renders nothing while idle
#[component]
pub fn JobStatusLine(status: ReadSignal<JobStatus>) -> impl IntoView {
    let line_class = move || match status.get() {
        JobStatus::Failed(_) => "job-status error",
        JobStatus::Succeeded(_) => "job-status success",
        _ => "job-status",
    };

    view! {
        <Show when=move || status.with(|s| s.message().is_some())>
            <div class=line_class>
                <Show when=move || status.with(JobStatus::is_busy)>
                    <span class="spinner"></span>
                </Show>
                <span class="job-message">
                    {move || status.with(|s| s.message().unwrap_or_default().to_string())}
                </span>
            </div>
        </Show>
    }
}
