//! Trigger Card Component
//!
//! Dashboard card that launches ingestion for all banks or a model
//! retrain. After a successful ingestion it tells the parent to refresh,
//! once the fixed refresh delay has passed.

use leptos::prelude::*;
use portal_client::JobCommand;

use crate::components::{use_job_runner, JobStatusLine};

#[component]
pub fn TriggerCard(#[prop(into)] on_job_triggered: Callback<()>) -> impl IntoView {
    let (status, launch) = use_job_runner(Some(on_job_triggered));
    let busy = move || status.with(|s| s.is_busy());

    view! {
        <section class="card trigger-card">
            <h2>"Pipeline Jobs"</h2>
            <div class="card-actions">
                <button
                    class="primary-btn"
                    disabled=busy
                    on:click=move |_| launch.run(JobCommand::IngestAll)
                >
                    "Run Ingestion (All Banks)"
                </button>
                <button
                    class="secondary-btn"
                    disabled=busy
                    on:click=move |_| launch.run(JobCommand::Retrain)
                >
                    "Retrain Model"
                </button>
            </div>
            <JobStatusLine status=status />
        </section>
    }
}
