//! Data Modeling Page Component
//!
//! Ingestion and retraining controls outside the dashboard, with per-bank
//! ingestion added. One status line is shared by every button on the page.

use leptos::prelude::*;
use portal_client::{JobCommand, BANKS};

use crate::components::{use_job_runner, JobStatusLine};
use crate::context::use_portal;

#[component]
pub fn DataModelingPage() -> impl IntoView {
    let ctx = use_portal();
    let on_refresh = Callback::new(move |_: ()| ctx.refresh_dashboard());
    let (status, launch) = use_job_runner(Some(on_refresh));
    let busy = move || status.with(|s| s.is_busy());

    view! {
        <div class="data-modeling-page">
            <section class="card">
                <h2>"Data Ingestion"</h2>
                <div class="card-actions">
                    <button
                        class="primary-btn"
                        disabled=busy
                        on:click=move |_| launch.run(JobCommand::IngestAll)
                    >
                        "Ingest All Banks"
                    </button>
                    {BANKS.iter().map(|bank| {
                        let bank = *bank;
                        view! {
                            <button
                                class="secondary-btn"
                                disabled=busy
                                on:click=move |_| launch.run(JobCommand::Ingest { bank_id: bank.to_string() })
                            >
                                {format!("Ingest {}", bank)}
                            </button>
                        }
                    }).collect_view()}
                </div>
            </section>

            <section class="card">
                <h2>"Segmentation Model"</h2>
                <div class="card-actions">
                    <button
                        class="primary-btn"
                        disabled=busy
                        on:click=move |_| launch.run(JobCommand::Retrain)
                    >
                        "Retrain Model"
                    </button>
                </div>
            </section>

            <JobStatusLine status=status />
        </div>
    }
}
