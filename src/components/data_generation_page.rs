//! Data Generation Page Component
//!
//! Asks the generation service for N synthetic transactions for a bank and
//! reports how many were written. The result clears itself after a few
//! seconds.

use leptos::prelude::*;
use portal_client::job::{parse_record_count, DEFAULT_RECORD_COUNT};
use portal_client::{JobCommand, BANKS};

use crate::components::{use_job_runner, JobStatusLine};

#[component]
pub fn DataGenerationPage() -> impl IntoView {
    let (status, launch) = use_job_runner(None);
    let (count, set_count) = signal(DEFAULT_RECORD_COUNT);
    let (count_rejected, set_count_rejected) = signal(false);
    let busy = move || status.with(|s| s.is_busy());

    view! {
        <div class="data-generation-page">
            <section class="card">
                <h2>"Generate Synthetic Transactions"</h2>
                <label class="field">
                    "Records"
                    <input
                        type="number"
                        min="0"
                        prop:value=move || count.get().to_string()
                        on:input=move |ev| {
                            // Keep the last valid count while the user is typing
                            match parse_record_count(&event_target_value(&ev)) {
                                Some(n) => {
                                    set_count.set(n);
                                    set_count_rejected.set(false);
                                }
                                None => set_count_rejected.set(true),
                            }
                        }
                    />
                </label>
                <Show when=move || count_rejected.get()>
                    <p class="form-error">
                        {move || format!(
                            "Not a whole number of records; {} will be requested.",
                            count.get(),
                        )}
                    </p>
                </Show>
                <div class="card-actions">
                    {BANKS.iter().map(|bank| {
                        let bank = *bank;
                        view! {
                            <button
                                class="primary-btn"
                                disabled=busy
                                on:click=move |_| launch.run(JobCommand::generate(bank, count.get_untracked()))
                            >
                                {format!("Generate for {}", bank)}
                            </button>
                        }
                    }).collect_view()}
                </div>
                <JobStatusLine status=status />
            </section>
        </div>
    }
}
