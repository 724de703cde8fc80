//! Top Customers Panel Component
//!
//! Date range form for the top spenders ranking. Fetches only when the form
//! is submitted and is not part of the dashboard refresh.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use portal_client::dashboard::{format_money, DEFAULT_TOP_CUSTOMERS_LIMIT};
use portal_client::{TopCustomersQuery, TopSpender};
use tracing::{error, warn};

use crate::context::use_portal;

#[component]
pub fn TopCustomersPanel() -> impl IntoView {
    let ctx = use_portal();

    let (start, set_start) = signal(String::new());
    let (end, set_end) = signal(String::new());
    let (limit, set_limit) = signal(DEFAULT_TOP_CUSTOMERS_LIMIT.to_string());
    let (is_loading, set_is_loading) = signal(false);
    let (form_error, set_form_error) = signal::<Option<String>>(None);
    let (ranking, set_ranking) = signal::<Option<Result<Vec<TopSpender>, String>>>(None);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let query = match TopCustomersQuery::from_inputs(
            &start.get_untracked(),
            &end.get_untracked(),
            &limit.get_untracked(),
        ) {
            Ok(query) => query,
            Err(err) => {
                warn!(error = %err, "Top customers form rejected");
                set_form_error.set(Some(err.to_string()));
                return;
            }
        };

        set_form_error.set(None);
        set_is_loading.set(true);
        let client = ctx.client();
        spawn_local(async move {
            let result = query.fetch(&client).await.map_err(|err| {
                error!(status = ?err.status(), error = %err, "Top customers request failed");
                "Could not load top customers.".to_string()
            });
            set_ranking.set(Some(result));
            set_is_loading.set(false);
        });
    };

    view! {
        <section class="card top-customers-panel">
            <h2>"Top Spenders"</h2>
            <form class="inline-form" on:submit=on_submit>
                <label>
                    "From"
                    <input
                        type="date"
                        required
                        prop:value=move || start.get()
                        on:input=move |ev| set_start.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "To"
                    <input
                        type="date"
                        required
                        prop:value=move || end.get()
                        on:input=move |ev| set_end.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Limit"
                    <input
                        type="number"
                        min="1"
                        prop:value=move || limit.get()
                        on:input=move |ev| set_limit.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="primary-btn" disabled=move || is_loading.get()>
                    "Show"
                </button>
            </form>

            {move || form_error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}

            <Show when=move || is_loading.get()>
                <div class="loading">"Loading..."</div>
            </Show>

            {move || ranking.get().map(|result| match result {
                Ok(rows) if rows.is_empty() => view! {
                    <p class="panel-empty">"No transactions in this range."</p>
                }.into_any(),
                Ok(rows) => view! {
                    <ol class="ranking">
                        {rows.into_iter().map(|row| view! {
                            <li>
                                <span class="stat-label">{row.customer_id}</span>
                                <span class="stat-value">{format_money(row.total_spent)}</span>
                            </li>
                        }).collect_view()}
                    </ol>
                }.into_any(),
                Err(msg) => view! { <p class="panel-error">{msg}</p> }.into_any(),
            })}
        </section>
    }
}
