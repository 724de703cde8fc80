//! Stat Panel Component
//!
//! One dashboard panel. Shows a placeholder until its own request settles,
//! independent of the other panels.

use leptos::prelude::*;
use portal_client::{DashboardPanel, PanelData};

#[component]
pub fn StatPanel(
    panel: DashboardPanel,
    data: LocalResource<Result<PanelData, String>>,
) -> impl IntoView {
    view! {
        <section class="card stat-panel">
            <h2>{panel.title()}</h2>
            <Suspense fallback=|| view! { <div class="loading">"Loading..."</div> }>
                {move || data.get().map(|result| match result {
                    Ok(data) if data.is_empty() => view! {
                        <p class="panel-empty">"No data yet."</p>
                    }.into_any(),
                    Ok(data) => view! {
                        <table class="stat-table">
                            {data.rows().into_iter().map(|(label, value)| view! {
                                <tr>
                                    <td class="stat-label">{label}</td>
                                    <td class="stat-value">{value}</td>
                                </tr>
                            }).collect_view()}
                        </table>
                    }.into_any(),
                    Err(_) => view! {
                        <p class="panel-error">"Could not load this panel."</p>
                    }.into_any(),
                })}
            </Suspense>
        </section>
    }
}
