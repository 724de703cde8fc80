//! Dashboard Page Component
//!
//! Five analytics panels fetched in parallel, the job trigger card and the
//! on-demand top spenders panel. A completed trigger refetches all five
//! panels at once.

use leptos::prelude::*;
use portal_client::{fetch_panel, DashboardPanel};
use tracing::{debug, error};

use crate::components::{StatPanel, TopCustomersPanel, TriggerCard};
use crate::context::use_portal;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_portal();
    let refresh_trigger = ctx.refresh_trigger;

    let panels = DashboardPanel::ALL
        .into_iter()
        .map(|panel| {
            let data = LocalResource::new(move || {
                let round = refresh_trigger.get();
                let client = ctx.client();
                async move {
                    debug!(panel = ?panel, round, "Fetching dashboard panel");
                    fetch_panel(&client, panel).await.map_err(|err| {
                        error!(panel = ?panel, status = ?err.status(), error = %err, "Dashboard panel failed");
                        err.to_string()
                    })
                }
            });
            view! { <StatPanel panel=panel data=data /> }
        })
        .collect_view();

    view! {
        <div class="dashboard-page">
            <TriggerCard on_job_triggered=Callback::new(move |_: ()| ctx.refresh_dashboard()) />
            <div class="panel-grid">
                {panels}
            </div>
            <TopCustomersPanel />
        </div>
    }
}
