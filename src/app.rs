//! Data Engineering Portal App
//!
//! Top-level shell: navigation bar plus the active page.

use leptos::prelude::*;
use portal_client::ApiClient;

use crate::components::{
    DashboardPage, DataGenerationPage, DataModelingPage, NavBar, SegmentPredictor,
};
use crate::config;
use crate::context::PortalContext;

/// Pages reachable from the navigation bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Predict,
    Generate,
    Modeling,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Dashboard, Page::Predict, Page::Generate, Page::Modeling];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Predict => "Segment Predictor",
            Page::Generate => "Data Generation",
            Page::Modeling => "Data Modeling",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let (current_page, set_current_page) = signal(Page::Dashboard);
    let refresh_trigger = signal(0u32);

    let client = ApiClient::new(config::portal_config());
    provide_context(PortalContext::new(client, refresh_trigger));

    view! {
        <div class="portal-layout">
            <NavBar current_page=current_page set_current_page=set_current_page />

            <main class="portal-content">
                {move || match current_page.get() {
                    Page::Dashboard => view! { <DashboardPage /> }.into_any(),
                    Page::Predict => view! { <SegmentPredictor /> }.into_any(),
                    Page::Generate => view! { <DataGenerationPage /> }.into_any(),
                    Page::Modeling => view! { <DataModelingPage /> }.into_any(),
                }}
            </main>
        </div>
    }
}
