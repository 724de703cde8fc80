//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use portal_client::ApiClient;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct PortalContext {
    /// Backend client, shared by every view
    client: StoredValue<ApiClient, LocalStorage>,
    /// Bumped to make the dashboard refetch every panel - read
    pub refresh_trigger: ReadSignal<u32>,
    /// Bumped to make the dashboard refetch every panel - write
    set_refresh_trigger: WriteSignal<u32>,
}

impl PortalContext {
    pub fn new(client: ApiClient, refresh_trigger: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        Self {
            client: StoredValue::new_local(client),
            refresh_trigger: refresh_trigger.0,
            set_refresh_trigger: refresh_trigger.1,
        }
    }

    pub fn client(&self) -> ApiClient {
        self.client.get_value()
    }

    /// Ask the dashboard to reload all panels
    pub fn refresh_dashboard(&self) {
        self.set_refresh_trigger.update(|v| *v += 1);
    }
}

pub fn use_portal() -> PortalContext {
    expect_context::<PortalContext>()
}
