//! Navigation Bar Component
//!
//! Tab bar for switching between portal pages.

use leptos::prelude::*;

use crate::app::Page;

#[component]
pub fn NavBar(current_page: ReadSignal<Page>, set_current_page: WriteSignal<Page>) -> impl IntoView {
    view! {
        <nav class="portal-nav">
            <span class="portal-title">"Data Engineering Portal"</span>
            <div class="portal-tabs">
                {Page::ALL.iter().map(|page| {
                    let page = *page;
                    let tab_class = move || {
                        if current_page.get() == page { "portal-tab active" } else { "portal-tab" }
                    };
                    view! {
                        <button class=tab_class on:click=move |_| set_current_page.set(page)>
                            {page.label()}
                        </button>
                    }
                }).collect_view()}
            </div>
        </nav>
    }
}
