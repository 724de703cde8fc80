//! Segment Predictor Component
//!
//! Six spending inputs and a submit button. The profile is validated locally
//! before anything is sent; the first returned cluster id is shown.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use portal_client::{predict_first, SpendingCategory, SpendingForm};
use tracing::{error, warn};

use crate::context::use_portal;

#[component]
pub fn SegmentPredictor() -> impl IntoView {
    let ctx = use_portal();

    let form = RwSignal::new(SpendingForm::default());
    let (is_loading, set_is_loading) = signal(false);
    let (predicted_segment, set_predicted_segment) = signal::<Option<u32>>(None);
    let (form_error, set_form_error) = signal::<Option<String>>(None);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let profile = match form.with_untracked(|f| f.profile()) {
            Ok(profile) => profile,
            Err(err) => {
                warn!(error = %err, "Prediction form rejected");
                set_form_error.set(Some(err.to_string()));
                return;
            }
        };

        set_form_error.set(None);
        set_is_loading.set(true);
        set_predicted_segment.set(None);
        let client = ctx.client();
        spawn_local(async move {
            match predict_first(&client, profile).await {
                Ok(segment) => set_predicted_segment.set(segment),
                Err(err) => {
                    error!(status = ?err.status(), error = %err, "Segment prediction failed");
                    set_predicted_segment.set(None);
                }
            }
            set_is_loading.set(false);
        });
    };

    let submit_disabled = move || is_loading.get() || !form.with(|f| f.is_valid());

    view! {
        <div class="segment-predictor">
            <section class="card">
                <h2>"Predict Customer Segment"</h2>
                <form class="predictor-form" on:submit=on_submit>
                    {SpendingCategory::ALL.into_iter().map(|category| view! {
                        <label class="field">
                            {category.label()}
                            <input
                                type="number"
                                min="0"
                                step="any"
                                required
                                prop:value=move || form.with(|f| f.value(category).to_string())
                                on:input=move |ev| {
                                    let raw = event_target_value(&ev);
                                    form.update(|f| f.set(category, raw));
                                }
                            />
                        </label>
                    }).collect_view()}
                    <button type="submit" class="primary-btn" disabled=submit_disabled>
                        {move || if is_loading.get() { "Predicting..." } else { "Predict Segment" }}
                    </button>
                </form>

                {move || form_error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}

                {move || predicted_segment.get().map(|segment| view! {
                    <div class="prediction-result">
                        <span class="stat-label">"Predicted Segment"</span>
                        <span class="stat-value">{segment}</span>
                    </div>
                })}
            </section>
        </div>
    }
}
