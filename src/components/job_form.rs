use leptos::prelude::*;

use crate::app::SessionSignal;
use crate::params::{JobParametersPatch, ProcessingMode};

fn coordinate_text(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}

/// Job parameter form. Numeric fields commit on `change` so partial input
/// such as `6.` is not reformatted while typing.
#[component]
pub fn JobForm(
    session: SessionSignal,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let params = move || session.with(|s| s.params());
    let pending = move || session.with(|s| s.is_pending());

    let edit = move |patch: JobParametersPatch| session.update(|s| s.edit(patch));

    view! {
        <section class="job-form">
            <h3>"Job Parameters"</h3>

            <div class="form-row">
                <div class="form-group">
                    <label for="job-lat">"Latitude"</label>
                    <input
                        id="job-lat"
                        type="number"
                        step="0.0001"
                        class="input"
                        prop:value=move || coordinate_text(params().latitude)
                        on:change=move |ev| {
                            let latitude = JobParametersPatch::parse_coordinate(&event_target_value(&ev));
                            edit(JobParametersPatch { latitude: Some(latitude), ..Default::default() });
                        }
                    />
                </div>
                <div class="form-group">
                    <label for="job-lon">"Longitude"</label>
                    <input
                        id="job-lon"
                        type="number"
                        step="0.0001"
                        class="input"
                        prop:value=move || coordinate_text(params().longitude)
                        on:change=move |ev| {
                            let longitude = JobParametersPatch::parse_coordinate(&event_target_value(&ev));
                            edit(JobParametersPatch { longitude: Some(longitude), ..Default::default() });
                        }
                    />
                </div>
            </div>
            <p class="input-hint">"Click the map to set the area of interest."</p>

            <div class="form-row">
                <div class="form-group">
                    <label for="job-start">"Start date"</label>
                    <input
                        id="job-start"
                        type="date"
                        class="input"
                        prop:value=move || params().start_date.format("%Y-%m-%d").to_string()
                        on:change=move |ev| {
                            if let Some(date) = JobParametersPatch::parse_date(&event_target_value(&ev)) {
                                edit(JobParametersPatch { start_date: Some(date), ..Default::default() });
                            }
                        }
                    />
                </div>
                <div class="form-group">
                    <label for="job-end">"End date"</label>
                    <input
                        id="job-end"
                        type="date"
                        class="input"
                        prop:value=move || params().end_date.format("%Y-%m-%d").to_string()
                        on:change=move |ev| {
                            if let Some(date) = JobParametersPatch::parse_date(&event_target_value(&ev)) {
                                edit(JobParametersPatch { end_date: Some(date), ..Default::default() });
                            }
                        }
                    />
                </div>
            </div>

            <div class="form-group">
                <label for="job-mode">"Processing mode"</label>
                <select
                    id="job-mode"
                    class="input"
                    on:change=move |ev| {
                        match event_target_value(&ev).parse::<ProcessingMode>() {
                            Ok(mode) => edit(JobParametersPatch { mode: Some(mode), ..Default::default() }),
                            Err(e) => tracing::warn!("{}", e),
                        }
                    }
                >
                    {ProcessingMode::ALL
                        .into_iter()
                        .map(|mode| {
                            view! {
                                <option value=mode.as_str() prop:selected=move || params().mode == mode>
                                    {mode.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="action-buttons">
                <button class="btn btn-primary" on:click=move |_| on_submit.run(())>
                    {move || if pending() { "Resubmit" } else { "Submit Job" }}
                </button>
                <Show when=pending>
                    <button class="btn btn-secondary" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                </Show>
            </div>
        </section>
    }
}
