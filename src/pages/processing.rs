//! The processing page: map, parameter form and result panel.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{HttpProcessingService, ProcessingService};
use crate::app::SessionSignal;
use crate::components::job_form::JobForm;
use crate::components::map_view::MapView;
use crate::components::result_panel::ResultPanel;
use crate::config::AppConfig;
use crate::params::JobParameters;
use crate::resources::BlobUrls;
use crate::session::JobSession;

#[component]
pub fn ProcessingPage(config: AppConfig) -> impl IntoView {
    let session: SessionSignal = RwSignal::new_local(JobSession::new(JobParameters::default(), BlobUrls));
    let service = StoredValue::new_local(HttpProcessingService::new(config.process_url()));

    let on_submit = Callback::new(move |_: ()| {
        let Some(ticket) = session.try_update(|s| s.begin()) else {
            return;
        };
        let service = service.get_value();
        spawn_local(async move {
            let result = service.process(&ticket.request).await;
            // The page may have been unmounted while the request was out
            session.try_update(|s| s.complete(ticket.sequence, result));
        });
    });

    let on_cancel = Callback::new(move |_: ()| {
        service.with_value(|s| s.abort());
        session.update(|s| {
            s.cancel();
        });
    });

    on_cleanup(move || {
        service.try_with_value(|s| s.abort());
        session.try_update(|s| s.release());
    });

    view! {
        <div class="page processing-page">
            <style>{include_str!("processing.css")}</style>

            <h2>"Imagery Processing"</h2>
            <p class="page-description">
                "Pick a location, choose a date range and processing mode, then submit the job."
            </p>

            <div class="processing-layout">
                <div class="processing-controls">
                    <MapView session=session />
                    <JobForm session=session on_submit=on_submit on_cancel=on_cancel />
                </div>
                <ResultPanel session=session />
            </div>
        </div>
    }
}
