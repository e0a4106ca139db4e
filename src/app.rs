use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

use crate::config::AppConfig;
use crate::pages::processing::ProcessingPage;
use crate::resources::BlobUrls;
use crate::session::JobSession;

/// The page's one job session. Local storage: it owns `!Send` image handles.
pub type SessionSignal = RwSignal<JobSession<BlobUrls>, LocalStorage>;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1 class="app-title">"Sentinel Console"</h1>
                <p class="app-subtitle">"Satellite imagery processing"</p>
            </header>
            <main class="content">
                <ProcessingPage config=config />
            </main>
        </div>
    }
}
