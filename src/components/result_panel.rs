use leptos::prelude::*;

use crate::app::SessionSignal;
use crate::presenter::{present, ResultView};

#[component]
pub fn ResultPanel(session: SessionSignal) -> impl IntoView {
    // Re-render only when the derived view changes, not on parameter edits
    let current = Memo::new(move |_| session.with(|s| present(s.outcome())));

    view! {
        <section class="result-panel">
            {move || match current.get() {
                ResultView::Progress => view! {
                    <div class="loading-indicator">
                        <div class="spinner"></div>
                        <p>"Processing imagery..."</p>
                    </div>
                }.into_any(),

                ResultView::Error(msg) => view! {
                    <div class="error-state">
                        <div class="error-message">
                            <h3>"Error"</h3>
                            <p>{msg}</p>
                        </div>
                    </div>
                }.into_any(),

                ResultView::Timeline(entries) => view! {
                    <ul class="timeline">
                        {entries
                            .into_iter()
                            .map(|entry| {
                                let alt = format!("Imagery from {}", entry.label);
                                view! {
                                    <li class="timeline-item">
                                        <img src=entry.image alt=alt class="timeline-image" />
                                        <span class="timeline-date">{entry.label}</span>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }.into_any(),

                ResultView::Image(src) => view! {
                    <div class="single-result">
                        <img src=src alt="Processed imagery" class="result-image" />
                    </div>
                }.into_any(),

                ResultView::Message(msg) => view! {
                    <div class="result-message">
                        <p>{msg}</p>
                    </div>
                }.into_any(),
            }}
        </section>
    }
}
