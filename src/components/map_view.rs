use leptos::html::Div;
use leptos::prelude::*;

use crate::app::SessionSignal;
use crate::map::MapWidget;

/// Leaflet map for picking the AOI. The marker tracks the current parameters.
#[component]
pub fn MapView(session: SessionSignal) -> impl IntoView {
    let container = NodeRef::<Div>::new();
    let widget = StoredValue::new_local(None::<MapWidget>);

    // Mount once the container is in the DOM
    Effect::new(move |_| {
        let Some(el) = container.get() else {
            return;
        };
        if widget.with_value(|w| w.is_some()) {
            return;
        }
        let params = session.with_untracked(|s| s.params());
        let mounted = MapWidget::mount(&el, params.latitude, params.longitude, move |click| {
            session.update(|s| s.pick(click));
        });
        widget.set_value(mounted);
    });

    // Follow clicks and manual edits alike
    Effect::new(move |_| {
        let (lat, lon) = session.with(|s| {
            let p = s.params();
            (p.latitude, p.longitude)
        });
        widget.with_value(|w| {
            if let Some(w) = w {
                w.show_marker(lat, lon);
            }
        });
    });

    on_cleanup(move || {
        widget.try_update_value(|w| {
            if let Some(w) = w.take() {
                w.destroy();
            }
        });
    });

    view! {
        <div class="map-panel">
            <div node_ref=container class="map-container"></div>
        </div>
    }
}
