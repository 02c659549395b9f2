use dioxus::document::{Meta, Title};
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaLocationDot;
use dioxus_free_icons::Icon;
#[cfg(feature = "web")]
use dioxus_logger::tracing;

use crate::{
    client::components::Page,
    model::map::{MapDto, MarkerDto},
};

/// OpenStreetMap embed centred on `(latitude, longitude)` at roughly `zoom`
fn embed_url(latitude: f64, longitude: f64, zoom: u8) -> String {
    // Half-width of the bounding box in degrees for the given zoom level
    let span = 360.0 / 2f64.powi(zoom as i32);
    format!(
        "https://www.openstreetmap.org/export/embed.html?bbox={:.4},{:.4},{:.4},{:.4}&layer=mapnik",
        longitude - span,
        latitude - span / 2.0,
        longitude + span,
        latitude + span / 2.0,
    )
}

#[component]
pub fn Map(subdivision_id: Option<i32>) -> Element {
    let mut map = use_signal(|| None::<MapDto>);
    let mut error = use_signal(|| None::<String>);
    // Marker the embedded map is centred on, `None` for the default view
    let mut focus = use_signal(|| None::<MarkerDto>);

    #[cfg(feature = "web")]
    {
        use crate::client::util::api::get_map;

        let overlay = use_resource(use_reactive!(|(subdivision_id,)| async move {
            get_map(subdivision_id).await
        }));

        use_effect(move || match &*overlay.read() {
            Some(Ok(data)) => map.set(Some(data.clone())),
            Some(Err(err)) => {
                tracing::error!("Map fetch failed: {}", err);
                error.set(Some(err.to_string()));
            }
            None => (),
        });
    }

    let data = map();

    rsx!(
        Title { "Map | Floodwatch" }
        Meta {
            name: "description",
            content: "Relief camps, open SOS alerts and resources on the map."
        }
        Page { class: "flex flex-col items-center",
            div { class: "w-full max-w-[1440px] flex flex-col gap-4",
                if let Some(err) = error() {
                    div { class: "alert alert-error", "{err}" }
                }
                if let Some(data) = data {
                    {
                        let src = match focus() {
                            Some(marker) => embed_url(marker.latitude, marker.longitude, 14),
                            None => embed_url(data.view.latitude, data.view.longitude, data.view.zoom),
                        };
                        rsx! {
                            iframe {
                                class: "w-full h-[480px] rounded",
                                src: "{src}",
                                title: "Situation map",
                            }
                        }
                    }
                    p { class: "text-xs opacity-70",
                        "Map data © "
                        a { class: "link", href: "https://www.openstreetmap.org/copyright", "OpenStreetMap" }
                        " contributors"
                    }
                    if !data.skipped.is_empty() {
                        p { class: "text-xs opacity-70",
                            "{data.skipped.len()} record(s) have no usable location and are not shown"
                        }
                    }
                    ul { class: "grid gap-2 md:grid-cols-2 lg:grid-cols-3",
                        for marker in data.markers.clone() {
                            li { key: "{marker.badge}-{marker.record_id}",
                                MarkerCard { marker: marker.clone(), on_focus: move |m| focus.set(Some(m)) }
                            }
                        }
                    }
                } else {
                    div { class: "skeleton h-[480px] w-full" }
                }
            }
        }
    )
}

#[component]
fn MarkerCard(marker: MarkerDto, on_focus: EventHandler<MarkerDto>) -> Element {
    let badge_class = match marker.color.as_str() {
        "red" => "badge badge-error",
        "green" => "badge badge-success",
        _ => "badge badge-info",
    };

    rsx!(
        div { class: "card card-compact shadow-sm",
            div { class: "card-body",
                div { class: "flex items-center justify-between gap-2",
                    span { class: "{badge_class}", "{marker.badge}" }
                    button {
                        class: "btn btn-ghost btn-xs",
                        onclick: {
                            let marker = marker.clone();
                            move |_| on_focus.call(marker.clone())
                        },
                        Icon { width: 14, height: 14, icon: FaLocationDot }
                        "{marker.latitude:.4}, {marker.longitude:.4}"
                    }
                }
                p { class: "font-semibold", "{marker.name}" }
                p { class: "text-sm", "{marker.details}" }
            }
        }
    )
}
