use dioxus::document::{Meta, Title};
use dioxus::prelude::*;
#[cfg(feature = "web")]
use dioxus_logger::tracing;

use crate::{
    client::{components::Page, util::time::format_relative_time},
    model::{
        camp::{CampDto, CampStatus},
        dashboard::DashboardDto,
        emergency::{EmergencyDto, RequestStatus},
        resource::{ResourceDto, ResourceStatus},
        water_level::WaterLevelDto,
    },
};

#[component]
pub fn Dashboard(subdivision_id: Option<i32>) -> Element {
    let mut dashboard = use_signal(|| None::<DashboardDto>);
    let mut water_levels = use_signal(Vec::<WaterLevelDto>::new);
    let mut error = use_signal(|| None::<String>);
    // Bumped by the refresh loop and after every mutation to trigger a re-fetch
    let mut refresh = use_signal(|| 0_u64);

    #[cfg(feature = "web")]
    {
        use crate::client::util::{
            api::{get_dashboard, get_water_levels},
            time::sleep_secs,
        };

        let snapshot = use_resource(use_reactive!(|(subdivision_id,)| async move {
            refresh();
            get_dashboard(subdivision_id).await
        }));

        use_effect(move || match &*snapshot.read() {
            Some(Ok(data)) => {
                dashboard.set(Some(data.clone()));
                error.set(None);
            }
            Some(Err(err)) => {
                tracing::error!("Dashboard fetch failed: {}", err);
                error.set(Some(err.to_string()));
            }
            None => (),
        });

        let levels = use_resource(|| async move { get_water_levels().await });
        use_effect(move || {
            if let Some(Ok(levels)) = &*levels.read() {
                water_levels.set(levels.clone());
            }
        });

        // Dropped with the component, so the loop stops on unmount
        use_future(move || async move {
            loop {
                let interval = dashboard
                    .peek()
                    .as_ref()
                    .map(|d| d.refresh_interval_secs)
                    .unwrap_or(30);
                sleep_secs(interval).await;
                *refresh.write() += 1;
            }
        });
    }

    let on_resolve = move |id: i32| {
        #[cfg(feature = "web")]
        spawn(async move {
            use crate::client::util::api::resolve_emergency;

            match resolve_emergency(id).await {
                Ok(_) => *refresh.write() += 1,
                Err(err) => {
                    tracing::error!("Failed to resolve request {}: {}", id, err);
                    error.set(Some(err.to_string()));
                }
            }
        });

        #[cfg(not(feature = "web"))]
        {
            let _ = id;
            *refresh.write() += 1;
        }
    };

    let snapshot = dashboard();

    rsx!(
        Title { "Dashboard | Floodwatch" }
        Meta {
            name: "description",
            content: "Responder dashboard: open SOS requests, relief camps and resources."
        }
        Page { class: "flex flex-col items-center",
            div { class: "w-full max-w-[1440px] flex flex-col gap-4",
                if let Some(err) = error() {
                    div { class: "alert alert-error", "{err}" }
                }
                if let Some(data) = snapshot {
                    p { class: "text-xs opacity-70",
                        {format!("Updated {} UTC, refreshes every {}s", data.fetched_at.format("%H:%M:%S"), data.refresh_interval_secs)}
                    }
                    div { class: "grid gap-4 lg:grid-cols-2",
                        EmergencyCard {
                            emergencies: data.emergencies.clone(),
                            now: data.fetched_at,
                            on_resolve: on_resolve,
                        }
                        div { class: "flex flex-col gap-4",
                            CampCard { camps: data.camps.clone() }
                            ResourceCard { resources: data.resources.clone() }
                            WaterLevelCard { levels: water_levels() }
                        }
                    }
                } else {
                    div { class: "skeleton h-64 w-full" }
                }
            }
        }
    )
}

#[component]
fn EmergencyCard(
    emergencies: Vec<EmergencyDto>,
    now: chrono::NaiveDateTime,
    on_resolve: EventHandler<i32>,
) -> Element {
    let open = emergencies
        .iter()
        .filter(|e| e.status == RequestStatus::Pending)
        .count();

    rsx!(
        div { class: "card shadow-sm",
            div { class: "card-body",
                h2 { class: "card-title", "SOS requests ({open} open)" }
                if emergencies.is_empty() {
                    p { class: "opacity-70", "No requests" }
                }
                ul { class: "flex flex-col gap-2",
                    for request in emergencies {
                        li { key: "{request.id}",
                            class: "flex justify-between gap-2 border-b border-base-300 pb-2",
                            div {
                                p { class: "font-semibold", "{request.location}" }
                                p { class: "text-sm", "{request.description}" }
                                p { class: "text-xs opacity-70",
                                    {format_relative_time(&request.timestamp, &now)}
                                    if let Some(people) = request.affected_people {
                                        " · {people} people"
                                    }
                                    if let Some(phone) = request.contact_phone.clone() {
                                        " · {phone}"
                                    }
                                }
                            }
                            if request.status == RequestStatus::Pending {
                                button {
                                    class: "btn btn-sm btn-success",
                                    onclick: move |_| on_resolve.call(request.id),
                                    "Resolve"
                                }
                            } else {
                                span { class: "badge badge-ghost", "Resolved" }
                            }
                        }
                    }
                }
            }
        }
    )
}

#[component]
fn CampCard(camps: Vec<CampDto>) -> Element {
    rsx!(
        div { class: "card shadow-sm",
            div { class: "card-body",
                h2 { class: "card-title", "Relief camps" }
                table { class: "table table-sm",
                    thead {
                        tr {
                            th { "Camp" }
                            th { "Occupancy" }
                            th { "Status" }
                        }
                    }
                    tbody {
                        for camp in camps {
                            tr { key: "{camp.id}",
                                td { "{camp.name}" }
                                td { "{camp.current_occupancy} / {camp.capacity}" }
                                td {
                                    span {
                                        class: match camp.status {
                                            CampStatus::Active => "badge badge-success",
                                            CampStatus::Full => "badge badge-warning",
                                            CampStatus::Closed => "badge badge-ghost",
                                        },
                                        {format!("{:?}", camp.status)}
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

#[component]
fn ResourceCard(resources: Vec<ResourceDto>) -> Element {
    rsx!(
        div { class: "card shadow-sm",
            div { class: "card-body",
                h2 { class: "card-title", "Resources" }
                table { class: "table table-sm",
                    thead {
                        tr {
                            th { "Resource" }
                            th { "Quantity" }
                            th { "Status" }
                        }
                    }
                    tbody {
                        for resource in resources {
                            tr { key: "{resource.id}",
                                td { "{resource.name}" }
                                td { "{resource.quantity} {resource.unit}" }
                                td {
                                    span {
                                        class: match resource.status {
                                            ResourceStatus::Available => "badge badge-success",
                                            ResourceStatus::Low => "badge badge-warning",
                                            ResourceStatus::Unavailable => "badge badge-error",
                                        },
                                        {format!("{:?}", resource.status)}
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

#[component]
fn WaterLevelCard(levels: Vec<WaterLevelDto>) -> Element {
    rsx!(
        div { class: "card shadow-sm",
            div { class: "card-body",
                h2 { class: "card-title", "Reservoir levels" }
                for level in levels {
                    div { key: "{level.dam_name}", class: "flex flex-col gap-1",
                        div { class: "flex justify-between text-sm",
                            span { "{level.dam_name} ({level.district})" }
                            span { "{level.current_level:.1} / {level.full_reservoir_level:.1} m" }
                        }
                        progress {
                            class: if level.storage_percentage >= 90.0 { "progress progress-error" } else { "progress progress-info" },
                            value: "{level.storage_percentage}",
                            max: "100",
                        }
                    }
                }
            }
        }
    )
}
