use dioxus::prelude::*;

use crate::client::{components::FloodwatchTitleButton, router::Route};

#[component]
pub fn Navbar() -> Element {
    rsx! {
        div {
            class: "navbar bg-base-200 fixed",
            div {
                class: "navbar-start",
                FloodwatchTitleButton {}
            }
            div {
                class: "navbar-end",
                ul { class: "flex gap-2",
                    li {
                        Link {
                            to: Route::Home {},
                            class: "btn btn-error",
                            "SOS"
                        }
                    }
                    li {
                        Link {
                            to: Route::Dashboard { subdivision_id: None },
                            class: "btn btn-outline",
                            "Dashboard"
                        }
                    }
                    li {
                        Link {
                            to: Route::Map { subdivision_id: None },
                            class: "btn btn-outline",
                            "Map"
                        }
                    }
                    li {
                        a { href: "/api/docs",
                            button {
                                class: "btn btn-ghost",
                                "API Docs"
                            }
                        }
                    }
                }
            }
        }

        Outlet::<Route> {}
    }
}
