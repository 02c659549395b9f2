use dioxus::prelude::*;

use crate::client::{
    components::Navbar,
    routes::{Dashboard, Home, Map, NotFound},
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]

    #[route("/")]
    Home {},

    #[route("/dashboard?:subdivision_id")]
    Dashboard { subdivision_id: Option<i32> },

    #[route("/map?:subdivision_id")]
    Map { subdivision_id: Option<i32> },

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}
