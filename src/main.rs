#![allow(non_snake_case)]

mod client;
mod model;

#[cfg(feature = "server")]
use floodwatch::server;

fn main() {
    #[cfg(not(feature = "server"))]
    dioxus::launch(client::App);

    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use dioxus_logger::tracing;

        use crate::server::{
            config::Config, model::app::AppState, scheduler::Scheduler, startup,
        };

        dotenvy::dotenv().ok();
        let config = match Config::from_env() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            }
        };

        let db = startup::connect_to_database(&config).await?;

        Scheduler::new(db.clone()).await?.start().await?;

        tracing::info!("Starting server");

        let mut router = dioxus::server::router(client::App);
        let server_routes = server::router::routes().with_state(AppState::new(db, &config));
        router = router.merge(server_routes);

        Ok(router)
    })
}
