use settings::Settings;

mod adapter;
mod core;
mod settings;
mod sustainability;

#[tokio::main(flavor = "multi_thread")]
pub async fn main() {
    let settings = Settings::new().expect("Error reading configuration");

    settings.monitoring.init().expect("Error initializing monitoring");

    //data is reloaded per request, this only reports broken exports early
    match settings.data.load() {
        Ok(data) => tracing::info!("Found sustainability data for {} hotels", data.hotels().len()),
        Err(e) => tracing::warn!("Sustainability data currently not loadable: {}", e),
    }

    let sources = settings.data.clone();
    let display = settings.display.clone();

    tracing::info!("Starting guest display");

    let http_server_exec = settings.http_server.run_server(move || {
        vec![adapter::guest_display::new_routes(
            sources.clone(),
            display.clone(),
        )]
    });

    tokio::select!(
        result = http_server_exec => result.expect("HTTP server execution failed"),
        _ = tokio::signal::ctrl_c() => tracing::info!("Shutting down guest display"),
    );
}
