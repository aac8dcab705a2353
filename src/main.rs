use anyhow::Result;

use wander_api::ApiContext;
use wander_core::Config;
use wander_events::{EventsClient, EventsService};
use wander_location::{GeocodeClient, LocationService};
use wander_store::{Store, StoreHandle};
use wander_weather::{ForecastClient, WeatherService};

#[tokio::main]
async fn main() -> Result<()> {
    // Local development reads settings from a .env file
    dotenvy::dotenv().ok();

    // Initialize core
    wander_core::init()?;

    let config = Config::load_validated()?;

    let store = StoreHandle::new(Store::open(&config.database.path)?);
    tracing::info!("Store opened at {}", config.database.path.display());

    let context = ApiContext {
        location: LocationService::new(
            store.clone(),
            GeocodeClient::new(&config.geocode.base_url, &config.geocode.api_key),
        ),
        weather: WeatherService::new(
            store.clone(),
            ForecastClient::new(&config.forecast.base_url, &config.forecast.api_key),
        ),
        events: EventsService::new(
            store,
            EventsClient::new(&config.events.base_url, &config.events.api_key),
        ),
    };

    tracing::info!("Wander server started");
    wander_api::serve(context, config.server.port).await;

    Ok(())
}
