//! Route definitions and request handlers.

use std::convert::Infallible;

use serde::Deserialize;
use warp::http::StatusCode;
use warp::reject::MethodNotAllowed;
use warp::{Filter, Rejection, Reply};

use wander_events::EventsService;
use wander_location::LocationService;
use wander_store::Coordinates;
use wander_weather::WeatherService;

/// Body returned for any failed request.
const GENERIC_ERROR_BODY: &str = "Sorry, something went wrong";

/// Everything the handlers need, cloned into each request.
#[derive(Clone)]
pub struct ApiContext {
    pub location: LocationService,
    pub weather: WeatherService,
    pub events: EventsService,
}

#[derive(Debug, Deserialize)]
struct DataParam {
    data: String,
}

/// Marker rejection for any handler failure.
#[derive(Debug)]
struct ServiceFailure;

impl warp::reject::Reject for ServiceFailure {}

/// Build the full route tree: three accessors, error recovery, CORS.
pub fn routes(
    context: ApiContext,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    location_route(context.clone())
        .or(weather_route(context.clone()))
        .or(events_route(context))
        .recover(handle_rejection)
        .with(warp::cors().allow_any_origin())
}

/// Serve the routes until the process is stopped.
pub async fn serve(context: ApiContext, port: u16) {
    tracing::info!("Listening on port {}", port);
    warp::serve(routes(context)).run(([0, 0, 0, 0], port)).await;
}

fn location_route(
    context: ApiContext,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::get()
        .and(warp::path("location"))
        .and(warp::path::end())
        .and(warp::query::<DataParam>())
        .and(with_context(context))
        .and_then(handle_location)
}

fn weather_route(
    context: ApiContext,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::get()
        .and(warp::path("weather"))
        .and(warp::path::end())
        .and(warp::query::<DataParam>())
        .and(with_context(context))
        .and_then(handle_weather)
}

fn events_route(
    context: ApiContext,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::get()
        .and(warp::path("events"))
        .and(warp::path::end())
        .and(warp::query::<DataParam>())
        .and(with_context(context))
        .and_then(handle_events)
}

fn with_context(
    context: ApiContext,
) -> impl Filter<Extract = (ApiContext,), Error = Infallible> + Clone {
    warp::any().map(move || context.clone())
}

async fn handle_location(param: DataParam, context: ApiContext) -> Result<impl Reply, Rejection> {
    match context.location.lookup(&param.data).await {
        Ok(record) => Ok(warp::reply::json(&record)),
        Err(e) => {
            tracing::error!("Location lookup failed: {}", e);
            Err(warp::reject::custom(ServiceFailure))
        }
    }
}

async fn handle_weather(param: DataParam, context: ApiContext) -> Result<impl Reply, Rejection> {
    let coordinates = parse_coordinates(&param.data)?;
    match context.weather.lookup(&coordinates).await {
        Ok(records) => Ok(warp::reply::json(&records)),
        Err(e) => {
            tracing::error!("Weather lookup failed: {}", e);
            Err(warp::reject::custom(ServiceFailure))
        }
    }
}

async fn handle_events(param: DataParam, context: ApiContext) -> Result<impl Reply, Rejection> {
    let coordinates = parse_coordinates(&param.data)?;
    match context.events.lookup(&coordinates).await {
        Ok(records) => Ok(warp::reply::json(&records)),
        Err(e) => {
            tracing::error!("Events lookup failed: {}", e);
            Err(warp::reject::custom(ServiceFailure))
        }
    }
}

/// Weather and events take their `data` parameter as a JSON coordinate object.
fn parse_coordinates(data: &str) -> Result<Coordinates, Rejection> {
    serde_json::from_str(data).map_err(|e| {
        tracing::error!("Invalid coordinate payload: {}", e);
        warp::reject::custom(ServiceFailure)
    })
}

/// Collapse rejections into the fixed generic failure body.
///
/// Route mismatches stay 404s: an unknown path, or a known path with the
/// wrong method. Routes exist only as method-plus-path pairs, so a
/// `POST /location` never reaches a handler. Everything else becomes the
/// generic 500.
async fn handle_rejection(rejection: Rejection) -> Result<impl Reply, Infallible> {
    if rejection.is_not_found() || rejection.find::<MethodNotAllowed>().is_some() {
        return Ok(warp::reply::with_status("Not Found", StatusCode::NOT_FOUND));
    }

    Ok(warp::reply::with_status(
        GENERIC_ERROR_BODY,
        StatusCode::INTERNAL_SERVER_ERROR,
    ))
}
