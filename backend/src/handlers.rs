// HTTP handlers for the campus API.
// Every `/api` response uses the `{ success, data | error }` envelope.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;

use crate::{
    AppState,
    campus::{DEFAULT_NEARBY_RADIUS_M, LocationRouteError},
    error::ApiError,
    geo::{distance_meters, initial_bearing_degrees, relative_bearing_degrees},
    models::{
        ApiResponse, Coordinate, Health, Location, LocationRoute, LocationRouteRequest,
        NavigateRequest, Navigation, NearbyLocation, NearbyRequest, Route, RouteRequest,
    },
    routing::synthesize_route,
};

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// GET /health
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// GET /api/locations
pub async fn list_locations(State(state): State<AppState>) -> ApiResult<Vec<Location>> {
    Ok(Json(ApiResponse::ok(state.campus.locations.clone())))
}

/// GET /api/locations/:id
pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Location> {
    state
        .campus
        .location(&id)
        .cloned()
        .map(|loc| Json(ApiResponse::ok(loc)))
        .ok_or(ApiError::LocationNotFound)
}

/// GET /api/locations/search?query=&type=
pub async fn search_locations(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Vec<Location>> {
    let Query(params) = params.map_err(|err| {
        tracing::debug!("bad search query: {err}");
        ApiError::InvalidRequest
    })?;

    let results = state
        .campus
        .search(params.query.as_deref(), params.kind.as_deref())
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(ApiResponse::ok(results)))
}

/// POST /api/route
pub async fn route(
    State(state): State<AppState>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> ApiResult<Route> {
    let Json(req) = payload.map_err(invalid_coordinates)?;
    if !req.start.is_valid() || !req.end.is_valid() {
        return Err(ApiError::InvalidCoordinates);
    }

    tracing::info!("route request: {:?} -> {:?}", req.start, req.end);
    let route = synthesize_route(req.start, req.end, &state.campus.path_nodes)?;
    tracing::info!("route: {} m, {} min", route.distance, route.duration);
    Ok(Json(ApiResponse::ok(route)))
}

/// POST /api/route/locations
pub async fn route_between_locations(
    State(state): State<AppState>,
    payload: Result<Json<LocationRouteRequest>, JsonRejection>,
) -> ApiResult<LocationRoute> {
    let Json(req) = payload.map_err(|err| {
        tracing::debug!("bad location route body: {err}");
        ApiError::InvalidRequest
    })?;
    let (Some(start_id), Some(end_id)) = (req.start_id, req.end_id) else {
        return Err(ApiError::InvalidRequest);
    };

    tracing::info!("route request between locations {start_id} -> {end_id}");
    let route = state
        .campus
        .route_between(&start_id, &end_id)
        .map_err(|err| match err {
            LocationRouteError::UnknownLocation(_) => ApiError::LocationNotFound,
            LocationRouteError::Route(err) => ApiError::Route(err),
        })?;
    Ok(Json(ApiResponse::ok(route)))
}

/// POST /api/nearby
pub async fn nearby(
    State(state): State<AppState>,
    payload: Result<Json<NearbyRequest>, JsonRejection>,
) -> ApiResult<Vec<NearbyLocation>> {
    let Json(req) = payload.map_err(invalid_coordinates)?;
    let point = Coordinate::new(req.lat, req.lng);
    if !point.is_valid() {
        return Err(ApiError::InvalidCoordinates);
    }

    let radius = req.radius.unwrap_or(DEFAULT_NEARBY_RADIUS_M);
    let nearby = state.campus.nearby(point, radius);
    tracing::debug!("{} locations within {radius} m", nearby.len());
    Ok(Json(ApiResponse::ok(nearby)))
}

/// POST /api/navigate
pub async fn navigate(
    payload: Result<Json<NavigateRequest>, JsonRejection>,
) -> ApiResult<Navigation> {
    let Json(req) = payload.map_err(invalid_coordinates)?;
    if !req.position.is_valid() || !req.destination.is_valid() {
        return Err(ApiError::InvalidCoordinates);
    }

    let bearing = initial_bearing_degrees(req.position, req.destination);
    Ok(Json(ApiResponse::ok(Navigation {
        distance: distance_meters(req.position, req.destination),
        bearing,
        arrow_angle: req
            .heading
            .map(|heading| relative_bearing_degrees(bearing, heading)),
    })))
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

fn invalid_coordinates(err: JsonRejection) -> ApiError {
    tracing::debug!("rejected body: {err}");
    ApiError::InvalidCoordinates
}
