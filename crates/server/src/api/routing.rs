use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metroute::{prelude::*, router};
use std::{collections::HashMap, sync::Arc};
use tracing::debug;

use crate::{
    dto::{ErrorDto, ItineraryDto, ShortestPathDto, ShortestPathRequest},
    state::AppState,
};

pub async fn route(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let from = params.get("from").ok_or(StatusCode::BAD_REQUEST)?;
    let to = params.get("to").ok_or(StatusCode::BAD_REQUEST)?;
    let departure = match params.get("departure") {
        Some(value) => Time::parse(value).ok_or(StatusCode::BAD_REQUEST)?,
        None => Time::now(),
    };

    let itinerary = state
        .graph
        .router(from, to)
        .departure_at(departure)
        .strict(true)
        .solve()
        .map_err(|err| {
            debug!("Rejected route request: {err}");
            StatusCode::BAD_REQUEST
        })?;
    Ok(Json(ItineraryDto::from(itinerary)).into_response())
}

pub async fn shortest_path(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ShortestPathRequest>,
) -> Response {
    let result = state
        .graph
        .router(&request.source, &request.destination)
        .strict(true)
        .ignore_schedules(true)
        .solve();

    match result {
        Ok(itinerary) => match itinerary.total {
            Some(total) => Json(ShortestPathDto {
                path: itinerary.path,
                total_time: total.as_seconds(),
            })
            .into_response(),
            None => (
                StatusCode::NOT_FOUND,
                Json(ErrorDto {
                    error: "no route found",
                }),
            )
                .into_response(),
        },
        Err(router::Error::UnknownStart(_) | router::Error::UnknownEnd(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorDto {
                error: "unknown station",
            }),
        )
            .into_response(),
        Err(err) => {
            debug!("Rejected shortest path request: {err}");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: "invalid request",
                }),
            )
                .into_response()
        }
    }
}
