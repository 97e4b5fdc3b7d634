//! Pricing API route handlers

use axum::{extract::State, routing::post, Json, Router};

use crate::error::Result;
use crate::AppState;

use super::activities::{
    match_activity, normalize_name, price_activity, rank_candidates, ActivityCost,
};
use super::fees::{calculate_service_fees, calculate_service_fees_by_count};
use super::requests::{
    validate_adults, validate_child_ages, ActivityCostRequest, ActivityMatchRequest,
    CompareQuotesRequest, QuoteRequest, ServiceFeesByCountRequest, ServiceFeesRequest,
};
use super::responses::{
    ActivityCostResponse, ActivityMatchResponse, CandidateResponse, CompareQuotesResponse,
    HotelQuoteEntry, MatchedActivityResponse, QuoteResponse, ServiceFeesResponse,
};
use super::services;

/// Pricing routes, mounted under `/api/pricing`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quote", post(quote))
        .route("/quote/compare", post(compare_quotes))
        .route("/service-fees", post(service_fees))
        .route("/service-fees/by-count", post(service_fees_by_count))
        .route("/activities/match", post(match_activity_name))
        .route("/activities/cost", post(activity_cost))
}

/// Quote a booking at one hotel
async fn quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let hotel_id = request.hotel_id;
    let params = request.booking.into_params()?;

    let (hotel, quote) =
        services::quote_for_hotel(&state.db, &state.cache, hotel_id, &params).await?;

    Ok(Json(QuoteResponse::new(hotel_id, hotel.name.clone(), quote)))
}

/// Quote the same booking at several hotels
async fn compare_quotes(
    State(state): State<AppState>,
    Json(request): Json<CompareQuotesRequest>,
) -> Result<Json<CompareQuotesResponse>> {
    let params = request.booking.into_params()?;

    let results =
        services::compare_hotels(&state.db, &state.cache, &request.hotel_ids, &params).await?;

    let quotes = results
        .into_iter()
        .map(|entry| match entry.result {
            Ok(quote) => HotelQuoteEntry {
                hotel_id: entry.hotel_id,
                quote: Some(QuoteResponse::new(
                    entry.hotel_id,
                    entry.hotel_name.unwrap_or_default(),
                    quote,
                )),
                error: None,
            },
            Err(message) => HotelQuoteEntry {
                hotel_id: entry.hotel_id,
                quote: None,
                error: Some(message),
            },
        })
        .collect();

    Ok(Json(CompareQuotesResponse { quotes }))
}

/// Service fees from adult count and child ages
async fn service_fees(
    Json(request): Json<ServiceFeesRequest>,
) -> Result<Json<ServiceFeesResponse>> {
    let adults = validate_adults(request.adults)?;
    let ages = validate_child_ages(&request.children_ages)?;

    Ok(Json(calculate_service_fees(adults, &ages).into()))
}

/// Service fees from adult count and a child head count
async fn service_fees_by_count(
    Json(request): Json<ServiceFeesByCountRequest>,
) -> Result<Json<ServiceFeesResponse>> {
    let adults = validate_adults(request.adults)?;
    let child_count = usize::try_from(request.child_count).map_err(|_| {
        crate::error::AppError::Validation("child_count must not be negative".to_string())
    })?;

    Ok(Json(calculate_service_fees_by_count(adults, child_count).into()))
}

/// Resolve a freeform activity name against a destination catalog
async fn match_activity_name(
    Json(request): Json<ActivityMatchRequest>,
) -> Result<Json<ActivityMatchResponse>> {
    let catalog = request.destination.activities();

    let matched = match_activity(&request.name, &catalog).map(|found| MatchedActivityResponse {
        name: found.activity.name.clone(),
        kind: found.kind,
    });
    let candidates = rank_candidates(&request.name, &catalog)
        .into_iter()
        .filter(|candidate| candidate.score > 0.0)
        .map(|candidate| CandidateResponse {
            name: candidate.activity.name.clone(),
            score: candidate.score,
        })
        .collect();

    Ok(Json(ActivityMatchResponse {
        normalized: normalize_name(&request.name),
        query: request.name,
        matched,
        candidates,
    }))
}

/// Price one activity for a party. Unmatched names cost nothing.
async fn activity_cost(
    Json(request): Json<ActivityCostRequest>,
) -> Result<Json<ActivityCostResponse>> {
    let adults = validate_adults(request.adults)?;
    let ages = validate_child_ages(&request.children_ages)?;
    let catalog = request.destination.activities();

    let response = match match_activity(&request.name, &catalog) {
        Some(found) => ActivityCostResponse::new(
            Some(MatchedActivityResponse {
                name: found.activity.name.clone(),
                kind: found.kind,
            }),
            price_activity(found.activity, adults, &ages),
        ),
        None => {
            tracing::warn!(activity = %request.name, "No catalog match for activity");
            ActivityCostResponse::new(None, ActivityCost::default())
        }
    };

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use crate::cache::AppCache;
    use crate::AppState;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        // Lazy pool: these routes never touch the database
        let db = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/safari_quote_test")
            .unwrap();
        AppState {
            db,
            cache: AppCache::default(),
        }
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let app = crate::app(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_service_fees_route() {
        let (status, body) = post_json(
            "/api/pricing/service-fees",
            json!({"adults": 1, "children_ages": [2, 8, 11]}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["regime"], "tiered");
        assert_eq!(body["adult_fees"]["amount"], "1000");
        assert_eq!(body["kids_fees"]["amount"], "600");
        assert_eq!(body["total_fees"]["amount"], "1600");
        assert_eq!(body["total_fees"]["currency"], "ZAR");
        assert_eq!(body["charged_children"], 2);
    }

    #[tokio::test]
    async fn test_service_fees_by_count_route() {
        let (status, body) = post_json(
            "/api/pricing/service-fees/by-count",
            json!({"adults": 1, "child_count": 3}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kids_fees"]["amount"], "750");
    }

    #[tokio::test]
    async fn test_service_fees_rejects_bad_age() {
        let (status, body) = post_json(
            "/api/pricing/service-fees",
            json!({"adults": 2, "children_ages": [19]}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "validation");
    }

    #[tokio::test]
    async fn test_activity_match_route() {
        let (status, body) = post_json(
            "/api/pricing/activities/match",
            json!({"destination": "durban", "name": "Wet n Wild at uShaka"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["normalized"], "wet n wild at ushaka");
        assert_eq!(body["matched"]["name"], "uShaka Marine World & Wet 'n Wild");
        assert_eq!(body["matched"]["match"]["kind"], "scored");
        assert_eq!(body["candidates"][0]["name"], "uShaka Marine World & Wet 'n Wild");
    }

    #[tokio::test]
    async fn test_activity_match_route_unmatched() {
        let (status, body) = post_json(
            "/api/pricing/activities/match",
            json!({"destination": "sun_city", "name": "Shark cage diving"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["matched"].is_null());
    }

    #[tokio::test]
    async fn test_activity_cost_route() {
        let (status, body) = post_json(
            "/api/pricing/activities/cost",
            json!({
                "destination": "durban",
                "name": "Harbour Cruise 2hrs",
                "adults": 2,
                "children_ages": [3, 6]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matched"]["name"], "Durban Harbour Cruise (2 Hours)");
        assert_eq!(body["adult_cost"]["amount"], "500");
        assert_eq!(body["child_cost"]["amount"], "150");
        assert_eq!(body["total"]["amount"], "650");
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = crate::app(test_state());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
