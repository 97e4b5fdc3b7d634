//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database"),
            AppError::Pricing(PricingError::NoRate { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "no_rate")
            }
            AppError::Pricing(PricingError::UnknownHotel { .. }) => {
                (StatusCode::NOT_FOUND, "unknown_hotel")
            }
            AppError::Pricing(PricingError::InvalidSeason { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_season")
            }
            AppError::Pricing(PricingError::InvalidInput { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_input")
            }
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
        }
    }

    /// Structured fields for errors a client can act on.
    fn details(&self) -> Option<Value> {
        match self {
            AppError::Pricing(PricingError::NoRate { capacity, date }) => {
                Some(json!({ "capacity": capacity, "date": date }))
            }
            AppError::Pricing(PricingError::UnknownHotel { hotel_id }) => {
                Some(json!({ "hotel_id": hotel_id }))
            }
            AppError::Pricing(PricingError::InvalidSeason { name, .. }) => {
                Some(json!({ "season": name }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        // Driver details stay in the logs
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Database error".to_string()
            }
            other => {
                tracing::debug!("Request failed: {}", other);
                other.to_string()
            }
        };

        let body = PricingErrorResponse {
            error_type: error_type.to_string(),
            message,
            details: self.details(),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::RoomCapacity;
    use chrono::NaiveDate;

    #[test]
    fn test_status_codes() {
        let err = AppError::Pricing(PricingError::NoRate {
            capacity: RoomCapacity::TwoSleeper,
            date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
        });
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = AppError::Validation("child age 19 is out of range".to_string());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = AppError::from(PricingError::UnknownHotel {
            hotel_id: uuid::Uuid::nil(),
        });
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_details_for_pricing_errors() {
        let err = AppError::Pricing(PricingError::NoRate {
            capacity: RoomCapacity::FourSleeper,
            date: NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
        });
        assert_eq!(
            err.details(),
            Some(json!({ "capacity": "4-sleeper", "date": "2025-12-24" }))
        );

        let err = AppError::Validation("adults must not be negative".to_string());
        assert_eq!(err.details(), None);
    }

    #[test]
    fn test_display_passes_pricing_error_through() {
        let err = AppError::from(PricingError::InvalidInput {
            message: "at least one room is required".to_string(),
        });
        assert!(err.to_string().contains("at least one room"));
    }
}
