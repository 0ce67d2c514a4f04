use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::usecases::subscriptions::SubscriptionUseCase,
    domain::{
        repositories::subscriptions::SubscriptionRepository,
        value_objects::{
            month_date::MonthDate,
            subscriptions::{InsertSubscriptionModel, SumResponseModel, UpdateSubscriptionModel},
        },
    },
    infrastructure::{
        axum_http::error_responses::error_response,
        postgres::{
            postgres_connection::PgPoolSquad, repositories::subscriptions::SubscriptionPostgres,
        },
    },
};

#[derive(Debug, Deserialize)]
pub struct SumPeriodQuery {
    id: Option<String>,
    service_name: Option<String>,
    from: Option<String>,
    to: Option<String>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscriptions_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let subscriptions_usecase = SubscriptionUseCase::new(Arc::new(subscriptions_repository));

    Router::new()
        .route("/", get(get_all).post(create))
        .route("/sum", get(sum_for_period))
        .route("/:id", get(get_info).put(update).delete(remove))
        .with_state(Arc::new(subscriptions_usecase))
}

pub async fn create<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
    Json(payload): Json<InsertSubscriptionModel>,
) -> impl IntoResponse
where
    T: SubscriptionRepository + Send + Sync,
{
    match subscriptions_usecase.create(payload).await {
        Ok(model) => {
            info!(subscription_id = %model.id, "subscription created");
            (StatusCode::CREATED, Json(model)).into_response()
        }
        Err(err) => {
            warn!(error = %err, "failed to create subscription");
            err.into_response()
        }
    }
}

pub async fn get_info<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
    Path(subscription_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: SubscriptionRepository + Send + Sync,
{
    match subscriptions_usecase.get_info(subscription_id).await {
        Ok(model) => Json(model).into_response(),
        Err(err) => {
            warn!(%subscription_id, error = %err, "failed to fetch subscription");
            err.into_response()
        }
    }
}

pub async fn get_all<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
) -> impl IntoResponse
where
    T: SubscriptionRepository + Send + Sync,
{
    match subscriptions_usecase.get_all().await {
        Ok(models) => Json(models).into_response(),
        Err(err) => {
            error!(error = %err, "failed to list subscriptions");
            err.into_response()
        }
    }
}

pub async fn update<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
    Path(subscription_id): Path<Uuid>,
    Json(payload): Json<UpdateSubscriptionModel>,
) -> impl IntoResponse
where
    T: SubscriptionRepository + Send + Sync,
{
    match subscriptions_usecase.update(subscription_id, payload).await {
        Ok(model) => {
            info!(%subscription_id, "subscription updated");
            Json(model).into_response()
        }
        Err(err) => {
            warn!(%subscription_id, error = %err, "failed to update subscription");
            err.into_response()
        }
    }
}

pub async fn remove<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
    Path(subscription_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: SubscriptionRepository + Send + Sync,
{
    match subscriptions_usecase.delete(subscription_id).await {
        Ok(()) => {
            info!(%subscription_id, "subscription deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => {
            error!(%subscription_id, error = %err, "failed to delete subscription");
            err.into_response()
        }
    }
}

pub async fn sum_for_period<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
    Query(query): Query<SumPeriodQuery>,
) -> impl IntoResponse
where
    T: SubscriptionRepository + Send + Sync,
{
    let (from_raw, to_raw) = match (query.from.as_deref(), query.to.as_deref()) {
        (Some(from), Some(to)) if !from.is_empty() && !to.is_empty() => (from, to),
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "missing 'from' or 'to' query parameter",
            );
        }
    };

    let from = match from_raw.parse::<MonthDate>() {
        Ok(date) => date,
        Err(_) => {
            return error_response(StatusCode::BAD_REQUEST, "invalid 'from' date format");
        }
    };
    let to = match to_raw.parse::<MonthDate>() {
        Ok(date) => date,
        Err(_) => {
            return error_response(StatusCode::BAD_REQUEST, "invalid 'to' date format");
        }
    };

    // A blank id or service_name means "no constraint on this field".
    let user_id = match query.id.as_deref() {
        None | Some("") => None,
        Some(raw) => match Uuid::parse_str(raw) {
            Ok(user_id) => Some(user_id),
            Err(_) => {
                return error_response(StatusCode::BAD_REQUEST, "'id' must be a valid UUID");
            }
        },
    };
    let service_name = query.service_name.filter(|name| !name.is_empty());

    match subscriptions_usecase
        .sum_for_period(user_id, service_name, from, to)
        .await
    {
        Ok(total_price) => {
            info!(
                user_id = ?user_id,
                %from,
                %to,
                total_price,
                "subscription sum calculated"
            );
            Json(SumResponseModel { total_price }).into_response()
        }
        Err(err) => {
            error!(error = %err, "failed to calculate subscription sum");
            err.into_response()
        }
    }
}
