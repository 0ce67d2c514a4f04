use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::UpdateSubscriptionEntity,
    repositories::subscriptions::SubscriptionRepository,
    value_objects::{
        month_date::{InvalidMonthDate, MonthDate},
        subscriptions::{
            InsertSubscriptionModel, SubscriptionModel, SumPeriodFilter, UpdateSubscriptionModel,
        },
    },
};

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("invalid date: {0}")]
    InvalidDate(#[from] InvalidMonthDate),
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("subscription not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::InvalidDate(_) | SubscriptionError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            SubscriptionError::NotFound => StatusCode::NOT_FOUND,
            SubscriptionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

pub struct SubscriptionUseCase<T>
where
    T: SubscriptionRepository + Send + Sync,
{
    subscription_repository: Arc<T>,
}

impl<T> SubscriptionUseCase<T>
where
    T: SubscriptionRepository + Send + Sync,
{
    pub fn new(subscription_repository: Arc<T>) -> Self {
        Self {
            subscription_repository,
        }
    }

    pub async fn create(&self, payload: InsertSubscriptionModel) -> UseCaseResult<SubscriptionModel> {
        payload.validate().map_err(SubscriptionError::Validation)?;

        let model = payload.into_model()?;
        self.subscription_repository
            .create(model.clone().into_insert_entity())
            .await?;

        Ok(model)
    }

    pub async fn get_info(&self, subscription_id: Uuid) -> UseCaseResult<SubscriptionModel> {
        let entity = self
            .subscription_repository
            .find_by_id(subscription_id)
            .await?
            .ok_or(SubscriptionError::NotFound)?;

        Ok(SubscriptionModel::from(entity))
    }

    pub async fn get_all(&self) -> UseCaseResult<Vec<SubscriptionModel>> {
        let entities = self.subscription_repository.list_all().await?;

        Ok(entities.into_iter().map(SubscriptionModel::from).collect())
    }

    /// Only service_name and price come from the payload; user_id and
    /// start_date always keep the persisted values.
    pub async fn update(
        &self,
        subscription_id: Uuid,
        payload: UpdateSubscriptionModel,
    ) -> UseCaseResult<SubscriptionModel> {
        payload.validate().map_err(SubscriptionError::Validation)?;

        let existing = self
            .subscription_repository
            .find_by_id(subscription_id)
            .await?
            .ok_or(SubscriptionError::NotFound)?;

        let changes = UpdateSubscriptionEntity {
            service_name: payload.service_name,
            price: payload.price,
            start_date: existing.start_date,
        };

        let affected = self
            .subscription_repository
            .update(subscription_id, changes.clone())
            .await?;
        if affected == 0 {
            return Err(SubscriptionError::NotFound);
        }

        Ok(SubscriptionModel {
            id: existing.id,
            service_name: changes.service_name,
            price: changes.price,
            user_id: existing.user_id,
            start_date: MonthDate::from_naive(existing.start_date),
            end_date: existing.end_date.map(MonthDate::from_naive),
        })
    }

    pub async fn delete(&self, subscription_id: Uuid) -> UseCaseResult<()> {
        self.subscription_repository.delete(subscription_id).await?;

        Ok(())
    }

    pub async fn sum_for_period(
        &self,
        user_id: Option<Uuid>,
        service_name: Option<String>,
        from: MonthDate,
        to: MonthDate,
    ) -> UseCaseResult<i64> {
        let filter = SumPeriodFilter {
            user_id,
            // Blank means "no constraint", never literal equality.
            service_name: service_name.filter(|name| !name.is_empty()),
            from,
            to,
        };

        let total = self.subscription_repository.sum_for_period(filter).await?;

        Ok(total)
    }
}
