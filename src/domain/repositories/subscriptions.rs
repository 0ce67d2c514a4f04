use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::{
        InsertSubscriptionEntity, SubscriptionEntity, UpdateSubscriptionEntity,
    },
    value_objects::subscriptions::SumPeriodFilter,
};

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    /// Inserts a new row; a duplicate id surfaces the unique-constraint
    /// violation as an error.
    async fn create(&self, insert_subscription_entity: InsertSubscriptionEntity) -> Result<()>;

    async fn find_by_id(&self, subscription_id: Uuid) -> Result<Option<SubscriptionEntity>>;

    /// Returns all rows, in no particular order.
    async fn list_all(&self) -> Result<Vec<SubscriptionEntity>>;

    /// Returns the number of rows matched by the update; zero means the id
    /// does not exist.
    async fn update(
        &self,
        subscription_id: Uuid,
        update_subscription_entity: UpdateSubscriptionEntity,
    ) -> Result<usize>;

    /// Idempotent: deleting a missing id is not an error.
    async fn delete(&self, subscription_id: Uuid) -> Result<()>;

    /// Sums price over rows whose start_date falls within the filter's
    /// inclusive [from, to] range. Zero matching rows yields 0.
    async fn sum_for_period(&self, filter: SumPeriodFilter) -> Result<i64>;
}
