use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::dsl::sum;
use diesel::{delete, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::{
    domain::{
        entities::subscriptions::{
            InsertSubscriptionEntity, SubscriptionEntity, UpdateSubscriptionEntity,
        },
        repositories::subscriptions::SubscriptionRepository,
        value_objects::subscriptions::SumPeriodFilter,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::subscription},
};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn create(&self, insert_subscription_entity: InsertSubscriptionEntity) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        insert_into(subscription::table)
            .values(&insert_subscription_entity)
            .execute(&mut conn)?;

        Ok(())
    }

    async fn find_by_id(&self, subscription_id: Uuid) -> Result<Option<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = subscription::table
            .find(subscription_id)
            .select(SubscriptionEntity::as_select())
            .first::<SubscriptionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_all(&self) -> Result<Vec<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscription::table
            .select(SubscriptionEntity::as_select())
            .load::<SubscriptionEntity>(&mut conn)?;

        Ok(results)
    }

    async fn update(
        &self,
        subscription_id: Uuid,
        update_subscription_entity: UpdateSubscriptionEntity,
    ) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(subscription::table.find(subscription_id))
            .set(&update_subscription_entity)
            .execute(&mut conn)?;

        Ok(affected)
    }

    async fn delete(&self, subscription_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        delete(subscription::table.find(subscription_id)).execute(&mut conn)?;

        Ok(())
    }

    async fn sum_for_period(&self, filter: SumPeriodFilter) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = subscription::table
            .filter(subscription::start_date.ge(filter.from.date()))
            .filter(subscription::start_date.le(filter.to.date()))
            .select(sum(subscription::price))
            .into_boxed();

        if let Some(user_id) = filter.user_id {
            query = query.filter(subscription::user_id.eq(user_id));
        }

        if let Some(service_name) = filter.service_name {
            query = query.filter(subscription::service_name.eq(service_name));
        }

        // SUM over zero rows is NULL, not an error.
        let total = query.first::<Option<i64>>(&mut conn)?;

        Ok(total.unwrap_or(0))
    }
}
