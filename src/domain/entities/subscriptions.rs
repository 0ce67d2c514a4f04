use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::subscription;

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = subscription)]
pub struct SubscriptionEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_name: String,
    pub price: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = subscription)]
pub struct InsertSubscriptionEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_name: String,
    pub price: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

// The update path only ever touches these three columns; user_id and
// end_date are immutable once the row exists.
#[derive(Debug, Clone, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = subscription)]
pub struct UpdateSubscriptionEntity {
    pub service_name: String,
    pub price: i32,
    pub start_date: NaiveDate,
}
