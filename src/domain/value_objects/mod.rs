pub mod month_date;
pub mod subscriptions;
