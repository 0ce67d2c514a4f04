use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    value_objects::month_date::{InvalidMonthDate, MonthDate},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriptionModel {
    pub id: Uuid,
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: MonthDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<MonthDate>,
}

impl SubscriptionModel {
    pub fn into_insert_entity(self) -> InsertSubscriptionEntity {
        InsertSubscriptionEntity {
            id: self.id,
            user_id: self.user_id,
            service_name: self.service_name,
            price: self.price,
            start_date: self.start_date.date(),
            end_date: self.end_date.map(|date| date.date()),
        }
    }
}

impl From<SubscriptionEntity> for SubscriptionModel {
    fn from(entity: SubscriptionEntity) -> Self {
        Self {
            id: entity.id,
            service_name: entity.service_name,
            price: entity.price,
            user_id: entity.user_id,
            start_date: MonthDate::from_naive(entity.start_date),
            end_date: entity.end_date.map(MonthDate::from_naive),
        }
    }
}

/// Inbound payload for creating a subscription. Dates travel as raw strings
/// and are only decoded by `into_model`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertSubscriptionModel {
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl InsertSubscriptionModel {
    /// Field checks applied at the API boundary, before the factory runs.
    /// Collects every failing field rather than stopping at the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut failures = Vec::new();
        if self.service_name.trim().is_empty() {
            failures.push("service_name must not be empty".to_string());
        }
        if self.price < 0 {
            failures.push("price must not be negative".to_string());
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures)
        }
    }

    /// Builds a fully-populated record with a freshly generated id. An empty
    /// end_date string means the subscription is open-ended.
    pub fn into_model(self) -> Result<SubscriptionModel, InvalidMonthDate> {
        let start_date: MonthDate = self.start_date.parse()?;
        let end_date = match self.end_date.as_deref() {
            Some(raw) if !raw.is_empty() => Some(raw.parse::<MonthDate>()?),
            _ => None,
        };

        Ok(SubscriptionModel {
            id: Uuid::new_v4(),
            service_name: self.service_name,
            price: self.price,
            user_id: self.user_id,
            start_date,
            end_date,
        })
    }
}

/// Inbound payload for updating a subscription. user_id and start_date are
/// deliberately absent: they cannot be changed through the update path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSubscriptionModel {
    pub service_name: String,
    pub price: i32,
}

impl UpdateSubscriptionModel {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut failures = Vec::new();
        if self.service_name.trim().is_empty() {
            failures.push("service_name must not be empty".to_string());
        }
        if self.price < 0 {
            failures.push("price must not be negative".to_string());
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures)
        }
    }
}

/// Filter for the period sum. `None` means "no constraint on this field";
/// the HTTP layer maps blank query parameters to `None` so an empty string
/// is never matched literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SumPeriodFilter {
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
    pub from: MonthDate,
    pub to: MonthDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SumResponseModel {
    pub total_price: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> InsertSubscriptionModel {
        InsertSubscriptionModel {
            service_name: "Netflix".to_string(),
            price: 1000,
            user_id: Uuid::new_v4(),
            start_date: "01-2025".to_string(),
            end_date: None,
        }
    }

    #[test]
    fn factory_generates_id_and_decodes_dates() {
        let input = payload();
        let user_id = input.user_id;

        let model = input.into_model().unwrap();

        assert_eq!(model.service_name, "Netflix");
        assert_eq!(model.price, 1000);
        assert_eq!(model.user_id, user_id);
        assert_eq!(model.start_date, MonthDate::new(1, 2025).unwrap());
        assert_eq!(model.end_date, None);
    }

    #[test]
    fn factory_treats_empty_end_date_as_absent() {
        let mut input = payload();
        input.end_date = Some(String::new());

        let model = input.into_model().unwrap();
        assert_eq!(model.end_date, None);
    }

    #[test]
    fn factory_decodes_present_end_date() {
        let mut input = payload();
        input.end_date = Some("06-2025".to_string());

        let model = input.into_model().unwrap();
        assert_eq!(model.end_date, Some(MonthDate::new(6, 2025).unwrap()));
    }

    #[test]
    fn factory_rejects_bad_start_date() {
        let mut input = payload();
        input.start_date = "1-2025".to_string();

        assert!(input.into_model().is_err());
    }

    #[test]
    fn factory_rejects_bad_end_date() {
        let mut input = payload();
        input.end_date = Some("2025-06".to_string());

        assert!(input.into_model().is_err());
    }

    #[test]
    fn validate_collects_every_failing_field() {
        let mut input = payload();
        input.service_name = "  ".to_string();
        input.price = -5;

        let failures = input.validate().unwrap_err();
        assert_eq!(failures.len(), 2);
        assert!(failures.iter().any(|f| f.contains("service_name")));
        assert!(failures.iter().any(|f| f.contains("price")));
    }

    #[test]
    fn model_serializes_without_absent_end_date() {
        let model = payload().into_model().unwrap();
        let json = serde_json::to_value(&model).unwrap();

        assert!(json.get("end_date").is_none());
        assert_eq!(json["start_date"], "01-2025");
    }
}
