//! Maintenance record value type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single service entry in a vehicle's maintenance log.
///
/// Records are validated once and then treated as immutable: to correct an
/// entry, replace it with a new one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    /// Calendar date of the service, no time-of-day
    pub date: NaiveDate,
    /// Kind of service performed (e.g. "Oil change")
    pub service_type: String,
    /// Service cost; 0 means the cost was not set
    #[serde(default)]
    pub cost: f64,
    /// Optional free-form details
    #[serde(default)]
    pub description: Option<String>,
}

impl MaintenanceRecord {
    pub fn new(
        date: NaiveDate,
        service_type: impl Into<String>,
        cost: f64,
        description: Option<String>,
    ) -> Self {
        Self {
            date,
            service_type: service_type.into(),
            cost,
            description,
        }
    }

    /// True when the record is consistent: non-empty service type and a
    /// finite, non-negative cost. The date is already guaranteed to be a
    /// real calendar date by its type.
    pub fn is_valid(&self) -> bool {
        !self.service_type.trim().is_empty() && self.cost.is_finite() && self.cost >= 0.0
    }

    /// Format the record for display, e.g.
    /// `12/05/2026 - Oil change ($150.00) | synthetic oil`
    pub fn format(&self) -> String {
        let cost = if self.cost > 0.0 {
            format!("${:.2}", self.cost)
        } else {
            "cost not set".to_string()
        };
        let mut line = format!(
            "{} - {} ({})",
            self.date.format("%d/%m/%Y"),
            self.service_type,
            cost
        );
        if let Some(ref description) = self.description {
            if !description.is_empty() {
                line.push_str(" | ");
                line.push_str(description);
            }
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_record() {
        let record = MaintenanceRecord::new(date(2026, 5, 12), "Oil change", 150.0, None);
        assert!(record.is_valid());
    }

    #[test]
    fn test_blank_service_type_is_invalid() {
        let record = MaintenanceRecord::new(date(2026, 5, 12), "   ", 150.0, None);
        assert!(!record.is_valid());
    }

    #[test]
    fn test_negative_cost_is_invalid() {
        let record = MaintenanceRecord::new(date(2026, 5, 12), "Oil change", -1.0, None);
        assert!(!record.is_valid());
    }

    #[test]
    fn test_non_finite_cost_is_invalid() {
        let record = MaintenanceRecord::new(date(2026, 5, 12), "Oil change", f64::NAN, None);
        assert!(!record.is_valid());
    }

    #[test]
    fn test_zero_cost_is_valid_but_shown_as_not_set() {
        let record = MaintenanceRecord::new(date(2026, 5, 12), "Inspection", 0.0, None);
        assert!(record.is_valid());
        assert_eq!(record.format(), "12/05/2026 - Inspection (cost not set)");
    }

    #[test]
    fn test_format_with_cost_and_description() {
        let record = MaintenanceRecord::new(
            date(2026, 5, 12),
            "Oil change",
            150.0,
            Some("synthetic oil".to_string()),
        );
        assert_eq!(
            record.format(),
            "12/05/2026 - Oil change ($150.00) | synthetic oil"
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let record = MaintenanceRecord::new(
            date(2026, 3, 1),
            "Brake pads",
            420.5,
            Some("front axle".to_string()),
        );
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"date\":\"2026-03-01\""));
        assert!(json.contains("\"serviceType\":\"Brake pads\""));

        let back: MaintenanceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_deserialize_defaults() {
        let back: MaintenanceRecord =
            serde_json::from_str(r#"{"date":"2026-03-01","serviceType":"Wash"}"#).unwrap();
        assert_eq!(back.cost, 0.0);
        assert_eq!(back.description, None);
    }
}
