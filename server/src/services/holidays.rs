//! Public holiday provider.
//!
//! Thin client for the Nager.Date API. Holidays only remove days from
//! the business-day calendar, so any failure (network, non-2xx, bad
//! payload) degrades to an empty set with a warning instead of failing
//! the caller's request.

use std::collections::HashSet;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct PublicHoliday {
    date: String,
}

#[derive(Debug, Clone)]
pub struct HolidayService {
    client: reqwest::Client,
    base_url: String,
    country: String,
}

impl HolidayService {
    pub fn new(base_url: impl Into<String>, country: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
            country: country.into(),
        }
    }

    /// Holiday dates for a year, empty on any failure.
    pub async fn holidays_for_year(&self, year: i32) -> HashSet<NaiveDate> {
        match self.fetch(year).await {
            Ok(days) => days,
            Err(e) => {
                warn!(year, error = %e, "Holiday lookup failed, using empty set");
                HashSet::new()
            }
        }
    }

    async fn fetch(&self, year: i32) -> anyhow::Result<HashSet<NaiveDate>> {
        let url = format!(
            "{}/api/v3/PublicHolidays/{}/{}",
            self.base_url.trim_end_matches('/'),
            year,
            self.country
        );
        let holidays: Vec<PublicHoliday> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(holidays
            .iter()
            .filter_map(|h| NaiveDate::parse_from_str(&h.date, "%Y-%m-%d").ok())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nager_payload() {
        let raw = r#"[{"date":"2024-01-01","localName":"Año Nuevo","name":"New Year's Day"},{"date":"2024-02-05","localName":"Día de la Constitución","name":"Constitution Day"}]"#;
        let holidays: Vec<PublicHoliday> = serde_json::from_str(raw).unwrap();
        assert_eq!(holidays.len(), 2);
        assert_eq!(holidays[0].date, "2024-01-01");
    }

    #[tokio::test]
    async fn unreachable_endpoint_degrades_to_empty() {
        let service = HolidayService::new("http://127.0.0.1:1", "MX");
        assert!(service.holidays_for_year(2024).await.is_empty());
    }
}
