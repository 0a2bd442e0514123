use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::RecordSetError;

/// Raw historical-price response from the provider
///
/// The body is kept exactly as received; accessors read into it lazily so
/// fields the provider adds later pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceRecordSet(Value);

/// Trading day of one `historical` entry
///
/// Price and volume fields are left in the raw body and never validated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoricalRecord {
    pub date: NaiveDate,
}

impl PriceRecordSet {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// The `historical` array, newest first as delivered by the provider
    pub fn historical(&self) -> Option<&Vec<Value>> {
        self.0.get("historical").and_then(Value::as_array)
    }

    /// Number of daily entries, zero when the array is absent
    pub fn len(&self) -> usize {
        self.historical().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the date of the first `limit` entries
    pub fn records(&self, limit: usize) -> Result<Vec<HistoricalRecord>, RecordSetError> {
        let historical = self.historical().ok_or(RecordSetError::MissingHistorical)?;

        historical
            .iter()
            .take(limit)
            .enumerate()
            .map(|(index, entry)| {
                HistoricalRecord::deserialize(entry).map_err(|e| RecordSetError::InvalidRecord {
                    index,
                    reason: e.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> PriceRecordSet {
        PriceRecordSet::new(json!({
            "symbol": "AAPL",
            "historical": [
                {"date": "2024-01-03", "open": 184.22, "high": 185.88, "low": 183.43, "close": 184.25, "volume": 58414460, "vwap": 184.52},
                {"date": "2024-01-02", "open": 187.15, "high": 188.44, "low": 183.89, "close": 185.64, "volume": 82488700},
                {"date": "2024-01-01", "close": 192.53}
            ]
        }))
    }

    #[test]
    fn test_accessors() {
        let set = sample();

        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_records_respects_limit_and_order() {
        let records = sample().records(2).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_records_ignore_price_field_types() {
        let set = PriceRecordSet::new(json!({
            "historical": [
                {"date": "2024-01-03", "volume": "58,414,460"},
                {"date": "2024-01-02", "open": "n/a", "close": null},
                {"date": "2024-01-01"}
            ]
        }));

        let dates: Vec<NaiveDate> = set.records(3).unwrap().into_iter().map(|r| r.date).collect();

        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ]
        );
    }

    #[test]
    fn test_missing_historical() {
        let set = PriceRecordSet::new(json!({"Error Message": "Invalid API KEY."}));

        assert!(set.historical().is_none());
        assert!(set.is_empty());
        assert_eq!(set.records(3).unwrap_err(), RecordSetError::MissingHistorical);
    }

    #[test]
    fn test_invalid_date() {
        let set = PriceRecordSet::new(json!({"historical": [{"date": "03/01/2024"}]}));

        assert!(matches!(
            set.records(1).unwrap_err(),
            RecordSetError::InvalidRecord { index: 0, .. }
        ));
    }

    #[test]
    fn test_serializes_unmodified() {
        let raw = json!({"symbol": "MSFT", "historical": [], "extra": {"k": 1}});
        let set = PriceRecordSet::new(raw.clone());

        assert_eq!(serde_json::to_value(&set).unwrap(), raw);
    }
}
