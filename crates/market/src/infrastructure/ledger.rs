use dashmap::DashMap;
use propshare_core::{PropertyId, TradeRecord, UserId};

/// Append-only record of executed trades, partitioned by property
///
/// Entries are never mutated or deleted; no API for either exists. Within
/// a partition, append order is timestamp order: appends for one property
/// run inside that property's critical section with a monotonic clock.
pub struct TradeLedger {
    entries: DashMap<PropertyId, Vec<TradeRecord>>,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Append an entry to its property's partition
    pub fn append(&self, record: TradeRecord) {
        self.entries
            .entry(record.property_id.clone())
            .or_default()
            .push(record);
    }

    /// Up to `limit` most recent entries for a property, newest first
    pub fn recent_for(&self, property: &PropertyId, limit: usize) -> Vec<TradeRecord> {
        let Some(partition) = self.entries.get(property) else {
            return Vec::new();
        };
        partition.iter().rev().take(limit).cloned().collect()
    }

    /// A user's entries across all properties, newest first
    pub fn for_user(&self, user: UserId) -> Vec<TradeRecord> {
        let mut records: Vec<TradeRecord> = self
            .entries
            .iter()
            .flat_map(|partition| {
                partition
                    .value()
                    .iter()
                    .filter(|record| record.user_id == user)
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    /// Number of entries recorded for a property
    pub fn len_for(&self, property: &PropertyId) -> usize {
        self.entries
            .get(property)
            .map(|partition| partition.len())
            .unwrap_or(0)
    }
}

impl Default for TradeLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use propshare_core::TradeSide;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn record_at(user: UserId, property: &str, offset_secs: i64) -> TradeRecord {
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        TradeRecord::new_with_time(
            user,
            property,
            TradeSide::Buy,
            10,
            dec!(50),
            base + Duration::seconds(offset_secs),
        )
    }

    #[test]
    fn test_recent_is_newest_first_with_limit() {
        let ledger = TradeLedger::new();
        let user = Uuid::new_v4();
        for offset in 0..6 {
            ledger.append(record_at(user, "PROP00001", offset));
        }

        let recent = ledger.recent_for(&PropertyId::new("PROP00001"), 4);
        assert_eq!(recent.len(), 4);
        let offsets: Vec<i64> = recent
            .iter()
            .map(|r| {
                (r.timestamp - Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()).num_seconds()
            })
            .collect();
        assert_eq!(offsets, vec![5, 4, 3, 2]);
        assert_eq!(ledger.len_for(&PropertyId::new("PROP00001")), 6);
    }

    #[test]
    fn test_unknown_property_is_empty() {
        let ledger = TradeLedger::new();
        assert!(ledger.recent_for(&PropertyId::new("PROP00009"), 20).is_empty());
        assert_eq!(ledger.len_for(&PropertyId::new("PROP00009")), 0);
    }

    #[test]
    fn test_for_user_spans_properties() {
        let ledger = TradeLedger::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        ledger.append(record_at(alice, "PROP00001", 0));
        ledger.append(record_at(bob, "PROP00001", 1));
        ledger.append(record_at(alice, "PROP00002", 2));

        let history = ledger.for_user(alice);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].property_id, PropertyId::new("PROP00002"));
        assert_eq!(history[1].property_id, PropertyId::new("PROP00001"));
    }
}
