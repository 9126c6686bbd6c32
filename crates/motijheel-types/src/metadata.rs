//! Fixed auxiliary-field schema for DSE observations.
//!
//! Every observation carries the same set of numeric auxiliary fields
//! alongside its primary value (the last trade price). The validator
//! requires all of them; unknown extras are dropped.

/// Metadata keys carried by every observation, in table-column order.
pub const KEYS: [&str; 8] = [
    "high",
    "low",
    "close_price",
    "ycp",
    "change",
    "trade_count",
    "value_mn",
    "volume",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique() {
        let mut sorted: Vec<_> = KEYS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), KEYS.len());
    }
}
