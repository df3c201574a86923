use log::trace;
use ordercache_core::{Quantity, Side};
use ordercache_ports::{MatchCandidate, MatchingAlgorithm};

/// Insertion-order crossing with same-company exclusion
///
/// Buys are visited in insertion order. Each buy scans the sells that still
/// have quantity left, from the front, and takes `min(buy, sell)` from every
/// sell of a different company until the buy is exhausted. Price and time
/// priority play no part: the result depends only on input order and the
/// company exclusion.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossCompanyMatcher;

impl CrossCompanyMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl MatchingAlgorithm for CrossCompanyMatcher {
    fn name(&self) -> &str {
        "Cross-Company"
    }

    fn can_match(&self, buy: &MatchCandidate<'_>, sell: &MatchCandidate<'_>) -> bool {
        buy.side == Side::Buy
            && sell.side == buy.side.opposite()
            && buy.company != sell.company
    }

    fn match_candidates(&self, candidates: &mut [MatchCandidate<'_>]) -> Quantity {
        // Exhausted candidates cannot contribute to any pair
        let mut buys = Vec::new();
        let mut sells = Vec::new();
        for (idx, candidate) in candidates.iter().enumerate() {
            if candidate.quantity == 0 {
                continue;
            }
            match candidate.side {
                Side::Buy => buys.push(idx),
                Side::Sell => sells.push(idx),
            }
        }

        let mut total: Quantity = 0;

        for &buy_idx in &buys {
            let mut cursor = 0;
            while cursor < sells.len() {
                let sell_idx = sells[cursor];
                if !self.can_match(&candidates[buy_idx], &candidates[sell_idx]) {
                    cursor += 1;
                    continue;
                }

                let matched = candidates[buy_idx]
                    .quantity
                    .min(candidates[sell_idx].quantity);
                total = total.saturating_add(matched);
                candidates[buy_idx].quantity -= matched;
                candidates[sell_idx].quantity -= matched;

                trace!(
                    "Crossed {} against {} for {}",
                    candidates[buy_idx].handle, candidates[sell_idx].handle, matched
                );

                if candidates[sell_idx].quantity == 0 {
                    sells.remove(cursor);
                } else {
                    cursor += 1;
                }

                if candidates[buy_idx].quantity == 0 {
                    break;
                }
            }
        }

        total
    }
}
