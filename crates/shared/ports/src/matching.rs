use ordercache_core::{Order, OrderHandle, Quantity, Side};

/// Working view of one record handed to a matching algorithm
///
/// `quantity` is a copy the algorithm is free to reduce; the store writes
/// the reduced values back once the algorithm returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate<'a> {
    pub handle: OrderHandle,
    pub side: Side,
    pub company: &'a str,
    pub quantity: Quantity,
}

impl<'a> MatchCandidate<'a> {
    pub fn from_order(handle: OrderHandle, order: &'a Order) -> Self {
        Self {
            handle,
            side: order.side(),
            company: order.company(),
            quantity: order.quantity(),
        }
    }
}

/// Port for order matching algorithms
///
/// Candidates arrive in bucket order (insertion order within one security).
/// Implementations must be deterministic for a given input order.
pub trait MatchingAlgorithm: Send + Sync {
    /// Check if a buy and a sell candidate are allowed to cross
    fn can_match(&self, buy: &MatchCandidate<'_>, sell: &MatchCandidate<'_>) -> bool;

    /// Pair the candidates and return the total matched quantity
    ///
    /// Post-match quantities are left in `candidates`.
    fn match_candidates(&self, candidates: &mut [MatchCandidate<'_>]) -> Quantity;

    /// Get the name of the algorithm
    fn name(&self) -> &str;
}
