use serde::{Deserialize, Serialize};

use super::Side;
use crate::values::{CompanyId, OrderId, Quantity, SecurityId, UserId};

/// A live order held by the cache
///
/// Everything except `quantity` is fixed at construction. Quantity only
/// ever goes down, and only through matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    order_id: OrderId,
    security_id: SecurityId,
    side: Side,
    quantity: Quantity,
    user: UserId,
    company: CompanyId,
}

impl Order {
    pub fn new(
        order_id: impl Into<OrderId>,
        security_id: impl Into<SecurityId>,
        side: Side,
        quantity: Quantity,
        user: impl Into<UserId>,
        company: impl Into<CompanyId>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            security_id: security_id.into(),
            side,
            quantity,
            user: user.into(),
            company: company.into(),
        }
    }

    /// Shorthand for a buy order
    pub fn buy(
        order_id: impl Into<OrderId>,
        security_id: impl Into<SecurityId>,
        quantity: Quantity,
        user: impl Into<UserId>,
        company: impl Into<CompanyId>,
    ) -> Self {
        Self::new(order_id, security_id, Side::Buy, quantity, user, company)
    }

    /// Shorthand for a sell order
    pub fn sell(
        order_id: impl Into<OrderId>,
        security_id: impl Into<SecurityId>,
        quantity: Quantity,
        user: impl Into<UserId>,
        company: impl Into<CompanyId>,
    ) -> Self {
        Self::new(order_id, security_id, Side::Sell, quantity, user, company)
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn security_id(&self) -> &str {
        &self.security_id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    /// True once matching has consumed the whole quantity
    pub fn is_exhausted(&self) -> bool {
        self.quantity == 0
    }

    /// Reduce the open quantity, saturating at zero
    ///
    /// Only the store's matching write-back calls this.
    #[doc(hidden)]
    pub fn reduce_quantity(&mut self, by: Quantity) {
        self.quantity = self.quantity.saturating_sub(by);
    }
}
