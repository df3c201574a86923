mod order;
mod side;

pub use order::Order;
pub use side::{ParseSideError, Side};
