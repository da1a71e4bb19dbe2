/// Custom actions for orders beyond plain status assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Moves the order one step along the canonical status order.
    ///
    /// # Errors
    /// Fails for an order that is already delivered.
    Advance,
}
