//! Per-turn energy budget.

/// Spendable energy with a nominal maximum.
///
/// `current` may exceed `maximum` after an overcharge effect; the excess lasts
/// until the next [`restore`](Self::restore).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyPool {
    maximum: u32,
    current: u32,
}

impl EnergyPool {
    /// Creates a full pool.
    pub const fn new(maximum: u32) -> Self {
        Self {
            maximum,
            current: maximum,
        }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn maximum(&self) -> u32 {
        self.maximum
    }

    /// Sets `current` back to the nominal maximum, discarding any overcharge.
    pub fn restore(&mut self) {
        self.current = self.maximum;
    }

    /// Spends `amount` if affordable. Leaves the pool untouched otherwise.
    pub fn try_spend(&mut self, amount: u32) -> bool {
        if amount > self.current {
            return false;
        }
        self.current -= amount;
        true
    }

    /// Adds `amount`, uncapped by the maximum.
    pub fn gain(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount);
    }

    pub const fn can_afford(&self, amount: u32) -> bool {
        amount <= self.current
    }
}
