//! Combatant health, block and buff arithmetic.
//!
//! The same rules apply to the player and to every opponent:
//!
//! - block absorbs an incoming hit before health does
//! - health is clamped to `[0, max_health]`
//! - self-damage bypasses block
//! - buff progress is added to every later damage-per-hit of the owner

/// Result of one [`CombatantState::apply_damage`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOutcome {
    /// Raw amount of the hit before block.
    pub amount: u32,
    /// Portion absorbed by block.
    pub blocked_amount: u32,
    /// Health actually removed. 0 when the hit was fully blocked.
    pub health_damage: u32,
    /// True when nothing got through block (including zero-damage hits).
    pub fully_blocked: bool,
    /// True when this hit brought health to 0.
    pub died: bool,
}

/// Health, block and buff progress of one participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantState {
    max_health: u32,
    health: u32,
    block: u32,
    buff_progress: i32,
}

impl CombatantState {
    /// Creates a combatant at full health with no block and no buff.
    pub const fn new(max_health: u32) -> Self {
        Self {
            max_health,
            health: max_health,
            block: 0,
            buff_progress: 0,
        }
    }

    /// Creates a combatant with `health` clamped to `max_health`.
    pub fn with_health(max_health: u32, health: u32) -> Self {
        Self {
            health: health.min(max_health),
            ..Self::new(max_health)
        }
    }

    pub const fn health(&self) -> u32 {
        self.health
    }

    pub const fn max_health(&self) -> u32 {
        self.max_health
    }

    pub const fn block(&self) -> u32 {
        self.block
    }

    pub const fn buff_progress(&self) -> i32 {
        self.buff_progress
    }

    pub const fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Applies one hit: block first, then health.
    ///
    /// A hit no larger than the current block is reported as fully blocked,
    /// even when it is exactly equal to the block.
    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        let absorbed = self.block.min(amount);
        self.block -= absorbed;
        let remaining = amount - absorbed;

        if remaining == 0 {
            return DamageOutcome {
                amount,
                blocked_amount: absorbed,
                health_damage: 0,
                fully_blocked: true,
                died: false,
            };
        }

        self.health = self.health.saturating_sub(remaining);
        DamageOutcome {
            amount,
            blocked_amount: absorbed,
            health_damage: remaining,
            fully_blocked: false,
            died: self.health == 0,
        }
    }

    pub fn add_block(&mut self, amount: u32) {
        self.block = self.block.saturating_add(amount);
    }

    pub fn reset_block(&mut self) {
        self.block = 0;
    }

    /// Restores health up to the maximum. Returns the health actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    /// Removes health directly, ignoring block. Returns the health actually lost.
    pub fn apply_self_damage(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_sub(amount);
        before - self.health
    }

    pub fn add_buff(&mut self, amount: i32) {
        self.buff_progress = self.buff_progress.saturating_add(amount);
    }

    /// Restores full health and clears block and buff.
    pub fn reset(&mut self) {
        *self = Self::new(self.max_health);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guarded(health: u32, block: u32) -> CombatantState {
        let mut combatant = CombatantState::with_health(health, health);
        combatant.add_block(block);
        combatant
    }

    #[test]
    fn hit_equal_to_block_is_fully_blocked() {
        let mut target = guarded(20, 5);
        let outcome = target.apply_damage(5);

        assert!(outcome.fully_blocked);
        assert_eq!(outcome.blocked_amount, 5);
        assert_eq!(outcome.health_damage, 0);
        assert_eq!(target.health(), 20);
        assert_eq!(target.block(), 0);
    }

    #[test]
    fn excess_damage_spills_into_health() {
        let mut target = guarded(20, 5);
        let outcome = target.apply_damage(8);

        assert!(!outcome.fully_blocked);
        assert_eq!(outcome.blocked_amount, 5);
        assert_eq!(outcome.health_damage, 3);
        assert_eq!(target.health(), 17);
        assert_eq!(target.block(), 0);
    }

    #[test]
    fn smaller_hit_leaves_remaining_block() {
        let mut target = guarded(20, 10);
        let outcome = target.apply_damage(4);
        assert!(outcome.fully_blocked);
        assert_eq!(target.block(), 6);
    }

    #[test]
    fn lethal_hit_floors_at_zero_and_reports_death() {
        let mut target = guarded(10, 0);
        let outcome = target.apply_damage(25);

        assert!(outcome.died);
        assert_eq!(outcome.health_damage, 25);
        assert_eq!(target.health(), 0);
        assert!(target.is_dead());
    }

    #[test]
    fn heal_caps_at_max_health() {
        let mut target = CombatantState::with_health(30, 25);
        assert_eq!(target.heal(10), 5);
        assert_eq!(target.health(), 30);
    }

    #[test]
    fn self_damage_ignores_block() {
        let mut target = guarded(12, 50);
        assert_eq!(target.apply_self_damage(5), 5);
        assert_eq!(target.health(), 7);
        assert_eq!(target.block(), 50);

        assert_eq!(target.apply_self_damage(100), 7);
        assert!(target.is_dead());
    }

    #[test]
    fn buff_accumulates_with_sign() {
        let mut target = CombatantState::new(10);
        target.add_buff(3);
        target.add_buff(2);
        target.add_buff(-1);
        assert_eq!(target.buff_progress(), 4);

        target.reset();
        assert_eq!(target.buff_progress(), 0);
        assert_eq!(target.health(), 10);
    }
}
