//! Energy meter - player resource gating the ultimate.

use bevy::prelude::*;

/// Инвариант: 0.0 ≤ value ≤ max после каждой мутации.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EnergyMeter {
    value: f32,
    max: f32,
}

impl Default for EnergyMeter {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl EnergyMeter {
    /// Empty meter with the given capacity.
    pub fn new(max: f32) -> Self {
        Self {
            value: 0.0,
            max: max.max(0.0),
        }
    }

    pub fn with_value(max: f32, value: f32) -> Self {
        let mut meter = Self::new(max);
        meter.set(value);
        meter
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Fill fraction for the UI (0..=1).
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.value / self.max
        } else {
            0.0
        }
    }

    pub fn is_full(&self) -> bool {
        self.value >= self.max
    }

    /// Reward for landing a hit. No-op when already full.
    /// Returns true if the value changed.
    pub fn gain(&mut self, amount: f32) -> bool {
        if self.is_full() {
            return false;
        }
        self.apply(amount)
    }

    /// Penalty for being hit. Returns true if the value changed.
    pub fn lose(&mut self, amount: f32) -> bool {
        self.apply(-amount)
    }

    /// Spend the whole meter. Refused (meter untouched) unless full.
    pub fn spend(&mut self) -> bool {
        if !self.is_full() {
            return false;
        }
        self.value = 0.0;
        true
    }

    pub fn set(&mut self, value: f32) {
        self.value = Self::clamp(value, self.max);
    }

    fn apply(&mut self, delta: f32) -> bool {
        let before = self.value;
        self.value = Self::clamp(self.value + delta, self.max);
        self.value != before
    }

    fn clamp(value: f32, max: f32) -> f32 {
        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, max)
        }
    }
}
