//! Constraint strengths.
//!
//! A strength collapses the (strong, medium, weak) priority components into
//! a single ordered value so that a higher category always dominates any
//! combination of lower ones. `REQUIRED` is a distinguished maximal
//! sentinel: it is never produced by component arithmetic and a required
//! constraint is never relaxed away.

/// The priority of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Strength(f64);

impl Strength {
    /// The required strength. Constraints at this strength must hold.
    pub const REQUIRED: Strength = Strength(1_001_001_000.0);
    /// The strong strength category.
    pub const STRONG: Strength = Strength(1_000_000.0);
    /// The medium strength category.
    pub const MEDIUM: Strength = Strength(1_000.0);
    /// The weak strength category.
    pub const WEAK: Strength = Strength(1.0);

    /// Combine the three priority components into a strength.
    ///
    /// Each component is clamped to `[0, 1000]` and weighted so that any
    /// strong amount outranks every medium/weak combination. The result is
    /// capped just below [`Strength::REQUIRED`]; the sentinel cannot be
    /// reached through this constructor.
    pub fn new(strong: f64, medium: f64, weak: f64) -> Self {
        Self::weighted(strong, medium, weak, 1.0)
    }

    /// Like [`Strength::new`] with a multiplier applied to each component.
    pub fn weighted(strong: f64, medium: f64, weak: f64, weight: f64) -> Self {
        let mut value = 0.0;
        value += (strong * weight).clamp(0.0, 1000.0) * 1_000_000.0;
        value += (medium * weight).clamp(0.0, 1000.0) * 1_000.0;
        value += (weak * weight).clamp(0.0, 1000.0);
        Strength(value.min(Self::REQUIRED.0 - 1.0))
    }

    /// Clamp a raw strength value into the valid `[0, REQUIRED]` range.
    pub fn clip(value: f64) -> Self {
        Strength(value.clamp(0.0, Self::REQUIRED.0))
    }

    /// The raw weight of this strength, used as an objective coefficient.
    pub fn raw(self) -> f64 {
        self.0
    }

    /// Whether this is the required strength.
    pub fn is_required(self) -> bool {
        self.0 >= Self::REQUIRED.0
    }
}
