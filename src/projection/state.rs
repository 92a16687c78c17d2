//! Running totals carried from one simulated year to the next

use super::cashflows::YearRecord;

/// Totals at the end of a simulated year
///
/// Values are never mutated in place; each year produces a fresh state from
/// the previous one, so any single year can be recomputed from its predecessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionState {
    /// Last completed year (0 before the first year)
    pub year: u32,

    /// Net profit summed through `year`, unrounded
    pub accumulated_profit: f64,

    /// Asset value after `year`'s appreciation, unrounded
    pub property_value: f64,
}

impl ProjectionState {
    /// State before year 1: nothing earned, property worth what was paid
    pub fn initial(total_investment: f64) -> Self {
        Self {
            year: 0,
            accumulated_profit: 0.0,
            property_value: total_investment,
        }
    }

    /// State after `record`'s year
    pub fn after(record: &YearRecord) -> Self {
        Self {
            year: record.year,
            accumulated_profit: record.accumulated_profit,
            property_value: record.property_value,
        }
    }
}
