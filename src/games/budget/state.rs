//! Budget Challenge state definitions.

use serde::{Deserialize, Serialize};

/// Percentage of income given to each category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Allocations {
    pub needs: u32,
    pub wants: u32,
    pub savings: u32,
    pub charity: u32,
}

impl Default for Allocations {
    /// The 50/30/20 rule, nothing to charity.
    fn default() -> Self {
        Self {
            needs: 50,
            wants: 30,
            savings: 20,
            charity: 0,
        }
    }
}

impl Allocations {
    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Needs => self.needs,
            Category::Wants => self.wants,
            Category::Savings => self.savings,
            Category::Charity => self.charity,
        }
    }

    pub fn set(&mut self, category: Category, value: u32) {
        match category {
            Category::Needs => self.needs = value,
            Category::Wants => self.wants = value,
            Category::Savings => self.savings = value,
            Category::Charity => self.charity = value,
        }
    }

    /// Sum of all four categories. Saturates so a corrupt saved plan reads
    /// as over-allocated instead of wrapping.
    pub fn total(&self) -> u32 {
        self.needs
            .saturating_add(self.wants)
            .saturating_add(self.savings)
            .saturating_add(self.charity)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Needs,
    Wants,
    Savings,
    Charity,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Needs,
            Category::Wants,
            Category::Savings,
            Category::Charity,
        ]
    }

    pub fn name(&self) -> &str {
        match self {
            Category::Needs => "Needs",
            Category::Wants => "Wants",
            Category::Savings => "Savings",
            Category::Charity => "Charity",
        }
    }

    pub fn hint(&self) -> &str {
        match self {
            Category::Needs => "food, home, transport",
            Category::Wants => "fun, games, gifts",
            Category::Savings => "goals, rainy day",
            Category::Charity => "sharing with others",
        }
    }

    /// Recommended share, if the rule names one.
    pub fn target(&self) -> u32 {
        match self {
            Category::Needs => 50,
            Category::Wants => 30,
            Category::Savings => 20,
            Category::Charity => 0,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Category::Needs => 0,
            Category::Wants => 1,
            Category::Savings => 2,
            Category::Charity => 3,
        }
    }
}

/// Outcome of checking a plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Less than 100% has been given out.
    Incomplete,
    Master,
    Good,
    KeepTrying,
}

impl Verdict {
    pub fn message(&self) -> &str {
        match self {
            Verdict::Incomplete => "Give out all 100% of your income before checking.",
            Verdict::Master => "Excellent! You're a budget master!",
            Verdict::Good => "Good job! There's still room to grow.",
            Verdict::KeepTrying => "Try to get closer to 50/30/20. You can do it!",
        }
    }
}

pub const DEFAULT_INCOME: u64 = 2000;
pub const INCOME_STEP: u64 = 100;
/// Percentage points moved by one adjust press.
pub const ADJUST_STEP: u32 = 5;

pub struct BudgetState {
    pub alloc: Allocations,
    /// Monthly income used for the coin preview. Not persisted.
    pub income: u64,
    pub selected: Category,
    pub best: u32,
    /// Result of the last check, cleared when the plan changes.
    pub verdict: Option<Verdict>,
    /// Ticks remaining for the "new best" highlight.
    pub best_flash: u32,
}

impl BudgetState {
    pub fn new() -> Self {
        Self {
            alloc: Allocations::default(),
            income: DEFAULT_INCOME,
            selected: Category::Needs,
            best: 0,
            verdict: None,
            best_flash: 0,
        }
    }
}
