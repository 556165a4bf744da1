//! Budget Challenge scoring and plan editing as pure functions over
//! [`Allocations`] and [`BudgetState`].

use super::state::{Allocations, BudgetState, Category, Verdict, ADJUST_STEP, INCOME_STEP};

const NEEDS_TARGET: f64 = 50.0;
const WANTS_TARGET: f64 = 30.0;
const SAVINGS_TARGET: f64 = 20.0;
/// Charity up to this share is free.
const CHARITY_ALLOWANCE: u32 = 5;

/// Score a plan from 0 to 100 by its distance from 50/30/20.
pub fn score(alloc: &Allocations) -> u32 {
    let distance = (alloc.needs as f64 - NEEDS_TARGET).abs()
        + (alloc.wants as f64 - WANTS_TARGET).abs()
        + (alloc.savings as f64 - SAVINGS_TARGET).abs();
    let charity_penalty = alloc.charity.saturating_sub(CHARITY_ALLOWANCE) as f64 * 2.0;
    let raw = 100.0 - distance * 0.8 - charity_penalty;
    raw.clamp(0.0, 100.0).round() as u32
}

/// Percentage not yet given to any category.
pub fn remaining(alloc: &Allocations) -> u32 {
    100u32.saturating_sub(alloc.total())
}

/// Set `category` to `value`, capped so the plan never exceeds 100%.
pub fn adjust(alloc: &mut Allocations, category: Category, value: u32) {
    let others = alloc.total().saturating_sub(alloc.get(category));
    let max_allowed = 100u32.saturating_sub(others);
    alloc.set(category, value.min(max_allowed));
}

pub fn verdict(alloc: &Allocations) -> Verdict {
    if remaining(alloc) > 0 {
        return Verdict::Incomplete;
    }
    match score(alloc) {
        s if s >= 85 => Verdict::Master,
        s if s >= 70 => Verdict::Good,
        _ => Verdict::KeepTrying,
    }
}

/// Coins a percentage of `income` comes to, rounded.
pub fn allocated_amount(income: u64, pct: u32) -> u64 {
    (income * pct as u64 + 50) / 100
}

/// Back to the 50/30/20 default.
pub fn reset(state: &mut BudgetState) {
    state.alloc = Allocations::default();
    state.verdict = None;
}

/// Move the selected category up or down by one step.
pub fn nudge(state: &mut BudgetState, up: bool) {
    let current = state.alloc.get(state.selected);
    let next = if up {
        current.saturating_add(ADJUST_STEP)
    } else {
        current.saturating_sub(ADJUST_STEP)
    };
    adjust(&mut state.alloc, state.selected, next);
    state.verdict = None;
}

pub fn change_income(state: &mut BudgetState, up: bool) {
    state.income = if up {
        state.income.saturating_add(INCOME_STEP)
    } else {
        state.income.saturating_sub(INCOME_STEP)
    };
}

/// Check the plan. Returns `true` when the best score was raised.
///
/// Only complete plans count towards the best score.
pub fn check(state: &mut BudgetState) -> bool {
    let v = verdict(&state.alloc);
    state.verdict = Some(v);
    if v == Verdict::Incomplete {
        return false;
    }
    let s = score(&state.alloc);
    if s > state.best {
        state.best = s;
        state.best_flash = 15;
        true
    } else {
        false
    }
}

pub fn tick(state: &mut BudgetState, delta_ticks: u32) {
    state.best_flash = state.best_flash.saturating_sub(delta_ticks);
}

/// Saved plans that add up to more than 100% are not usable.
pub fn is_valid(alloc: &Allocations) -> bool {
    alloc.total() <= 100
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(needs: u32, wants: u32, savings: u32, charity: u32) -> Allocations {
        Allocations {
            needs,
            wants,
            savings,
            charity,
        }
    }

    #[test]
    fn ideal_plan_scores_full() {
        assert_eq!(score(&plan(50, 30, 20, 0)), 100);
    }

    #[test]
    fn all_charity_clamps_to_zero() {
        assert_eq!(score(&plan(0, 0, 0, 100)), 0);
    }

    #[test]
    fn small_charity_is_free() {
        assert_eq!(score(&plan(45, 30, 20, 5)), 96);
        // 6% charity costs 2 points on top of the distance.
        assert_eq!(score(&plan(44, 30, 20, 6)), 93);
    }

    #[test]
    fn score_rounds() {
        // distance 3 → 100 - 2.4 = 97.6 → 98
        assert_eq!(score(&plan(53, 30, 20, 0)), 98);
        // distance 2 → 98.4 → 98
        assert_eq!(score(&plan(51, 29, 20, 0)), 98);
    }

    #[test]
    fn remaining_never_negative() {
        assert_eq!(remaining(&plan(50, 30, 20, 0)), 0);
        assert_eq!(remaining(&plan(10, 10, 10, 0)), 70);
        assert_eq!(remaining(&plan(0, 0, 0, 0)), 100);
    }

    #[test]
    fn adjust_caps_at_what_is_left() {
        let mut a = plan(50, 30, 10, 0);
        adjust(&mut a, Category::Savings, 40);
        assert_eq!(a.savings, 20);
        adjust(&mut a, Category::Savings, 5);
        assert_eq!(a.savings, 5);
        adjust(&mut a, Category::Needs, 0);
        assert_eq!(a.needs, 0);
    }

    #[test]
    fn verdict_thresholds() {
        assert_eq!(verdict(&plan(50, 30, 10, 0)), Verdict::Incomplete);
        assert_eq!(verdict(&plan(50, 30, 20, 0)), Verdict::Master);
        // distance 20 → 84
        assert_eq!(verdict(&plan(60, 20, 20, 0)), Verdict::Good);
        // distance 36 → 71.2 → 71
        assert_eq!(verdict(&plan(68, 12, 20, 0)), Verdict::Good);
        // distance 40 → 68
        assert_eq!(verdict(&plan(70, 10, 20, 0)), Verdict::KeepTrying);
    }

    #[test]
    fn amounts_round_to_nearest() {
        assert_eq!(allocated_amount(2000, 50), 1000);
        assert_eq!(allocated_amount(2000, 33), 660);
        assert_eq!(allocated_amount(150, 5), 8); // 7.5 → 8
        assert_eq!(allocated_amount(0, 100), 0);
    }

    #[test]
    fn nudge_moves_selected_category() {
        let mut s = BudgetState::new();
        s.selected = Category::Wants;
        nudge(&mut s, false);
        assert_eq!(s.alloc.wants, 25);
        nudge(&mut s, true);
        nudge(&mut s, true);
        // Capped at 100 - 70.
        assert_eq!(s.alloc.wants, 30);
    }

    #[test]
    fn nudge_down_stops_at_zero() {
        let mut s = BudgetState::new();
        s.selected = Category::Charity;
        nudge(&mut s, false);
        assert_eq!(s.alloc.charity, 0);
    }

    #[test]
    fn income_never_negative() {
        let mut s = BudgetState::new();
        s.income = 50;
        change_income(&mut s, false);
        assert_eq!(s.income, 0);
        change_income(&mut s, true);
        assert_eq!(s.income, 100);
    }

    #[test]
    fn check_raises_best_only_when_complete() {
        let mut s = BudgetState::new();
        s.alloc = plan(50, 30, 10, 0);
        assert!(!check(&mut s));
        assert_eq!(s.verdict, Some(Verdict::Incomplete));
        assert_eq!(s.best, 0);

        s.alloc = plan(60, 20, 20, 0);
        assert!(check(&mut s));
        assert_eq!(s.best, 84);

        s.alloc = plan(70, 10, 20, 0);
        assert!(!check(&mut s));
        assert_eq!(s.best, 84);
    }

    #[test]
    fn reset_restores_default() {
        let mut s = BudgetState::new();
        s.alloc = plan(0, 0, 0, 0);
        s.verdict = Some(Verdict::Incomplete);
        reset(&mut s);
        assert_eq!(s.alloc, Allocations::default());
        assert_eq!(s.verdict, None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_plan() -> impl Strategy<Value = Allocations> {
        (0u32..=100, 0u32..=100, 0u32..=100, 0u32..=100).prop_map(|(n, w, s, c)| Allocations {
            needs: n,
            wants: w,
            savings: s,
            charity: c,
        })
    }

    fn arb_category() -> impl Strategy<Value = Category> {
        prop_oneof![
            Just(Category::Needs),
            Just(Category::Wants),
            Just(Category::Savings),
            Just(Category::Charity),
        ]
    }

    proptest! {
        #[test]
        fn score_in_range_and_deterministic(alloc in arb_plan()) {
            let s = score(&alloc);
            prop_assert!(s <= 100);
            prop_assert_eq!(s, score(&alloc));
        }

        #[test]
        fn adjust_keeps_total_within_100(
            steps in prop::collection::vec((arb_category(), 0u32..=120), 0..40),
        ) {
            let mut alloc = Allocations::default();
            for (cat, value) in steps {
                adjust(&mut alloc, cat, value);
                prop_assert!(alloc.total() <= 100);
                prop_assert_eq!(remaining(&alloc), 100 - alloc.total());
            }
        }

        #[test]
        fn best_only_rises(
            plans in prop::collection::vec(arb_plan(), 0..30),
        ) {
            let mut state = BudgetState::new();
            let mut prev = state.best;
            for alloc in plans {
                state.alloc = alloc;
                check(&mut state);
                prop_assert!(state.best >= prev);
                prev = state.best;
            }
        }
    }
}
