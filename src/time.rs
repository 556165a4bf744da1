//! Frame clock and calendar.
//!
//! `draw_web()` fires at display rate with an uneven delta. [`GameTime`]
//! turns that into whole ticks (10 per second in the arcade) so energy
//! regeneration and flash timers are frame-rate independent and can be
//! driven directly from tests.

use chrono::NaiveDate;

/// Longest gap fed into the accumulator. A backgrounded tab resumes with at
/// most this much catch-up.
const MAX_FRAME_GAP_MS: f64 = 500.0;

pub struct GameTime {
    ms_per_tick: f64,
    /// Milliseconds not yet consumed as ticks.
    accumulator: f64,
    pub total_ticks: u64,
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a `performance.now()` timestamp; returns the ticks to run this
    /// frame. The first call only records the timestamp.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_GAP_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

/// `performance.now()`, or 0 when there is no window.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// The player's local calendar day, which gates the daily bonus.
#[cfg(target_arch = "wasm32")]
pub fn local_today() -> NaiveDate {
    let d = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(d.get_full_year() as i32, d.get_month() + 1, d.get_date())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_returns_zero_ticks() {
        let mut gt = GameTime::new(10);
        assert_eq!(gt.update(1234.0), 0);
    }

    #[test]
    fn remainder_carries_between_frames() {
        let mut gt = GameTime::new(10);
        gt.update(0.0);
        assert_eq!(gt.update(350.0), 3);
        // 50ms left over + 50ms delta.
        assert_eq!(gt.update(400.0), 1);
        assert_eq!(gt.total_ticks, 4);
    }

    #[test]
    fn backgrounded_tab_is_clamped() {
        let mut gt = GameTime::new(10);
        gt.update(0.0);
        assert_eq!(gt.update(60_000.0), 5);
    }

    #[test]
    fn clock_going_backwards_yields_nothing() {
        let mut gt = GameTime::new(10);
        gt.update(1000.0);
        assert_eq!(gt.update(900.0), 0);
        assert_eq!(gt.update(1000.0), 1);
    }

    #[test]
    fn steady_60fps_is_about_ten_ticks_a_second() {
        let mut gt = GameTime::new(10);
        gt.update(0.0);
        let total: u32 = (1..=60).map(|i| gt.update(i as f64 * 16.667)).sum();
        assert!((9..=11).contains(&total), "expected ~10 ticks, got {}", total);
    }

    #[test]
    fn regen_interval_in_real_time() {
        // Default regeneration every 50 ticks is five seconds of frames.
        let mut gt = GameTime::new(10);
        gt.update(0.0);
        let total: u32 = (1..=300).map(|i| gt.update(i as f64 * 16.667)).sum();
        assert!((49..=51).contains(&total));
    }

    #[test]
    fn today_is_a_real_date() {
        let today = local_today();
        assert!(today > NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }
}
