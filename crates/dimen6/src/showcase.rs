//! Landing page effects: loading bar, counters and the tech-stack marquee.

use std::time::{Duration, Instant};

use dimen6_config::{MarqueeConfig, StatConfig};
use rand::Rng;

/// Interval between loading bar increments.
const LOADER_TICK: Duration = Duration::from_millis(80);

/// Largest single loading bar increment, in percent.
const LOADER_MAX_GAIN: f64 = 18.0;

/// Pause at 100% before the loading screen goes away.
const LOADER_HIDE_DELAY: Duration = Duration::from_millis(300);

/// Counter update interval.
const COUNTER_TICK: Duration = Duration::from_millis(16);

/// Updates a counter takes to reach its target.
const COUNTER_STEPS: u32 = 60;

/// Marquee cycle length at speed 1.
const MARQUEE_BASE_CYCLE: Duration = Duration::from_secs(20);

/// Separator between marquee items.
const MARQUEE_SEPARATOR: &str = "  ✦  ";

/// Fake loading bar shown on startup.
#[derive(Debug)]
pub struct Loader {
    percent: f64,
    next_tick: Instant,
    full_at: Option<Instant>,
    hidden: bool,
}

impl Loader {
    pub fn new(now: Instant) -> Self {
        Self {
            percent: 0.0,
            next_tick: now + LOADER_TICK,
            full_at: None,
            hidden: false,
        }
    }

    /// Advance the bar. Returns `true` on the call that hides the loader.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> bool {
        if self.hidden {
            return false;
        }

        if let Some(full_at) = self.full_at {
            if now.duration_since(full_at) >= LOADER_HIDE_DELAY {
                self.hidden = true;
                return true;
            }
            return false;
        }

        if now >= self.next_tick {
            self.percent = (self.percent + rng.gen_range(0.0..LOADER_MAX_GAIN)).min(100.0);
            self.next_tick = now + LOADER_TICK;
            if self.percent >= 100.0 {
                self.full_at = Some(now);
            }
        }
        false
    }

    /// Progress as shown, in whole percent.
    pub fn percent(&self) -> u16 {
        self.percent.floor() as u16
    }

    pub fn ratio(&self) -> f64 {
        self.percent / 100.0
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Time until the loader needs another tick.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        if self.hidden {
            return None;
        }
        let due = match self.full_at {
            Some(full_at) => full_at + LOADER_HIDE_DELAY,
            None => self.next_tick,
        };
        Some(due.saturating_duration_since(now))
    }
}

/// Number that counts up from zero once started.
#[derive(Debug, Clone)]
pub struct Counter {
    label: String,
    target: u32,
    suffix: String,
    started: Option<Instant>,
}

impl Counter {
    pub fn new(stat: &StatConfig) -> Self {
        Self {
            label: stat.label.clone(),
            target: stat.target,
            suffix: stat.suffix.clone(),
            started: None,
        }
    }

    /// Start counting; later calls keep the first start time.
    pub fn start(&mut self, now: Instant) {
        self.started.get_or_insert(now);
    }

    /// Value at `now`: `target / 60` more every 16 ms, capped at the target.
    pub fn value_at(&self, now: Instant) -> u32 {
        let Some(started) = self.started else {
            return 0;
        };
        let ticks = (now.duration_since(started).as_millis() / COUNTER_TICK.as_millis()) as u32;
        if ticks >= COUNTER_STEPS {
            return self.target;
        }
        let step = self.target as f64 / COUNTER_STEPS as f64;
        (ticks as f64 * step).floor() as u32
    }

    /// Value with its suffix.
    pub fn text_at(&self, now: Instant) -> String {
        format!("{}{}", self.value_at(now), self.suffix)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the counter is still moving at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.started.is_some() && self.value_at(now) < self.target
    }
}

/// `20 / speed` seconds, or the speed-1 cycle when that is not a usable
/// duration.
fn marquee_cycle(speed: f64) -> Duration {
    Duration::try_from_secs_f64(MARQUEE_BASE_CYCLE.as_secs_f64() / speed)
        .ok()
        .filter(|cycle| !cycle.is_zero())
        .unwrap_or(MARQUEE_BASE_CYCLE)
}

/// Endlessly scrolling line of items.
#[derive(Debug, Clone)]
pub struct Marquee {
    chars: Vec<char>,
    cycle: Duration,
}

impl Marquee {
    pub fn new(config: &MarqueeConfig) -> Self {
        let text: String = config
            .items
            .iter()
            .map(|item| format!("{item}{MARQUEE_SEPARATOR}"))
            .collect();
        Self {
            chars: text.chars().collect(),
            cycle: marquee_cycle(config.speed),
        }
    }

    /// Time for one full pass of the text.
    pub fn cycle(&self) -> Duration {
        self.cycle
    }

    /// First visible character after `elapsed` of scrolling.
    pub fn offset(&self, elapsed: Duration) -> usize {
        let len = self.chars.len();
        if len == 0 {
            return 0;
        }
        let phase = (elapsed.as_secs_f64() % self.cycle.as_secs_f64()) / self.cycle.as_secs_f64();
        (phase * len as f64) as usize % len
    }

    /// The `width` characters visible after `elapsed`, wrapping around.
    pub fn window(&self, elapsed: Duration, width: usize) -> String {
        if self.chars.is_empty() {
            return String::new();
        }
        self.chars
            .iter()
            .cycle()
            .skip(self.offset(elapsed))
            .take(width)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_loader_fills_then_hides() {
        let mut rng = StdRng::seed_from_u64(2);
        let start = Instant::now();
        let mut loader = Loader::new(start);
        let mut last = 0;
        let mut hidden_at = None;

        for ms in (0..10_000).step_by(10) {
            let now = start + Duration::from_millis(ms);
            if loader.tick(now, &mut rng) {
                hidden_at = Some(ms);
                break;
            }
            assert!(loader.percent() >= last);
            assert!(loader.percent() <= 100);
            last = loader.percent();
        }

        assert!(loader.is_hidden());
        assert_eq!(loader.percent(), 100);
        // At least six increments of under 18% each are needed.
        assert!(hidden_at.unwrap() >= 6 * 80 + 300);
        assert_eq!(loader.time_until_next(start), None);
    }

    #[test]
    fn test_loader_waits_for_tick() {
        let mut rng = StdRng::seed_from_u64(2);
        let start = Instant::now();
        let mut loader = Loader::new(start);
        loader.tick(start + Duration::from_millis(79), &mut rng);
        assert_eq!(loader.percent(), 0);
        assert_eq!(
            loader.time_until_next(start + Duration::from_millis(79)),
            Some(Duration::from_millis(1))
        );
    }

    #[test]
    fn test_counter_counts_to_target() {
        let start = Instant::now();
        let mut counter = Counter::new(&StatConfig::new("projects", 120, "+"));
        assert_eq!(counter.value_at(start), 0);

        counter.start(start);
        assert_eq!(counter.value_at(start), 0);
        assert_eq!(counter.value_at(start + Duration::from_millis(16)), 2);
        assert_eq!(counter.value_at(start + Duration::from_millis(16 * 30)), 60);
        assert_eq!(counter.text_at(start + Duration::from_millis(16 * 60)), "120+");
        assert_eq!(counter.value_at(start + Duration::from_secs(10)), 120);
        assert!(counter.is_animating(start + Duration::from_millis(500)));
        assert!(!counter.is_animating(start + Duration::from_secs(1)));
    }

    #[test]
    fn test_counter_floors_fractional_steps() {
        let start = Instant::now();
        let mut counter = Counter::new(&StatConfig::new("years", 6, ""));
        counter.start(start);
        // 6 / 60 = 0.1 per tick
        assert_eq!(counter.value_at(start + Duration::from_millis(16 * 9)), 0);
        assert_eq!(counter.value_at(start + Duration::from_millis(16 * 10)), 1);
        assert_eq!(counter.value_at(start + Duration::from_millis(16 * 59)), 5);
        assert_eq!(counter.value_at(start + Duration::from_millis(16 * 60)), 6);
    }

    #[test]
    fn test_counter_start_is_sticky() {
        let start = Instant::now();
        let mut counter = Counter::new(&StatConfig::new("x", 60, ""));
        counter.start(start);
        counter.start(start + Duration::from_millis(320));
        assert_eq!(counter.value_at(start + Duration::from_millis(320)), 20);
    }

    #[test]
    fn test_marquee_cycle_follows_speed() {
        let marquee = Marquee::new(&MarqueeConfig {
            items: vec!["Rust".to_string()],
            speed: 2.0,
        });
        assert_eq!(marquee.cycle(), Duration::from_secs(10));
    }

    #[test]
    fn test_marquee_unusable_speed_uses_base_cycle() {
        for speed in [f64::NAN, 1e-300, f64::INFINITY, -1.0, 0.0] {
            let marquee = Marquee::new(&MarqueeConfig {
                items: vec!["Rust".to_string()],
                speed,
            });
            assert_eq!(marquee.cycle(), Duration::from_secs(20), "speed {speed}");
            assert_eq!(marquee.window(Duration::from_secs(3), 4).chars().count(), 4);
        }
    }

    #[test]
    fn test_marquee_scrolls_and_wraps() {
        let marquee = Marquee::new(&MarqueeConfig {
            items: vec!["ab".to_string(), "cd".to_string()],
            speed: 1.0,
        });
        // "ab  ✦  cd  ✦  " is 14 characters.
        assert_eq!(marquee.offset(Duration::ZERO), 0);
        assert_eq!(marquee.offset(Duration::from_secs(10)), 7);
        assert_eq!(marquee.offset(Duration::from_secs(20)), 0);
        assert_eq!(marquee.window(Duration::ZERO, 4), "ab  ");
        assert_eq!(marquee.window(Duration::from_secs(10), 9), "cd  ✦  ab");
    }

    #[test]
    fn test_empty_marquee() {
        let marquee = Marquee::new(&MarqueeConfig {
            items: Vec::new(),
            speed: 1.0,
        });
        assert_eq!(marquee.window(Duration::from_secs(3), 10), "");
    }
}
