//! Day/night and rain cycles.

use crate::random::RandomSource;
use serde::{Deserialize, Serialize};

/// Time of day
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayPhase {
    Day,
    Night,
}

impl DayPhase {
    /// Phase at a given step when the cycle flips every `day_length` steps.
    pub fn from_step(step: u64, day_length: u64) -> DayPhase {
        if day_length == 0 {
            return DayPhase::Day;
        }
        if (step / day_length) % 2 == 0 {
            DayPhase::Day
        } else {
            DayPhase::Night
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DayPhase::Day => "day",
            DayPhase::Night => "night",
        }
    }
}

/// Weather configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Steps between day/night flips
    pub day_length: u64,
    /// Steps a rain shower lasts
    pub rain_duration: u64,
    /// Dry spells last between 1 and this many steps
    pub max_dry_spell: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            day_length: 20,
            rain_duration: 8,
            max_dry_spell: 40,
        }
    }
}

/// Environment flags advanced once per step and pushed into every organism.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Weather {
    pub phase: DayPhase,
    pub raining: bool,
    /// Steps until the raining flag next toggles; never zero between steps
    pub rain_timer: u64,
    config: WeatherConfig,
}

impl Weather {
    /// Daytime, dry, with a freshly drawn dry spell.
    pub fn new<R: RandomSource + ?Sized>(config: &WeatherConfig, rng: &mut R) -> Self {
        Self {
            phase: DayPhase::Day,
            raining: false,
            rain_timer: Self::draw_dry_spell(config, rng),
            config: config.clone(),
        }
    }

    fn draw_dry_spell<R: RandomSource + ?Sized>(config: &WeatherConfig, rng: &mut R) -> u64 {
        let max = config.max_dry_spell.clamp(1, u32::MAX as u64) as u32;
        rng.next_below(max) as u64 + 1
    }

    #[inline]
    pub fn is_night(&self) -> bool {
        self.phase == DayPhase::Night
    }

    #[inline]
    pub fn is_raining(&self) -> bool {
        self.raining
    }

    /// Advance clocks for `step` (the already-incremented step counter).
    pub fn advance<R: RandomSource + ?Sized>(&mut self, step: u64, rng: &mut R) {
        let phase = DayPhase::from_step(step, self.config.day_length);
        if phase != self.phase {
            self.phase = phase;
            log::debug!("step {}: {} falls", step, self.phase.name());
        }

        self.rain_timer = self.rain_timer.saturating_sub(1);
        if self.rain_timer == 0 {
            self.raining = !self.raining;
            self.rain_timer = if self.raining {
                self.config.rain_duration.max(1)
            } else {
                Self::draw_dry_spell(&self.config, rng)
            };
            log::debug!(
                "step {}: rain {} for {} steps",
                step,
                if self.raining { "starts" } else { "stops" },
                self.rain_timer
            );
        }
    }

    /// Short "day, dry" style label for logs
    pub fn describe(&self) -> String {
        format!(
            "{}, {}",
            self.phase.name(),
            if self.raining { "rain" } else { "dry" }
        )
    }
}
