//! Scene configuration.
//!
//! Defaults reproduce the hero scene. Front-ends may override a handful of
//! knobs from `key=value` pairs (page query string or command line).

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::camera::Smoothing;
use crate::constants::{BACKDROP_COUNT, PARTICLE_COUNT, STREAK_COUNT};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown setting `{0}`")]
    UnknownKey(String),
    #[error("setting `{key}` has invalid value `{value}`")]
    InvalidValue { key: String, value: String },
    #[error("`{0}` must be greater than zero")]
    Zero(&'static str),
    #[error("smoothing must lie in (0, 1], got {0}")]
    SmoothingOutOfRange(f32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub particle_count: usize,
    pub streak_count: usize,
    pub backdrop_count: usize,
    /// `None` seeds every stream from OS entropy.
    pub seed: Option<u64>,
    pub smoothing: Smoothing,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            streak_count: STREAK_COUNT,
            backdrop_count: BACKDROP_COUNT,
            seed: None,
            smoothing: Smoothing::default(),
        }
    }
}

// Independent random streams per scene part
pub const STREAM_PARTICLES: u64 = 0;
pub const STREAM_STREAKS: u64 = 1;
pub const STREAM_BACKDROP: u64 = 2;

impl SceneConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// RNG for one scene part. With a fixed seed each stream is derived from
    /// it so parts can be reseeded independently.
    pub fn rng_for(&self, stream: u64) -> StdRng {
        match self.seed {
            Some(seed) => {
                let mix = seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15);
                StdRng::seed_from_u64(mix)
            }
            None => StdRng::from_entropy(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::Zero("particles"));
        }
        if self.streak_count == 0 {
            return Err(ConfigError::Zero("streaks"));
        }
        match self.smoothing {
            Smoothing::PerFrame(a) if !(a > 0.0 && a <= 1.0) => {
                Err(ConfigError::SmoothingOutOfRange(a))
            }
            Smoothing::TimeNormalized { rate } if !(rate > 0.0 && rate.is_finite()) => {
                Err(ConfigError::Zero("rate"))
            }
            _ => Ok(()),
        }
    }

    /// Apply `key=value` overrides, then validate the result.
    ///
    /// Keys: `particles`, `streaks`, `backdrop`, `seed`, `smoothing`
    /// (`frame` or `time`), `rate` (per-frame fraction or per-second rate,
    /// depending on the smoothing mode in effect).
    pub fn apply_overrides<'a, I>(mut self, pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut rate: Option<f32> = None;
        for (key, value) in pairs {
            let key = key.trim();
            let value = value.trim();
            match key {
                "particles" => self.particle_count = parse(key, value)?,
                "streaks" => self.streak_count = parse(key, value)?,
                "backdrop" => self.backdrop_count = parse(key, value)?,
                "seed" => self.seed = Some(parse(key, value)?),
                "smoothing" => {
                    self.smoothing = match value {
                        "frame" => Smoothing::default(),
                        "time" => Smoothing::TimeNormalized {
                            rate: Smoothing::matched_rate(),
                        },
                        _ => return Err(invalid(key, value)),
                    }
                }
                "rate" => rate = Some(parse(key, value)?),
                _ => return Err(ConfigError::UnknownKey(key.to_string())),
            }
        }
        if let Some(r) = rate {
            self.smoothing = match self.smoothing {
                Smoothing::PerFrame(_) => Smoothing::PerFrame(r),
                Smoothing::TimeNormalized { .. } => Smoothing::TimeNormalized { rate: r },
            };
        }
        self.validate()?;
        Ok(self)
    }
}

/// Split `a=1&b=2` (optionally prefixed with `?`) into pairs; empty segments
/// are skipped and a bare key maps to an empty value.
pub fn split_query(query: &str) -> Vec<(&str, &str)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|s| s.split_once('=').unwrap_or((s, "")))
        .collect()
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| invalid(key, value))
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn defaults_are_valid() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.particle_count, 10_000);
        assert_eq!(cfg.streak_count, 400);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn overrides_apply_in_order() {
        let cfg = SceneConfig::default()
            .apply_overrides(split_query("?particles=500&streaks=20&seed=9&smoothing=time"))
            .unwrap();
        assert_eq!(cfg.particle_count, 500);
        assert_eq!(cfg.streak_count, 20);
        assert_eq!(cfg.seed, Some(9));
        assert!(matches!(cfg.smoothing, Smoothing::TimeNormalized { .. }));
    }

    #[test]
    fn rate_follows_smoothing_mode() {
        let cfg = SceneConfig::default()
            .apply_overrides([("rate", "0.1")])
            .unwrap();
        assert_eq!(cfg.smoothing, Smoothing::PerFrame(0.1));
        let cfg = SceneConfig::default()
            .apply_overrides([("rate", "4"), ("smoothing", "time")])
            .unwrap();
        assert_eq!(cfg.smoothing, Smoothing::TimeNormalized { rate: 4.0 });
    }

    #[test]
    fn rejects_bad_input() {
        let err = SceneConfig::default()
            .apply_overrides([("particles", "many")])
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "particles".into(),
                value: "many".into()
            }
        );
        assert_eq!(
            SceneConfig::default()
                .apply_overrides([("colour", "red")])
                .unwrap_err(),
            ConfigError::UnknownKey("colour".into())
        );
        assert_eq!(
            SceneConfig::default()
                .apply_overrides([("streaks", "0")])
                .unwrap_err(),
            ConfigError::Zero("streaks")
        );
        assert!(SceneConfig::default()
            .apply_overrides([("rate", "1.5")])
            .is_err());
    }

    #[test]
    fn seeded_streams_are_deterministic_and_distinct() {
        let cfg = SceneConfig::seeded(42);
        let a: u64 = cfg.rng_for(STREAM_PARTICLES).gen();
        let b: u64 = cfg.rng_for(STREAM_PARTICLES).gen();
        let c: u64 = cfg.rng_for(STREAM_STREAKS).gen();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn split_query_handles_edges() {
        assert_eq!(split_query(""), Vec::<(&str, &str)>::new());
        assert_eq!(split_query("?a=1&&b"), vec![("a", "1"), ("b", "")]);
    }
}
