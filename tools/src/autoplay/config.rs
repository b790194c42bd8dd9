use std::{fs, path::Path};

use anyhow::{anyhow, ensure, Context};
use hayashi_core::{
    input::Channel,
    note::HitWindow,
    scroll::{NoteSize, Position, Scroll},
    timing::TimestampDifference,
    track::{LaneBinding, RemovalPolicy, Settings},
};
use serde::Deserialize;

/// Play configuration, read from YAML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Position of the judgement line, in pixels from the top.
    pub judge_y: f64,
    /// Seconds a note takes from the top of the screen to the judgement line.
    pub approach_time: f64,
    pub note_size: NoteSizeConfig,
    pub hit_window: HitWindowConfig,
    pub removal_policy: RemovalPolicyConfig,
    /// Updates per second of the simulated clock.
    pub frame_rate: f64,
    /// Lane layout. One lane per chart lane with the default layout if missing.
    pub lanes: Option<Vec<LaneConfig>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoteSizeConfig {
    pub width: f64,
    pub height: f64,
}

/// Hit window bounds, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HitWindowConfig {
    pub early: f64,
    pub late: f64,
    pub expiry: f64,
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemovalPolicyConfig {
    #[default]
    AllEligible,
    FirstEligible,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LaneConfig {
    pub lane: usize,
    pub channel: u16,
    pub x: f64,
}

impl Default for Config {
    fn default() -> Self {
        let settings = Settings::default();

        Self {
            judge_y: settings.scroll.judge_y.0,
            approach_time: Scroll::DEFAULT_APPROACH_TIME.as_secs(),
            note_size: NoteSizeConfig::default(),
            hit_window: HitWindowConfig::default(),
            removal_policy: RemovalPolicyConfig::default(),
            frame_rate: 60.,
            lanes: None,
        }
    }
}

impl Default for NoteSizeConfig {
    fn default() -> Self {
        let size = NoteSize::default();
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

impl Default for HitWindowConfig {
    fn default() -> Self {
        let window = HitWindow::default();
        Self {
            early: window.early.as_secs(),
            late: window.late.as_secs(),
            expiry: window.expiry.as_secs(),
        }
    }
}

impl From<RemovalPolicyConfig> for RemovalPolicy {
    fn from(policy: RemovalPolicyConfig) -> Self {
        match policy {
            RemovalPolicyConfig::AllEligible => RemovalPolicy::AllEligible,
            RemovalPolicyConfig::FirstEligible => RemovalPolicy::FirstEligible,
        }
    }
}

impl From<LaneConfig> for LaneBinding {
    fn from(lane: LaneConfig) -> Self {
        Self {
            lane: lane.lane,
            channel: Channel(lane.channel),
            x: lane.x,
        }
    }
}

impl Config {
    /// Reads the config from a YAML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let source = fs::read_to_string(path).with_context(|| format!("error reading {path:?}"))?;
        Self::from_yaml(&source).with_context(|| format!("error parsing {path:?}"))
    }

    pub fn from_yaml(source: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.judge_y.is_finite(),
            "judge_y must be finite, got {}",
            self.judge_y
        );
        ensure!(
            self.approach_time > 0. && self.approach_time.is_finite(),
            "approach_time must be positive and finite, got {}",
            self.approach_time
        );
        ensure!(
            self.frame_rate > 0. && self.frame_rate.is_finite(),
            "frame_rate must be positive and finite, got {}",
            self.frame_rate
        );

        let HitWindowConfig {
            early,
            late,
            expiry,
        } = self.hit_window;
        for (name, value) in [("early", early), ("late", late), ("expiry", expiry)] {
            ensure!(
                value >= 0. && value.is_finite(),
                "hit_window.{name} must be non-negative and finite, got {value}"
            );
        }

        Ok(())
    }

    pub fn settings(&self) -> Settings {
        Settings {
            scroll: Scroll::with_approach_time(
                Position(self.judge_y),
                TimestampDifference::from_secs(self.approach_time),
            ),
            hit_window: HitWindow {
                early: TimestampDifference::from_secs(self.hit_window.early),
                late: TimestampDifference::from_secs(self.hit_window.late),
                expiry: TimestampDifference::from_secs(self.hit_window.expiry),
            },
            note_size: NoteSize {
                width: self.note_size.width,
                height: self.note_size.height,
            },
            removal_policy: self.removal_policy.into(),
        }
    }

    /// Returns the lane bindings, falling back to the default layout for `lane_count` lanes.
    pub fn bindings(&self, lane_count: usize) -> anyhow::Result<Vec<LaneBinding>> {
        match &self.lanes {
            Some(lanes) => Ok(lanes.iter().copied().map(Into::into).collect()),
            None => LaneBinding::default_layout(lane_count)
                .map_err(|err| anyhow!("error laying out the lanes: {err}")),
        }
    }
}
