use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::{check_user_id, ValidationError};

/// One adjustable dimension of a light. Carries the range, slider step and
/// display format the client widgets use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKind {
    Brightness,
    ColorTemperature,
    DimmerRate,
}

impl SettingKind {
    /// Token field order.
    pub const ALL: [SettingKind; 3] = [
        SettingKind::Brightness,
        SettingKind::ColorTemperature,
        SettingKind::DimmerRate,
    ];

    pub fn min(self) -> u16 {
        match self {
            SettingKind::Brightness | SettingKind::DimmerRate => 0,
            SettingKind::ColorTemperature => 2700,
        }
    }

    pub fn max(self) -> u16 {
        match self {
            SettingKind::Brightness | SettingKind::DimmerRate => 100,
            SettingKind::ColorTemperature => 6500,
        }
    }

    pub fn step(self) -> u16 {
        match self {
            SettingKind::Brightness | SettingKind::DimmerRate => 1,
            SettingKind::ColorTemperature => 100,
        }
    }

    pub fn token_key(self) -> &'static str {
        match self {
            SettingKind::Brightness => "brightness",
            SettingKind::ColorTemperature => "cct",
            SettingKind::DimmerRate => "dimmer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SettingKind::Brightness => "Brightness",
            SettingKind::ColorTemperature => "Color Temperature (CCT)",
            SettingKind::DimmerRate => "Dimmer Rate",
        }
    }

    pub fn format_value(self, value: u16) -> String {
        match self {
            SettingKind::Brightness | SettingKind::DimmerRate => format!("{value}%"),
            SettingKind::ColorTemperature => format!("{value}K"),
        }
    }

    pub fn contains(self, value: u16) -> bool {
        (self.min()..=self.max()).contains(&value)
    }

    pub fn clamp(self, value: i64) -> u16 {
        // Bounds fit in u16, so the narrowing cast after clamping is lossless.
        value.clamp(i64::from(self.min()), i64::from(self.max())) as u16
    }
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token_key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} must be within {min}..={max}, got {value}")]
pub struct SettingsRangeError {
    pub kind: SettingKind,
    pub value: u16,
    pub min: u16,
    pub max: u16,
}

/// A brightness / color temperature / dimmer triple whose fields are always
/// inside their ranges. Values are replaced, never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawLightSettings")]
pub struct LightSettings {
    brightness: u16,
    color_temperature: u16,
    dimmer_rate: u16,
}

impl LightSettings {
    pub const DEFAULT: LightSettings = LightSettings {
        brightness: 50,
        color_temperature: 3000,
        dimmer_rate: 70,
    };

    pub fn new(
        brightness: u16,
        color_temperature: u16,
        dimmer_rate: u16,
    ) -> Result<Self, SettingsRangeError> {
        check_range(SettingKind::Brightness, brightness)?;
        check_range(SettingKind::ColorTemperature, color_temperature)?;
        check_range(SettingKind::DimmerRate, dimmer_rate)?;
        Ok(Self {
            brightness,
            color_temperature,
            dimmer_rate,
        })
    }

    /// Builds settings from raw input, pulling each field into its range.
    pub fn clamped(brightness: i64, color_temperature: i64, dimmer_rate: i64) -> Self {
        Self {
            brightness: SettingKind::Brightness.clamp(brightness),
            color_temperature: SettingKind::ColorTemperature.clamp(color_temperature),
            dimmer_rate: SettingKind::DimmerRate.clamp(dimmer_rate),
        }
    }

    pub fn brightness(&self) -> u16 {
        self.brightness
    }

    pub fn color_temperature(&self) -> u16 {
        self.color_temperature
    }

    pub fn dimmer_rate(&self) -> u16 {
        self.dimmer_rate
    }

    pub fn get(&self, kind: SettingKind) -> u16 {
        match kind {
            SettingKind::Brightness => self.brightness,
            SettingKind::ColorTemperature => self.color_temperature,
            SettingKind::DimmerRate => self.dimmer_rate,
        }
    }

    /// Returns a copy with `kind` set to `value`, clamped into range.
    pub fn with(&self, kind: SettingKind, value: i64) -> Self {
        let value = kind.clamp(value);
        let mut next = *self;
        match kind {
            SettingKind::Brightness => next.brightness = value,
            SettingKind::ColorTemperature => next.color_temperature = value,
            SettingKind::DimmerRate => next.dimmer_rate = value,
        }
        next
    }

    /// Fields whose value differs from `baseline`, in token order.
    pub fn differing_fields(&self, baseline: &LightSettings) -> Vec<SettingKind> {
        SettingKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind) != baseline.get(*kind))
            .collect()
    }
}

impl Default for LightSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn check_range(kind: SettingKind, value: u16) -> Result<(), SettingsRangeError> {
    if kind.contains(value) {
        Ok(())
    } else {
        Err(SettingsRangeError {
            kind,
            value,
            min: kind.min(),
            max: kind.max(),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLightSettings {
    brightness: u16,
    color_temperature: u16,
    dimmer_rate: u16,
}

impl TryFrom<RawLightSettings> for LightSettings {
    type Error = SettingsRangeError;

    fn try_from(raw: RawLightSettings) -> Result<Self, Self::Error> {
        LightSettings::new(raw.brightness, raw.color_temperature, raw.dimmer_rate)
    }
}

/// Identifier of the person the recommendations are for. Only constructible
/// from input that passes [`check_user_id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        check_user_id(input)?;
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        check_user_id(&value)?;
        Ok(Self(value))
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub settings: LightSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}
