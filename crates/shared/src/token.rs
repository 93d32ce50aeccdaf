//! Text form of [`LightSettings`] used as the recommendation item id:
//! `brightness:<int>|cct:<int>|dimmer:<int>`.

use thiserror::Error;

use crate::domain::{LightSettings, SettingKind, SettingsRangeError};

const FIELD_SEPARATOR: char = '|';
const KEY_SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedTokenError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("field {position} has no key separator")]
    MissingSeparator { position: usize },
    #[error("field {position}: expected key '{expected}', found '{found}'")]
    UnexpectedKey {
        position: usize,
        expected: &'static str,
        found: String,
    },
    #[error("invalid integer '{value}' for '{key}'")]
    InvalidNumber { key: &'static str, value: String },
    #[error(transparent)]
    OutOfRange(#[from] SettingsRangeError),
}

pub fn encode(settings: &LightSettings) -> String {
    SettingKind::ALL
        .into_iter()
        .map(|kind| format!("{}{KEY_SEPARATOR}{}", kind.token_key(), settings.get(kind)))
        .collect::<Vec<_>>()
        .join(&FIELD_SEPARATOR.to_string())
}

pub fn decode(token: &str) -> Result<LightSettings, MalformedTokenError> {
    let fields: Vec<&str> = token.split(FIELD_SEPARATOR).collect();
    if fields.len() != SettingKind::ALL.len() {
        return Err(MalformedTokenError::FieldCount {
            expected: SettingKind::ALL.len(),
            found: fields.len(),
        });
    }

    let mut values = [0u16; 3];
    for (position, (field, kind)) in fields.iter().zip(SettingKind::ALL).enumerate() {
        let (key, raw) = field
            .split_once(KEY_SEPARATOR)
            .ok_or(MalformedTokenError::MissingSeparator { position })?;
        if key != kind.token_key() {
            return Err(MalformedTokenError::UnexpectedKey {
                position,
                expected: kind.token_key(),
                found: key.to_string(),
            });
        }
        values[position] = parse_value(kind, raw)?;
    }

    Ok(LightSettings::new(values[0], values[1], values[2])?)
}

fn parse_value(kind: SettingKind, raw: &str) -> Result<u16, MalformedTokenError> {
    let invalid = || MalformedTokenError::InvalidNumber {
        key: kind.token_key(),
        value: raw.to_string(),
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<u16>().map_err(|_| invalid())
}
