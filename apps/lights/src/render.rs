//! Terminal rendering of the slider screen.

use client_core::SettingDelta;
use shared::domain::{LightSettings, SettingKind};

const BAR_WIDTH: usize = 30;

/// Position of `value` along the slider, 0.0 to 100.0.
pub fn marker_position(kind: SettingKind, value: u16) -> f64 {
    let span = f64::from(kind.max() - kind.min());
    f64::from(value.saturating_sub(kind.min())) / span * 100.0
}

fn bar_index(kind: SettingKind, value: u16) -> usize {
    let position = marker_position(kind, value) / 100.0 * (BAR_WIDTH - 1) as f64;
    (position.round() as usize).min(BAR_WIDTH - 1)
}

/// `[-----|----o-----]`: `o` is the current value, `|` the recommendation.
pub fn slider_bar(kind: SettingKind, current: u16, recommended: u16) -> String {
    let current_at = bar_index(kind, current);
    let recommended_at = bar_index(kind, recommended);
    let track: String = (0..BAR_WIDTH)
        .map(|i| {
            if i == current_at {
                'o'
            } else if i == recommended_at {
                '|'
            } else {
                '-'
            }
        })
        .collect();
    format!(
        "{} [{track}] {}",
        kind.format_value(kind.min()),
        kind.format_value(kind.max())
    )
}

pub fn adjusted_note(delta: &SettingDelta) -> String {
    format!(
        "Adjusted from recommended {}",
        delta.kind.format_value(delta.recommended)
    )
}

pub fn render_sliders(
    current: &LightSettings,
    recommended: &LightSettings,
    deltas: &[SettingDelta],
) -> String {
    let mut out = String::new();
    for kind in SettingKind::ALL {
        let value = current.get(kind);
        out.push_str(&format!("{:<24} {:>6}\n", kind.label(), kind.format_value(value)));
        out.push_str(&format!(
            "  {}\n",
            slider_bar(kind, value, recommended.get(kind))
        ));
        if let Some(delta) = deltas.iter().find(|d| d.kind == kind) {
            out.push_str(&format!("  {}\n", adjusted_note(delta)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_position_spans_range() {
        assert_eq!(marker_position(SettingKind::ColorTemperature, 2700), 0.0);
        assert_eq!(marker_position(SettingKind::ColorTemperature, 6500), 100.0);
        assert_eq!(marker_position(SettingKind::Brightness, 75), 75.0);
    }

    #[test]
    fn bar_marks_current_and_recommended() {
        let bar = slider_bar(SettingKind::Brightness, 100, 0);
        assert!(bar.starts_with("0% [|"));
        assert!(bar.ends_with("o] 100%"));

        let same = slider_bar(SettingKind::Brightness, 50, 50);
        assert_eq!(same.matches('o').count(), 1);
        assert!(!same.contains('|'));
    }

    #[test]
    fn adjusted_fields_get_a_note() {
        let recommended = LightSettings::new(75, 3500, 60).expect("valid");
        let current = recommended.with(SettingKind::Brightness, 80);
        let deltas = [SettingDelta {
            kind: SettingKind::Brightness,
            recommended: 75,
            current: 80,
        }];

        let screen = render_sliders(&current, &recommended, &deltas);
        assert!(screen.contains("Adjusted from recommended 75%"));
        assert_eq!(screen.matches("Adjusted from").count(), 1);
        assert!(screen.contains("3500K"));
    }
}
