use ratatui::style::Color;

/// Red → yellow → green scale over `[min, max]`. A flat range maps to yellow.
pub fn gradient_color(value: f64, min: f64, max: f64) -> Color {
    if !value.is_finite() || !min.is_finite() || !max.is_finite() {
        return Color::Gray;
    }
    let span = max - min;
    let t = if span <= f64::EPSILON {
        0.5
    } else {
        ((value - min) / span).clamp(0.0, 1.0)
    };

    let (r, g) = if t < 0.5 {
        (215.0 + (254.0 - 215.0) * (t / 0.5), 48.0 + (224.0 - 48.0) * (t / 0.5))
    } else {
        let u = (t - 0.5) / 0.5;
        (254.0 + (26.0 - 254.0) * u, 224.0 + (152.0 - 224.0) * u)
    };
    let b = if t < 0.5 {
        39.0 + (139.0 - 39.0) * (t / 0.5)
    } else {
        139.0 + (80.0 - 139.0) * ((t - 0.5) / 0.5)
    };
    Color::Rgb(r.round() as u8, g.round() as u8, b.round() as u8)
}

/// Min and max of a column, ignoring missing values.
pub fn column_range<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut range: Option<(f64, f64)> = None;
    for v in values.into_iter().flatten() {
        range = Some(match range {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        });
    }
    range
}

pub fn scaled_color(value: Option<f64>, range: Option<(f64, f64)>) -> Color {
    match (value, range) {
        (Some(v), Some((lo, hi))) => gradient_color(v, lo, hi),
        _ => Color::DarkGray,
    }
}

pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}%"),
        None => "-".to_string(),
    }
}

pub fn format_decimal(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "-".to_string(),
    }
}
