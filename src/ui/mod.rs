//! egui rendering of the dashboard. Panels read [`crate::state::DashboardState`]
//! and report user actions as [`crate::state::Interaction`]s; they never
//! mutate the state directly.

pub mod charts;
pub mod panels;
pub mod tables;

/// `$12,345.67` style formatting for prices.
pub fn money(v: f64) -> String {
    if !v.is_finite() {
        return "–".to_string();
    }
    let s = format!("{:.2}", v.abs());
    let (int, frac) = s.split_once('.').unwrap_or((s.as_str(), "00"));
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}

/// Two decimals, or a dash for NaN (e.g. the std of a single value).
pub fn number(v: f64) -> String {
    if v.is_nan() {
        "–".to_string()
    } else {
        format!("{v:.2}")
    }
}
