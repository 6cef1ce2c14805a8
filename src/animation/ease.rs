use std::str::FromStr;

use crate::foundation::error::{ViewKitError, ViewKitResult};

/// Timing curve mapping linear progress `t` in `[0, 1]` to eased progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    /// Identity.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in-out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in-out.
    InOutCubic,
    /// CSS `ease`: `cubic-bezier(0.25, 0.1, 0.25, 1)`.
    Ease,
    /// CSS `ease-in`: `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,
    /// CSS `ease-out`: `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    /// CSS `ease-in-out`: `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`; `x1`/`x2` must lie in `[0, 1]`.
    CubicBezier(f64, f64, f64, f64),
}

impl Ease {
    /// Eased progress for `t` (clamped to `[0, 1]`).
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }

    /// CSS `<easing-function>` text for this curve.
    pub fn css_text(self) -> String {
        match self {
            Self::Linear => "linear".to_string(),
            Self::Ease => "ease".to_string(),
            Self::EaseIn => "ease-in".to_string(),
            Self::EaseOut => "ease-out".to_string(),
            Self::EaseInOut => "ease-in-out".to_string(),
            Self::CubicBezier(x1, y1, x2, y2) => format!("cubic-bezier({x1}, {y1}, {x2}, {y2})"),
            Self::InQuad => "cubic-bezier(0.55, 0.085, 0.68, 0.53)".to_string(),
            Self::OutQuad => "cubic-bezier(0.25, 0.46, 0.45, 0.94)".to_string(),
            Self::InOutQuad => "cubic-bezier(0.455, 0.03, 0.515, 0.955)".to_string(),
            Self::InCubic => "cubic-bezier(0.55, 0.055, 0.675, 0.19)".to_string(),
            Self::OutCubic => "cubic-bezier(0.215, 0.61, 0.355, 1)".to_string(),
            Self::InOutCubic => "cubic-bezier(0.645, 0.045, 0.355, 1)".to_string(),
        }
    }

    pub(crate) fn validate(self) -> ViewKitResult<Self> {
        if let Self::CubicBezier(x1, y1, x2, y2) = self {
            if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
                return Err(ViewKitError::validation(
                    "cubic-bezier control points must be finite",
                ));
            }
            if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                return Err(ViewKitError::validation(
                    "cubic-bezier x control points must lie in [0, 1]",
                ));
            }
        }
        Ok(self)
    }
}

impl FromStr for Ease {
    type Err = ViewKitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let ease = match s.as_str() {
            "linear" => Self::Linear,
            "ease" => Self::Ease,
            "ease-in" => Self::EaseIn,
            "ease-out" => Self::EaseOut,
            "ease-in-out" => Self::EaseInOut,
            "in-quad" => Self::InQuad,
            "out-quad" => Self::OutQuad,
            "in-out-quad" => Self::InOutQuad,
            "in-cubic" => Self::InCubic,
            "out-cubic" => Self::OutCubic,
            "in-out-cubic" => Self::InOutCubic,
            other => {
                let Some(args) = other
                    .strip_prefix("cubic-bezier(")
                    .and_then(|rest| rest.strip_suffix(')'))
                else {
                    return Err(ViewKitError::validation(format!(
                        "unknown easing '{other}'"
                    )));
                };
                let parts = args
                    .split(',')
                    .map(|p| p.trim().parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| {
                        ViewKitError::validation(format!("invalid cubic-bezier '{other}'"))
                    })?;
                let [x1, y1, x2, y2] = parts[..] else {
                    return Err(ViewKitError::validation(
                        "cubic-bezier takes exactly four numbers",
                    ));
                };
                Self::CubicBezier(x1, y1, x2, y2)
            }
        };
        ease.validate()
    }
}

impl std::fmt::Display for Ease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.css_text())
    }
}

// Solve x(s) = t for the curve parameter, then evaluate y(s).
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let bez = |a: f64, b: f64, s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };
    let dbez = |a: f64, b: f64, s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
    };

    let mut s = t;
    for _ in 0..8 {
        let err = bez(x1, x2, s) - t;
        if err.abs() < 1e-7 {
            return bez(y1, y2, s);
        }
        let d = dbez(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= err / d;
        if !(0.0..=1.0).contains(&s) {
            break;
        }
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = t;
    for _ in 0..64 {
        let x = bez(x1, x2, s);
        if (x - t).abs() < 1e-7 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    bez(y1, y2, s)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
