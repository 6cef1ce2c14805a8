use crate::{
    animation::ease::Ease,
    foundation::core::{Vec2, validate_secs},
    foundation::error::ViewKitResult,
};

/// Inline style properties the view layer manipulates.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Property {
    /// Horizontal offset in pixels.
    Left,
    /// Opacity in `[0, 1]`.
    Opacity,
    /// 2D translation.
    Transform,
    /// Background colour.
    BackgroundColor,
    /// Display mode keyword (`block`, `none`, ...).
    Display,
}

impl Property {
    /// CSS property name.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Opacity => "opacity",
            Self::Transform => "transform",
            Self::BackgroundColor => "background-color",
            Self::Display => "display",
        }
    }

    /// Value used when neither an inline value nor an animation is present.
    pub fn initial(self) -> Value {
        match self {
            Self::Left => Value::Px(0.0),
            Self::Opacity => Value::Number(1.0),
            Self::Transform => Value::Translate(Vec2::ZERO),
            Self::BackgroundColor => Value::Keyword("transparent".to_string()),
            Self::Display => Value::Keyword("block".to_string()),
        }
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_name())
    }
}

/// Typed style value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    /// Length in pixels.
    Px(f64),
    /// Unitless number.
    Number(f64),
    /// `translate3d(x, y, 0)`.
    Translate(Vec2),
    /// `hsl(h, s%, l%)`.
    Hsl {
        /// Hue in degrees.
        h: f64,
        /// Saturation in percent.
        s: f64,
        /// Lightness in percent.
        l: f64,
    },
    /// Non-interpolable keyword.
    Keyword(String),
}

impl Value {
    /// Value at progress `t` between `self` and `to`, `None` when the pair is
    /// not interpolable (discrete change).
    pub fn lerp(&self, to: &Value, t: f64) -> Option<Value> {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        match (self, to) {
            (Self::Px(a), Self::Px(b)) => Some(Self::Px(mix(*a, *b))),
            (Self::Number(a), Self::Number(b)) => Some(Self::Number(mix(*a, *b))),
            (Self::Translate(a), Self::Translate(b)) => Some(Self::Translate(a.lerp(*b, t))),
            (
                Self::Hsl {
                    h: h0,
                    s: s0,
                    l: l0,
                },
                Self::Hsl {
                    h: h1,
                    s: s1,
                    l: l1,
                },
            ) => Some(Self::Hsl {
                h: mix(*h0, *h1),
                s: mix(*s0, *s1),
                l: mix(*l0, *l1),
            }),
            _ => None,
        }
    }

    /// `true` when `lerp` towards `to` is defined.
    pub fn interpolable_with(&self, to: &Value) -> bool {
        self.lerp(to, 0.0).is_some()
    }

    /// CSS text.
    pub fn css_text(&self) -> String {
        match self {
            Self::Px(v) => format!("{v}px"),
            Self::Number(v) => format!("{v}"),
            Self::Translate(v) => format!("translate3d({}px, {}px, 0)", v.x, v.y),
            Self::Hsl { h, s, l } => format!("hsl({h},{s}%,{l}%)"),
            Self::Keyword(k) => k.clone(),
        }
    }

    /// Numeric payload of `Px`/`Number`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Px(v) | Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Translation payload of `Translate`.
    pub fn as_translate(&self) -> Option<Vec2> {
        match self {
            Self::Translate(v) => Some(*v),
            _ => None,
        }
    }
}

/// A declared CSS-level transition on one property.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionTiming {
    /// Animated property.
    pub property: Property,
    /// Duration in seconds.
    pub duration: f64,
    /// Timing curve.
    pub easing: Ease,
    /// Delay before the animation starts, in seconds.
    pub delay: f64,
}

impl TransitionTiming {
    /// Timing with zero delay.
    pub fn new(property: Property, duration: f64, easing: Ease) -> Self {
        Self {
            property,
            duration,
            easing,
            delay: 0.0,
        }
    }

    /// Same timing applied to another property.
    pub fn for_property(self, property: Property) -> Self {
        Self { property, ..self }
    }

    /// `duration + delay`.
    pub fn total(&self) -> f64 {
        self.duration + self.delay
    }

    /// CSS `transition` shorthand, e.g. `transform 0.3s ease-out 0s`.
    pub fn css_text(&self) -> String {
        format!(
            "{} {}s {} {}s",
            self.property.css_name(),
            self.duration,
            self.easing,
            self.delay
        )
    }

    /// Check durations and easing.
    pub fn validate(self) -> ViewKitResult<Self> {
        validate_secs("transition duration", self.duration)?;
        validate_secs("transition delay", self.delay)?;
        self.easing.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/style.rs"]
mod tests;
