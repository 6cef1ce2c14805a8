use crate::{
    animation::ease::Ease,
    dom::{
        document::Document,
        style::{Property, TransitionTiming, Value},
    },
    foundation::error::ViewKitResult,
    transition::runner::{Choreography, Handoff},
};

/// Default fade duration in seconds.
pub const FADE_DURATION_S: f64 = 0.4;

/// Cross-fade: the incoming view fades in while the outgoing one fades out.
///
/// Fading is symmetric, so `reverse` only affects where the incoming view is attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fade;

impl Choreography for Fade {
    fn name(&self) -> &'static str {
        "fade"
    }

    fn timing(&self) -> Option<TransitionTiming> {
        Some(TransitionTiming::new(
            Property::Opacity,
            FADE_DURATION_S,
            Ease::EaseOut,
        ))
    }

    fn before(&self, doc: &mut Document, h: &Handoff) -> ViewKitResult<()> {
        doc.set_style(h.to, Property::Opacity, Value::Number(0.0))?;
        doc.set_style(h.from, Property::Opacity, Value::Number(1.0))
    }

    fn after(&self, doc: &mut Document, h: &Handoff) -> ViewKitResult<()> {
        doc.clear_style(h.to, Property::Display)?;
        doc.set_style(h.to, Property::Opacity, Value::Number(1.0))?;
        doc.set_style(h.from, Property::Opacity, Value::Number(0.0))
    }

    fn cleanup(&self, doc: &mut Document, h: &Handoff) -> ViewKitResult<()> {
        for node in [h.from, h.to] {
            if doc.contains(node) {
                doc.clear_style(node, Property::Opacity)?;
                doc.clear_style(node, Property::Display)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/fade.rs"]
mod tests;
