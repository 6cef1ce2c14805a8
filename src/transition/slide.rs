use std::{cell::RefCell, collections::BTreeMap};

use crate::{
    animation::ease::Ease,
    dom::{
        document::Document,
        style::{Property, TransitionTiming, Value},
    },
    foundation::core::{NodeId, Size, Vec2},
    foundation::error::ViewKitResult,
    transition::runner::{Choreography, Handoff},
};

/// Default slide duration in seconds.
pub const SLIDE_DURATION_S: f64 = 0.3;

const OVERLAY_OPACITY: f64 = 0.2;
const PAGE_LIGHTNESS: f64 = 100.0;

/// Horizontal push: the incoming view slides in from the right over the
/// outgoing one, which drifts a third of the width and darkens under an overlay.
/// Reversed, the outgoing view slides out to the right uncovering the incoming one.
#[derive(Debug, Default)]
pub struct Slide {
    // One dimming overlay per in-flight run, keyed by the outgoing element.
    overlays: RefCell<BTreeMap<NodeId, NodeId>>,
}

impl Slide {
    fn container_width(doc: &Document, from: NodeId) -> ViewKitResult<f64> {
        match doc.parent(from)? {
            Some(parent) => doc.width(parent),
            None => doc.width(from),
        }
    }

    fn overlay(&self, doc: &mut Document, from: NodeId, size: Size) -> ViewKitResult<NodeId> {
        if let Some(&node) = self.overlays.borrow().get(&from)
            && doc.contains(node)
        {
            return Ok(node);
        }
        let node = doc.create_element("div");
        doc.set_size(node, size)?;
        doc.set_style(node, Property::BackgroundColor, Value::Hsl { h: 0.0, s: 0.0, l: 0.0 })?;
        self.overlays.borrow_mut().insert(from, node);
        Ok(node)
    }

    /// Overlays currently alive.
    pub fn active_overlays(&self) -> usize {
        self.overlays.borrow().len()
    }
}

fn translate_x(x: f64) -> Value {
    Value::Translate(Vec2::new(x, 0.0))
}

impl Choreography for Slide {
    fn name(&self) -> &'static str {
        "slide"
    }

    fn timing(&self) -> Option<TransitionTiming> {
        Some(TransitionTiming::new(
            Property::Transform,
            SLIDE_DURATION_S,
            Ease::EaseOut,
        ))
    }

    fn before(&self, doc: &mut Document, h: &Handoff) -> ViewKitResult<()> {
        let width = Self::container_width(doc, h.from)?;
        let height = doc.height(h.from)?;
        let overlay = self.overlay(doc, h.from, Size::new(width, height))?;
        let white = Value::Hsl {
            h: 0.0,
            s: 0.0,
            l: PAGE_LIGHTNESS,
        };

        if h.reverse {
            doc.set_style(h.from, Property::Left, Value::Px(0.0))?;
            doc.set_style(h.from, Property::BackgroundColor, white)?;
            doc.set_style(overlay, Property::Opacity, Value::Number(OVERLAY_OPACITY))?;
            doc.insert_after(h.to, overlay)?;
            doc.set_style(h.to, Property::Left, Value::Px(-width / 3.0))?;
        } else {
            doc.set_style(h.to, Property::Left, Value::Px(width))?;
            doc.set_style(h.to, Property::BackgroundColor, white)?;
            doc.set_style(overlay, Property::Opacity, Value::Number(0.0))?;
            doc.insert_after(h.from, overlay)?;
            doc.set_style(h.from, Property::Left, Value::Px(0.0))?;
        }
        Ok(())
    }

    fn after(&self, doc: &mut Document, h: &Handoff) -> ViewKitResult<()> {
        let width = Self::container_width(doc, h.from)?;
        let delta = if h.reverse { width } else { -width };
        let Some(overlay) = self.overlays.borrow().get(&h.from).copied() else {
            return Ok(());
        };
        let timing = h.timing.or_else(|| self.timing());
        if let Some(timing) = timing {
            doc.set_transitions(overlay, vec![timing.for_property(Property::Opacity)])?;
        }

        if h.reverse {
            doc.set_style(h.from, Property::Transform, translate_x(delta))?;
            doc.set_style(overlay, Property::Opacity, Value::Number(0.0))?;
            doc.set_style(h.to, Property::Transform, translate_x(delta / 3.0))?;
        } else {
            doc.set_style(h.to, Property::Transform, translate_x(delta))?;
            doc.set_style(overlay, Property::Opacity, Value::Number(OVERLAY_OPACITY))?;
            doc.set_style(h.from, Property::Transform, translate_x(delta / 3.0))?;
        }
        Ok(())
    }

    fn cleanup(&self, doc: &mut Document, h: &Handoff) -> ViewKitResult<()> {
        let overlay = self.overlays.borrow_mut().remove(&h.from);
        if let Some(overlay) = overlay
            && doc.contains(overlay)
        {
            doc.remove(overlay)?;
        }
        for node in [h.from, h.to] {
            if !doc.contains(node) {
                continue;
            }
            doc.clear_style(node, Property::BackgroundColor)?;
            doc.clear_style(node, Property::Left)?;
            doc.clear_style(node, Property::Transform)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/slide.rs"]
mod tests;
