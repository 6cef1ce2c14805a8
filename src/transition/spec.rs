use crate::{
    foundation::error::{ViewKitError, ViewKitResult},
    transition::{
        fade::Fade,
        runner::{NoOp, Transition, TransitionOptions},
        slide::Slide,
    },
    view::stack::StackTransitions,
};

/// Serialized transition: a kind name plus optional overrides.
///
/// ```json
/// { "kind": "slide", "reverse": true, "duration": 0.25, "easing": "ease-in-out" }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionSpec {
    /// `slide`, `fade` (alias `crossfade`) or `none` (alias `instant`).
    pub kind: String,
    /// Overrides applied on top of the kind's defaults.
    #[serde(flatten)]
    pub options: TransitionOptions,
}

impl TransitionSpec {
    /// Spec for `kind` with default options.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            options: TransitionOptions::default(),
        }
    }

    /// Parse a JSON document.
    pub fn from_json(json: &str) -> ViewKitResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Build a [`Transition`] from its serialized form.
pub fn parse_transition(spec: &TransitionSpec) -> ViewKitResult<Transition> {
    parse_transition_kind(&spec.kind, spec.options)
}

/// Build a [`Transition`] from a kind name and overrides.
pub fn parse_transition_kind(kind: &str, options: TransitionOptions) -> ViewKitResult<Transition> {
    let kind = kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(ViewKitError::validation("transition kind must be non-empty"));
    }

    match kind.as_str() {
        "slide" => Transition::with_options(Slide::default(), options),
        "fade" | "crossfade" => Transition::with_options(Fade, options),
        "none" | "instant" => Transition::with_options(NoOp, options),
        _ => Err(ViewKitError::validation(format!(
            "unknown transition kind '{kind}'"
        ))),
    }
}

/// Serialized per-operation transitions of a view stack.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StackTransitionsSpec {
    /// Used by `push_view`.
    #[serde(default)]
    pub push: Option<TransitionSpec>,
    /// Used by `pop_view`.
    #[serde(default)]
    pub pop: Option<TransitionSpec>,
    /// Used by `replace_view`.
    #[serde(default)]
    pub replace: Option<TransitionSpec>,
}

impl StackTransitionsSpec {
    /// Parse a JSON document.
    pub fn from_json(json: &str) -> ViewKitResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the transitions, failing on the first invalid entry.
    pub fn resolve(&self) -> ViewKitResult<StackTransitions> {
        let resolve = |spec: &Option<TransitionSpec>| spec.as_ref().map(parse_transition).transpose();
        Ok(StackTransitions {
            push: resolve(&self.push)?,
            pop: resolve(&self.pop)?,
            replace: resolve(&self.replace)?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/spec.rs"]
mod tests;
