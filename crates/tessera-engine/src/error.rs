/// Setup-time errors: malformed data or a lookup that can never succeed.
///
/// These indicate a programming or data error and are returned at the point of
/// use. Per-tick render failures are not represented here; elements report those
/// through `anyhow::Result` and the layer logs and skips them.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// A frame sequence without frames.
    #[error("frame sequence has no frames")]
    EmptySequence,

    /// A frame whose effective duration is zero; advancing it would never terminate.
    #[error("frame {index} has zero duration")]
    ZeroDurationFrame { index: usize },

    /// Image id missing from the image store.
    #[error("unknown image: {id}")]
    UnknownImage { id: String },

    /// Named region missing from an atlas.
    #[error("unknown region: {name}")]
    UnknownRegion { name: String },

    /// Action/direction pair that has no element registered.
    #[error("no element registered for action `{action}` facing `{direction}`")]
    UnknownState { action: String, direction: String },

    /// A name that does not parse into the expected key type.
    #[error("unknown {kind}: `{name}`")]
    UnknownKey { kind: &'static str, name: String },

    /// The state a machine starts in was never registered.
    #[error("initial state `{action}` facing `{direction}` is not registered")]
    MissingInitialState { action: String, direction: String },

    /// Element handle that is not (or no longer) owned by the layer.
    #[error("unknown element: {id}")]
    UnknownElement { id: u64 },

    /// Non-positive or non-finite dimensions.
    #[error("invalid size {width}x{height}")]
    InvalidSize { width: f32, height: f32 },
}
