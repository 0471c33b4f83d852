//! Error type for model construction and configuration.

/// Errors raised while building polyhedra or interpreting configuration.
///
/// Every variant describes a structural or programmer error. None of them are
/// transient, so callers should report them rather than retry.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum GeometryError {
    /// A facet was given fewer than three vertices.
    #[error("a facet needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },

    /// A facet refers to a vertex the polyhedron does not have.
    #[error("facet vertex index {index} is out of range for {len} vertices")]
    VertexOutOfRange { index: usize, len: usize },

    /// The rotation axis of a polyhedron refers to a vertex it does not have.
    #[error("rotation axis vertex {index} is out of range for {len} vertices")]
    AxisVertexOutOfRange { index: usize, len: usize },

    /// A composite polyhedron was given no children.
    #[error("a composite polyhedron needs at least one child")]
    EmptyComposite,

    /// The rotation axis of a composite refers to a child it does not have.
    #[error("rotation axis child {index} is out of range for {len} children")]
    ChildOutOfRange { index: usize, len: usize },

    /// Builder parameters do not describe a solid.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// An axis identifier other than x, y or z.
    #[error("unknown axis {0:?}; expected one of x, y, z")]
    UnknownAxis(String),
}
