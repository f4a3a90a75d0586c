//! Cell bounds helpers for 2-D curvilinear grids.
//!
//! CF stores the corners of a 2-D cell as a trailing (or here, leading)
//! axis of size 4 ordered counter-clockwise from the first corner. A vertex
//! grid of shape `(ny + 1, nx + 1)` holds the same information without
//! duplication.

use ndarray::{s, stack, Array2, Array3, ArrayView2, ArrayView3, Axis};

use crate::error::{CfError, CfResult};

/// Stack the four corners of every cell of a vertex grid.
///
/// For vertices `v` of shape `(m, n)` the result has shape `(4, m - 1, n - 1)`
/// with layers `v[:-1, :-1]`, `v[:-1, 1:]`, `v[1:, 1:]` and `v[1:, :-1]`.
pub fn vertices_to_bounds(vertices: ArrayView2<f64>) -> CfResult<Array3<f64>> {
    let (m, n) = vertices.dim();
    if m < 2 || n < 2 {
        return Err(CfError::ShapeError {
            variable: "vertices".to_string(),
            message: format!("need at least 2x2 vertices, got {}x{}", m, n),
        });
    }

    let corners = [
        vertices.slice(s![..-1, ..-1]),
        vertices.slice(s![..-1, 1..]),
        vertices.slice(s![1.., 1..]),
        vertices.slice(s![1.., ..-1]),
    ];
    Ok(stack(Axis(0), &corners)?)
}

/// Inverse of [`vertices_to_bounds`].
pub fn bounds_to_vertices(bounds: ArrayView3<f64>) -> CfResult<Array2<f64>> {
    let (corners, m, n) = bounds.dim();
    if corners != 4 {
        return Err(CfError::ShapeError {
            variable: "bounds".to_string(),
            message: format!("expected 4 corners on the leading axis, got {}", corners),
        });
    }
    if m == 0 || n == 0 {
        return Err(CfError::ShapeError {
            variable: "bounds".to_string(),
            message: format!("need at least one cell, got {}x{}", m, n),
        });
    }

    let mut vertices = Array2::<f64>::zeros((m + 1, n + 1));
    vertices
        .slice_mut(s![..-1, ..-1])
        .assign(&bounds.index_axis(Axis(0), 0));
    // Last column from the upper-right corners, last row from the lower-left.
    vertices
        .slice_mut(s![..-1, -1])
        .assign(&bounds.slice(s![1, .., -1]));
    vertices
        .slice_mut(s![-1, ..-1])
        .assign(&bounds.slice(s![3, -1, ..]));
    vertices[[m, n]] = bounds[[2, m - 1, n - 1]];
    Ok(vertices)
}
