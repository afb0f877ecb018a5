/// 4x4 model matrix, row-major.
///
/// Slot `r * 4 + c` holds row `r`, column `c`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ModelMatrix(pub [f32; 16]);

impl ModelMatrix {
    pub const IDENTITY: ModelMatrix = ModelMatrix([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, //
    ]);

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.0[row * 4 + col]
    }

    /// Column-major layout as expected by WGSL `mat4x4<f32>`.
    pub fn to_cols(&self) -> [[f32; 4]; 4] {
        let m = &self.0;
        let mut cols = [[0.0f32; 4]; 4];
        for (c, col) in cols.iter_mut().enumerate() {
            for (r, v) in col.iter_mut().enumerate() {
                *v = m[r * 4 + c];
            }
        }
        cols
    }
}

/// Builds the model matrix for Euler angles (degrees) and a uniform scale.
///
/// Rotation order is X first, then Y, then Z. Every slot except the
/// homogeneous corner (slot 15) is multiplied by `scale`, including the
/// zero entries of the last row and column.
pub fn model_matrix(rx: f32, ry: f32, rz: f32, scale: f32) -> ModelMatrix {
    let (s1, c1) = rx.to_radians().sin_cos();
    let (s2, c2) = ry.to_radians().sin_cos();
    let (s3, c3) = rz.to_radians().sin_cos();

    let mut m = [
        c3 * c2,
        -s3 * c2,
        s2,
        0.0,
        s3 * c1 + c3 * s2 * s1,
        c3 * c1 - s3 * s2 * s1,
        -c2 * s1,
        0.0,
        s3 * s1 - c3 * s2 * c1,
        c3 * s1 + s3 * s2 * c1,
        c2 * c1,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
    ];

    for v in &mut m[..15] {
        *v *= scale;
    }

    ModelMatrix(m)
}
