use glam::{DMat4, DVec3, DVec4};

/// Perspective matrix in the `m34` convention: `w' = w + m34 * z`.
pub(crate) fn perspective(m34: f64) -> DMat4 {
    DMat4::from_cols(
        DVec4::X,
        DVec4::Y,
        DVec4::new(0.0, 0.0, 1.0, m34),
        DVec4::W,
    )
}

/// Apply `perspective(m34)` after `m`, centred on `center` so the vanishing point sits there.
pub(crate) fn with_perspective_about(m: DMat4, m34: f64, center: DVec3) -> DMat4 {
    if m34 == 0.0 {
        return m;
    }
    DMat4::from_translation(center) * perspective(m34) * DMat4::from_translation(-center) * m
}

/// Transform `p` and apply the homogeneous divide.
pub fn project_point(m: DMat4, p: DVec3) -> DVec3 {
    m.project_point3(p)
}
