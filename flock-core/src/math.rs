//! Float helpers that resolve to `std` or `libm` depending on the `std` feature.

#[inline]
pub(crate) fn sqrt(value: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.sqrt()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sqrtf(value)
    }
}

#[inline]
pub(crate) fn atan2(y: f32, x: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        y.atan2(x)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::atan2f(y, x)
    }
}

#[inline]
pub(crate) fn sin_cos(angle: f32) -> (f32, f32) {
    #[cfg(feature = "std")]
    {
        angle.sin_cos()
    }
    #[cfg(not(feature = "std"))]
    {
        (libm::sinf(angle), libm::cosf(angle))
    }
}

#[inline]
pub(crate) fn floor(value: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.floor()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::floorf(value)
    }
}

/// Euclidean remainder: the result has the sign of `modulus` (which must be positive).
#[inline]
pub(crate) fn rem_euclid(value: f32, modulus: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.rem_euclid(modulus)
    }
    #[cfg(not(feature = "std"))]
    {
        let r = libm::fmodf(value, modulus);
        if r < 0.0 {
            r + modulus
        } else {
            r
        }
    }
}
