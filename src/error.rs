//! Error types for ocean synthesis, particle integration and export.

/// Errors produced by the numerical kernels and their front ends.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Lattice must have at least one cell per side.
    #[error("lattice size must be positive, got {0}")]
    InvalidLatticeSize(usize),

    /// Physical domain length must be positive and finite.
    #[error("domain length must be positive and finite, got {0} m")]
    InvalidDomainLength(f64),

    /// Cell lattice rectangle is not finite or has `min >= max` on some axis.
    #[error("cell grid bounds must satisfy min < max, got min {min}, max {max}")]
    InvalidDomainBounds { min: glam::DVec2, max: glam::DVec2 },

    /// A particle system parameter is out of range.
    #[error("invalid particle parameter: {0}")]
    InvalidParticleParams(String),

    /// Body sits exactly on the attractor, so the acceleration direction is undefined.
    #[error("singular acceleration: body at zero distance from the attractor")]
    SingularAcceleration,

    /// Mesh and ocean were built for different lattice sizes.
    #[error("lattice mismatch: mesh has {mesh} cells per side, ocean has {ocean}")]
    LatticeMismatch { mesh: usize, ocean: usize },

    /// Height field holds NaN or infinity and cannot be normalized.
    #[error("height field contains a non-finite value at index {0}")]
    NonFiniteHeight(usize),

    /// Height slice does not fill a square image of the requested side.
    #[error("heightmap needs {expected} heights, got {actual}")]
    HeightmapSize { expected: usize, actual: usize },

    /// PNG encoding or file write failed.
    #[error("failed to encode heightmap: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    /// Whether a batch caller can skip the offending item and carry on.
    ///
    /// Only per-body numerical conditions are recoverable; everything else
    /// is a misconfiguration that should stop the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::SingularAcceleration)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(Error::SingularAcceleration.is_recoverable());
        assert!(!Error::InvalidLatticeSize(0).is_recoverable());
        assert!(!Error::InvalidDomainLength(-1.0).is_recoverable());
        assert!(!Error::NonFiniteHeight(3).is_recoverable());
        assert!(!Error::InvalidDomainBounds {
            min: glam::DVec2::ONE,
            max: glam::DVec2::ZERO,
        }
        .is_recoverable());
    }

    #[test]
    fn test_display_mentions_values() {
        let msg = Error::LatticeMismatch { mesh: 8, ocean: 16 }.to_string();
        assert!(msg.contains('8') && msg.contains("16"));
    }

    #[test]
    fn test_image_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: Error = image::ImageError::IoError(io).into();
        assert!(matches!(err, Error::Image(_)));
        assert!(err.to_string().starts_with("failed to encode heightmap"));
        assert!(!err.is_recoverable());
    }
}
