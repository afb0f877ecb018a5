/// What the frame loop should do after the surface refused to hand out a frame.
///
/// In every case the current frame is not drawn.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

impl SurfaceErrorAction {
    /// Classifies an acquisition error. Reconfiguration itself happens in `Gpu`.
    pub fn classify(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigured,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::SkipFrame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::SurfaceError;

    fn classify(err: SurfaceError) -> SurfaceErrorAction {
        SurfaceErrorAction::classify(&err)
    }

    #[test]
    fn lost_and_outdated_reconfigure() {
        assert_eq!(classify(SurfaceError::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(classify(SurfaceError::Outdated), SurfaceErrorAction::Reconfigured);
    }

    #[test]
    fn out_of_memory_is_fatal() {
        assert_eq!(classify(SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
    }

    #[test]
    fn timeout_skips_frame() {
        assert_eq!(classify(SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
    }
}
