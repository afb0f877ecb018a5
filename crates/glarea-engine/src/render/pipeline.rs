use std::fmt;

/// Lazily built GPU resources keyed by surface format.
///
/// A failed build is sticky: once shader compilation or pipeline creation
/// fails, the renderer stays disabled and every later draw is skipped.
#[derive(Debug)]
pub enum PipelineState<T> {
    Pending,
    Ready {
        format: wgpu::TextureFormat,
        resources: T,
    },
    Failed,
}

impl<T> Default for PipelineState<T> {
    fn default() -> Self {
        PipelineState::Pending
    }
}

impl<T> PipelineState<T> {
    /// Returns the resources for `format`, building them if needed.
    ///
    /// Rebuilds when the surface format changed. Returns `None` once a build
    /// has failed.
    pub fn ensure<E, F>(&mut self, format: wgpu::TextureFormat, label: &str, build: F) -> Option<&T>
    where
        E: fmt::Display,
        F: FnOnce() -> Result<T, E>,
    {
        let stale = match self {
            PipelineState::Failed => return None,
            PipelineState::Ready { format: f, .. } => *f != format,
            PipelineState::Pending => true,
        };

        if stale {
            *self = match build() {
                Ok(resources) => {
                    log::debug!("{label}: pipeline ready for {format:?}");
                    PipelineState::Ready { format, resources }
                }
                Err(err) => {
                    log::warn!("{label}: pipeline creation failed, rendering disabled:\n{err}");
                    PipelineState::Failed
                }
            };
        }

        match self {
            PipelineState::Ready { resources, .. } => Some(&*resources),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PipelineState::Failed)
    }
}

/// Runs `build` inside a validation error scope.
///
/// Shader compile and pipeline link errors surface here instead of reaching
/// the device's uncaptured-error handler.
pub(crate) fn capture_validation<T>(
    device: &wgpu::Device,
    build: impl FnOnce(&wgpu::Device) -> T,
) -> Result<T, wgpu::Error> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = build(device);
    match pollster::block_on(scope.pop()) {
        Some(err) => Err(err),
        None => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat as Fmt;

    #[test]
    fn builds_once_per_format() {
        let mut state: PipelineState<u32> = PipelineState::default();
        let mut builds = 0;

        for _ in 0..3 {
            let got = state.ensure(Fmt::Bgra8UnormSrgb, "test", || {
                builds += 1;
                Ok::<_, String>(7)
            });
            assert_eq!(got, Some(&7));
        }
        assert_eq!(builds, 1);
    }

    #[test]
    fn rebuilds_on_format_change() {
        let mut state: PipelineState<&'static str> = PipelineState::default();
        state.ensure(Fmt::Bgra8UnormSrgb, "test", || Ok::<_, String>("bgra"));
        let got = state.ensure(Fmt::Rgba8UnormSrgb, "test", || Ok::<_, String>("rgba"));
        assert_eq!(got, Some(&"rgba"));
    }

    #[test]
    fn failure_is_sticky() {
        let mut state: PipelineState<u32> = PipelineState::default();
        assert_eq!(state.ensure(Fmt::Bgra8Unorm, "test", || Err("compile error")), None);
        assert!(state.is_failed());

        let mut retried = false;
        let got = state.ensure(Fmt::Bgra8Unorm, "test", || {
            retried = true;
            Ok::<_, &str>(1)
        });
        assert_eq!(got, None);
        assert!(!retried);
        assert!(state.is_failed());
    }
}
