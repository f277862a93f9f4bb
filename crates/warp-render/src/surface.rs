/// What a frame loop does after acquiring the surface texture fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceRecovery {
    /// Reconfigure with the current size and try again next frame.
    Reconfigure,
    /// Tear the session down and stop scheduling frames.
    Stop,
    /// Drop this frame only.
    SkipFrame,
}

pub fn recovery_for(err: &wgpu::SurfaceError) -> SurfaceRecovery {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceRecovery::Reconfigure,
        wgpu::SurfaceError::OutOfMemory => SurfaceRecovery::Stop,
        _ => SurfaceRecovery::SkipFrame,
    }
}
