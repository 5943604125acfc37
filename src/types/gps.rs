#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// GPS position from the EXIF GPS IFD, in decimal degrees and metres
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpsFix {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

/// Gimbal attitude from the DJI XMP block
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GimbalAttitude {
    pub pitch: f64,
    pub yaw: Option<f64>,
    /// Height above the take-off point, metres
    pub relative_altitude: Option<f64>,
}
