use std::fmt;

/// Error types for reading drone image metadata and writing overlays
#[derive(Debug)]
pub enum MissionError {
    /// I/O errors
    Io(std::io::Error),
    /// UTF-8 decoding errors (XMP packets)
    Utf8(std::str::Utf8Error),
    /// File is not a JPEG or its marker structure is broken
    InvalidFormat(String),
    /// A segment ran past the end of the file
    UnexpectedEof,
    /// EXIF block could not be decoded
    Exif(exif::Error),
    /// XMP packet is not well-formed XML
    Xml(roxmltree::Error),
    /// No usable GPS position in the EXIF block
    MissingGps(String),
    /// No gimbal attitude in the XMP packet
    MissingGimbal,
    /// A tag or attribute is present but its value is unusable
    Malformed(String),
    /// Export format error
    Export(String),
}

impl fmt::Display for MissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissionError::Io(err) => write!(f, "I/O error: {}", err),
            MissionError::Utf8(err) => write!(f, "UTF-8 error: {}", err),
            MissionError::InvalidFormat(msg) => write!(f, "Invalid image format: {}", msg),
            MissionError::UnexpectedEof => write!(f, "Unexpected end of file"),
            MissionError::Exif(err) => write!(f, "EXIF error: {}", err),
            MissionError::Xml(err) => write!(f, "XMP error: {}", err),
            MissionError::MissingGps(what) => write!(f, "No GPS info: missing {}", what),
            MissionError::MissingGimbal => write!(f, "No gimbal pitch in XMP packet"),
            MissionError::Malformed(msg) => write!(f, "Malformed metadata: {}", msg),
            MissionError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for MissionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MissionError::Io(err) => Some(err),
            MissionError::Utf8(err) => Some(err),
            MissionError::Exif(err) => Some(err),
            MissionError::Xml(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MissionError {
    fn from(err: std::io::Error) -> Self {
        MissionError::Io(err)
    }
}

impl From<std::str::Utf8Error> for MissionError {
    fn from(err: std::str::Utf8Error) -> Self {
        MissionError::Utf8(err)
    }
}

impl From<exif::Error> for MissionError {
    fn from(err: exif::Error) -> Self {
        match err {
            exif::Error::Io(io) => MissionError::Io(io),
            exif::Error::NotFound(_) => MissionError::MissingGps("EXIF block".to_string()),
            other => MissionError::Exif(other),
        }
    }
}

impl From<roxmltree::Error> for MissionError {
    fn from(err: roxmltree::Error) -> Self {
        MissionError::Xml(err)
    }
}

#[cfg(feature = "csv")]
impl From<csv::Error> for MissionError {
    fn from(err: csv::Error) -> Self {
        MissionError::Export(err.to_string())
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for MissionError {
    fn from(err: serde_json::Error) -> Self {
        MissionError::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MissionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            MissionError::MissingGps("GPSLatitude".to_string()).to_string(),
            "No GPS info: missing GPSLatitude"
        );
        assert_eq!(
            MissionError::UnexpectedEof.to_string(),
            "Unexpected end of file"
        );
    }

    #[test]
    fn test_exif_not_found_maps_to_missing_gps() {
        let err: MissionError = exif::Error::NotFound("JPEG").into();
        assert!(matches!(err, MissionError::MissingGps(_)));
    }

    #[test]
    fn test_io_error_has_source() {
        let err: MissionError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
