use athletehub_core::model::VideoInput;
use athletehub_core::prelude::CaptureFault;
use std::fs;
use std::path::{Path, PathBuf};

const SYNTHETIC_MIME: &str = "video/webm";

/// A recorded or uploaded clip handed to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoClip {
    pub size_bytes: u64,
    pub mime: String,
    pub path: Option<PathBuf>,
}

impl VideoClip {
    /// Accepts only non-empty files whose extension maps to a `video/*` type.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CaptureFault> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)
            .map_err(|err| CaptureFault::Unreadable(format!("{}: {}", path.display(), err)))?;
        if !metadata.is_file() {
            return Err(CaptureFault::Unreadable(format!(
                "{} is not a file",
                path.display()
            )));
        }

        let mime = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        if !mime.starts_with("video/") {
            return Err(CaptureFault::UnsupportedFormat(mime));
        }
        if metadata.len() == 0 {
            return Err(CaptureFault::EmptyRecording);
        }

        Ok(Self {
            size_bytes: metadata.len(),
            mime,
            path: Some(path.to_path_buf()),
        })
    }

    /// Stand-in recording of `size_bytes` for offline runs.
    pub fn synthetic(size_bytes: u64) -> Self {
        Self {
            size_bytes,
            mime: SYNTHETIC_MIME.to_string(),
            path: None,
        }
    }

    pub fn uri(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        let absolute = path.canonicalize().unwrap_or_else(|_| path.clone());
        Some(format!("file://{}", absolute.display()))
    }

    pub fn to_input(&self) -> VideoInput {
        VideoInput {
            size_bytes: self.size_bytes,
            uri: self.uri(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn video_file_is_accepted_with_its_size() {
        let mut file = Builder::new().suffix(".webm").tempfile().unwrap();
        file.write_all(&[0u8; 4096]).unwrap();
        let clip = VideoClip::from_path(file.path()).unwrap();
        assert_eq!(clip.size_bytes, 4096);
        assert_eq!(clip.mime, "video/webm");
        let input = clip.to_input();
        assert!(input.uri.unwrap().starts_with("file://"));
    }

    #[test]
    fn non_video_file_is_unsupported() {
        let mut file = Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"not a video").unwrap();
        assert!(matches!(
            VideoClip::from_path(file.path()),
            Err(CaptureFault::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn empty_or_missing_recordings_are_rejected() {
        let file = Builder::new().suffix(".mp4").tempfile().unwrap();
        assert_eq!(
            VideoClip::from_path(file.path()),
            Err(CaptureFault::EmptyRecording)
        );
        assert!(matches!(
            VideoClip::from_path("/definitely/not/here.mp4"),
            Err(CaptureFault::Unreadable(_))
        ));
    }

    #[test]
    fn synthetic_clip_has_no_uri() {
        let clip = VideoClip::synthetic(1_000);
        assert_eq!(clip.to_input().size_bytes, 1_000);
        assert!(clip.uri().is_none());
    }
}
