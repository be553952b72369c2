//! Structured codec settings and their ffmpeg argument form.

/// Video and audio encoder settings for one export.
///
/// Serialized to ffmpeg arguments by [`CodecConfig::to_args`]; there is no
/// other way these values reach the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    pub video_codec: String,
    pub pixel_format: String,
    pub profile: String,
    pub preset: String,
    pub crf: u8,
    pub audio_codec: String,
    pub audio_bitrate_kbps: u32,
    pub audio_sample_rate: u32,
}

impl CodecConfig {
    /// Lossless H.264 (CRF 0, preset slow, high profile, yuv420p) with
    /// AAC 320 kb/s at 48 kHz.
    pub fn max_quality() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            pixel_format: "yuv420p".to_string(),
            profile: "high".to_string(),
            preset: "slow".to_string(),
            crf: 0,
            audio_codec: "aac".to_string(),
            audio_bitrate_kbps: 320,
            audio_sample_rate: 48_000,
        }
    }

    /// Replaces the encoder preset and quality factor.
    #[must_use]
    pub fn with_quality(mut self, preset: &str, crf: u8) -> Self {
        self.preset = preset.to_string();
        self.crf = crf;
        self
    }

    /// The ffmpeg codec arguments, in a fixed order.
    pub fn to_args(&self) -> Vec<String> {
        vec![
            "-c:v".to_string(),
            self.video_codec.clone(),
            "-pix_fmt".to_string(),
            self.pixel_format.clone(),
            "-profile:v".to_string(),
            self.profile.clone(),
            "-preset".to_string(),
            self.preset.clone(),
            "-crf".to_string(),
            self.crf.to_string(),
            "-c:a".to_string(),
            self.audio_codec.clone(),
            "-b:a".to_string(),
            format!("{}k", self.audio_bitrate_kbps),
            "-ar".to_string(),
            self.audio_sample_rate.to_string(),
        ]
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::max_quality()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.iter()
            .position(|arg| arg == flag)
            .and_then(|i| args.get(i + 1))
            .map(String::as_str)
    }

    #[test]
    fn test_max_quality_args() {
        let args = CodecConfig::max_quality().to_args();
        assert_eq!(
            args.join(" "),
            "-c:v libx264 -pix_fmt yuv420p -profile:v high -preset slow -crf 0 \
             -c:a aac -b:a 320k -ar 48000"
        );
    }

    #[test]
    fn test_quality_override_replaces_values_not_flags() {
        let args = CodecConfig::max_quality().with_quality("veryfast", 23).to_args();
        assert_eq!(value_after(&args, "-preset"), Some("veryfast"));
        assert_eq!(value_after(&args, "-crf"), Some("23"));
        assert_eq!(args.iter().filter(|a| *a == "-preset").count(), 1);
        assert_eq!(args.iter().filter(|a| *a == "-crf").count(), 1);
        assert_eq!(args.len(), CodecConfig::max_quality().to_args().len());
    }
}
