//! Wire types for the generation and extraction endpoints

use serde::{Deserialize, Serialize};

/// Transformation mode sent with a generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Full exam-ready notes
    Normal,
    /// 6-10 most important topics, covered in depth
    Important,
    /// Multiple-choice questions with answers and explanations
    Mcqs,
    /// Short summary covering every topic
    Summarise,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Important => "important",
            Self::Mcqs => "mcqs",
            Self::Summarise => "summarise",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "important" => Ok(Self::Important),
            "mcqs" => Ok(Self::Mcqs),
            "summarise" => Ok(Self::Summarise),
            other => Err(format!(
                "unknown mode '{other}' (expected normal, important, mcqs, or summarise)"
            )),
        }
    }
}

/// Body of a generation request
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub text: &'a str,
    pub mode: Mode,
}

/// Kind of uploaded file, as the extraction endpoint expects it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Image,
}

/// One file queued for OCR extraction
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Display name used in per-file error messages
    pub name: String,
    /// File contents, base64-encoded
    pub data_base64: String,
    /// MIME type forwarded to the extraction service
    pub mime_type: String,
    pub file_type: FileType,
}

/// Body of an extraction request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest<'a> {
    pub file_base64: &'a str,
    pub mime_type: &'a str,
    pub file_type: FileType,
}

/// Successful extraction response
#[derive(Debug, Deserialize)]
pub struct ExtractResponse {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serializes_lowercase() {
        let body = GenerateRequest {
            text: "photosynthesis",
            mode: Mode::Mcqs,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["mode"], "mcqs");
        assert_eq!(json["text"], "photosynthesis");
    }

    #[test]
    fn test_mode_round_trips_from_str() {
        for mode in [Mode::Normal, Mode::Important, Mode::Mcqs, Mode::Summarise] {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
        assert!("flashcards".parse::<Mode>().is_err());
    }

    #[test]
    fn test_extract_request_uses_camel_case() {
        let body = ExtractRequest {
            file_base64: "aGk=",
            mime_type: "application/pdf",
            file_type: FileType::Pdf,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["fileBase64"], "aGk=");
        assert_eq!(json["mimeType"], "application/pdf");
        assert_eq!(json["fileType"], "pdf");
    }
}
