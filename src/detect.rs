//! Client for the detection service.
//!
//! `POST /detect` takes a multipart `image` field and answers with the path of
//! an annotated copy plus the detected boxes. The annotated copy is then
//! fetched from `/<annotated_image_path>`. Requests run on a worker thread and
//! report back over a channel so the UI never blocks on the network.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crossbeam_channel::Receiver;
use eframe::egui;
use image::RgbaImage;
use reqwest::blocking::multipart;

use crate::config::Config;
use crate::error::DetectError;
use crate::model::{BoundingBox, DetectResponse, ErrorBody};

/// A successful round trip: the annotated image and its initial boxes.
#[derive(Debug)]
pub struct Detected {
    pub image: RgbaImage,
    pub boxes: Vec<BoundingBox>,
}

pub type DetectOutcome = Result<Detected, DetectError>;

#[derive(Clone, Debug)]
pub struct DetectionClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl DetectionClient {
    pub fn new(config: &Config) -> Result<Self, DetectError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| DetectError::ClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn detect_url(&self) -> String {
        format!("{}/detect", self.base_url)
    }

    pub fn asset_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Upload `image_path`, then download the annotated result.
    pub fn detect(&self, image_path: &Path) -> DetectOutcome {
        let bytes = std::fs::read(image_path).map_err(|source| DetectError::ReadImage {
            path: image_path.to_path_buf(),
            source,
        })?;
        let file_name = image_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        log::info!(
            "uploading {} ({} bytes) to {}",
            file_name,
            bytes.len(),
            self.detect_url()
        );

        let part = multipart::Part::bytes(bytes).file_name(file_name);
        let form = multipart::Form::new().part("image", part);
        let resp = self.http.post(self.detect_url()).multipart(form).send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        let parsed = parse_detect_response(status, &body)?;
        log::info!(
            "service returned {} detections, annotated image at {}",
            parsed.detections.len(),
            parsed.annotated_image_path
        );

        let image = self.fetch_image(&parsed.annotated_image_path)?;
        Ok(Detected {
            image,
            boxes: parsed.detections.into_iter().map(BoundingBox::from).collect(),
        })
    }

    fn fetch_image(&self, path: &str) -> Result<RgbaImage, DetectError> {
        let url = self.asset_url(path);
        log::debug!("fetching annotated image {url}");
        let bytes = self.http.get(&url).send()?.error_for_status()?.bytes()?;
        Ok(image::load_from_memory(&bytes)?.to_rgba8())
    }
}

/// Interpret a `/detect` reply. Non-success statuses carry `{error}`.
pub fn parse_detect_response(status: u16, body: &str) -> Result<DetectResponse, DetectError> {
    if !(200..300).contains(&status) {
        let err: ErrorBody = serde_json::from_str(body)?;
        return Err(DetectError::Service {
            status,
            message: err.error,
        });
    }
    Ok(serde_json::from_str(body)?)
}

/// Run [`DetectionClient::detect`] on a worker thread. The receiver yields
/// exactly one outcome; `ctx` is asked to repaint once it is sent.
pub fn spawn_detection(
    client: DetectionClient,
    image_path: PathBuf,
    ctx: egui::Context,
) -> Receiver<DetectOutcome> {
    let (tx, rx) = crossbeam_channel::bounded(1);
    std::thread::spawn(move || {
        let outcome = client.detect(&image_path);
        if let Err(e) = &outcome {
            log::error!("detection for {} failed: {e}", image_path.display());
        }
        // The UI may have moved on to a newer upload.
        let _ = tx.send(outcome);
        ctx.request_repaint();
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_success_body_in_order() {
        let body = serde_json::json!({
            "annotated_image_path": "uploads/annotated_street.jpg",
            "detections": [
                { "rect": [10, 20, 110, 220], "label": "person" },
                { "rect": [300, 40, 520, 260], "label": "car" }
            ]
        })
        .to_string();
        let resp = parse_detect_response(200, &body).unwrap();
        assert_eq!(resp.annotated_image_path, "uploads/annotated_street.jpg");
        let boxes: Vec<BoundingBox> = resp.detections.into_iter().map(BoundingBox::from).collect();
        assert_eq!(
            boxes,
            vec![
                BoundingBox::new(10.0, 20.0, 110.0, 220.0, "person"),
                BoundingBox::new(300.0, 40.0, 520.0, 260.0, "car"),
            ]
        );
    }

    #[test]
    fn service_error_is_verbatim() {
        let body = r#"{"error": "No image file provided."}"#;
        match parse_detect_response(400, body) {
            Err(DetectError::Service { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "No image file provided.");
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_bodies() {
        assert!(matches!(
            parse_detect_response(200, r#"{"detections": []}"#),
            Err(DetectError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_detect_response(500, "<html>oops</html>"),
            Err(DetectError::MalformedResponse(_))
        ));
    }

    #[test]
    fn urls_are_joined_cleanly() {
        let config = Config {
            server_url: "http://localhost:5000/".into(),
            ..Config::default()
        };
        let client = DetectionClient::new(&config).unwrap();
        assert_eq!(client.detect_url(), "http://localhost:5000/detect");
        assert_eq!(
            client.asset_url("/uploads/annotated_a.png"),
            "http://localhost:5000/uploads/annotated_a.png"
        );
    }

    #[test]
    fn unreadable_file_fails_before_network() {
        let client = DetectionClient::new(&Config::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let outcome = client.detect(&dir.path().join("missing.jpg"));
        assert!(matches!(outcome, Err(DetectError::ReadImage { .. })));
    }
}
