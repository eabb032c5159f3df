//! Camera/file capture controller for the attendance check-in flow.
//!
//! The controller owns the one exclusive resource in the application: the
//! camera device. Ownership runs from a successful [`open_stream`] +
//! [`CaptureController::attach`] until the next `capture_frame`/`release`.
//! The invariant is that at most one media stream is live at any time:
//! attaching while streaming releases the existing stream first, and
//! `release` is idempotent and runs on every exit path (retake, capture,
//! page teardown).
//!
//! Browser API calls are gated behind the `csr` feature; the state machine
//! itself is plain data so it is exercised by native tests.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

#[cfg(feature = "csr")]
use wasm_bindgen::JsCast;

/// Controller lifecycle: `idle -> (attach) -> streaming -> (capture | release) -> idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CapturePhase {
    #[default]
    Idle,
    Streaming,
}

/// An encoded still image plus its pixel dimensions.
///
/// Transient: held in memory for the duration of one attendance submission
/// and discarded on retake or start-over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedImage {
    /// `data:image/...;base64,` URL, as produced by canvas encoding or a
    /// file read. Sent to the backend as-is.
    pub data_url: String,
    pub width: u32,
    pub height: u32,
}

/// Failures from camera acquisition or file decoding. Device errors are
/// shown inline in the capture card and return the UI to the idle state.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Unable to access camera: {0}")]
    Camera(String),
    #[error("Could not read the selected file: {0}")]
    File(String),
    #[error("no active camera stream")]
    NotStreaming,
}

/// Owns the active media stream (if any) and the capture phase.
#[derive(Debug, Default)]
pub struct CaptureController {
    phase: CapturePhase,
    /// Set by `shutdown` on page teardown; a stream that resolves afterwards
    /// is stopped instead of attached, so camera handles cannot leak past
    /// unmount.
    closed: bool,
    #[cfg(feature = "csr")]
    stream: Option<web_sys::MediaStream>,
    #[cfg(not(feature = "csr"))]
    live: bool,
}

impl CaptureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    pub fn is_streaming(&self) -> bool {
        self.phase == CapturePhase::Streaming
    }

    /// Bind an acquired stream to the live video surface and enter the
    /// streaming phase. Any previously attached stream is released first so
    /// two device handles never overlap.
    #[cfg(feature = "csr")]
    pub fn attach(&mut self, stream: web_sys::MediaStream, video: &web_sys::HtmlVideoElement) {
        self.release();
        if self.closed {
            stop_tracks(&stream);
            return;
        }
        video.set_src_object(Some(&stream));
        self.stream = Some(stream);
        self.phase = CapturePhase::Streaming;
    }

    #[cfg(not(feature = "csr"))]
    pub fn attach(&mut self) {
        self.release();
        if self.closed {
            return;
        }
        self.live = true;
        self.phase = CapturePhase::Streaming;
    }

    /// Stop all tracks of the active stream, if any, and return to idle.
    /// Idempotent; returns true when a live stream was actually stopped.
    pub fn release(&mut self) -> bool {
        self.phase = CapturePhase::Idle;
        #[cfg(feature = "csr")]
        {
            match self.stream.take() {
                Some(stream) => {
                    stop_tracks(&stream);
                    true
                }
                None => false,
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            std::mem::take(&mut self.live)
        }
    }

    /// Release and refuse any stream that arrives later. Called from
    /// `on_cleanup` when the attendance page unmounts.
    pub fn shutdown(&mut self) {
        self.release();
        self.closed = true;
    }

    /// Draw the current video frame into the off-screen canvas at the
    /// video's *actual* reported resolution (camera negotiation may not
    /// honor the requested 640x480), encode it as JPEG, and release the
    /// device. Valid only while streaming.
    #[cfg(feature = "csr")]
    pub fn capture_frame(
        &mut self,
        video: &web_sys::HtmlVideoElement,
        canvas: &web_sys::HtmlCanvasElement,
    ) -> Result<CapturedImage, CaptureError> {
        if self.phase != CapturePhase::Streaming {
            return Err(CaptureError::NotStreaming);
        }

        let width = video.video_width();
        let height = video.video_height();
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<web_sys::CanvasRenderingContext2d>().ok())
            .ok_or_else(|| CaptureError::Camera("canvas 2d context unavailable".to_owned()))?;
        ctx.draw_image_with_html_video_element_and_dw_and_dh(
            video,
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        )
        .map_err(|_| CaptureError::Camera("could not draw video frame".to_owned()))?;

        let data_url = canvas
            .to_data_url_with_type("image/jpeg")
            .map_err(|_| CaptureError::Camera("could not encode frame".to_owned()))?;

        // Device must be released as soon as a frame is captured.
        self.release();

        Ok(CapturedImage { data_url, width, height })
    }
}

/// Request a 640x480 front-facing camera stream from the platform.
///
/// On failure (permission denied, no device) the error is surfaced to the
/// caller and no partially-initialized stream is left behind.
#[cfg(feature = "csr")]
pub async fn open_stream() -> Result<web_sys::MediaStream, CaptureError> {
    use wasm_bindgen_futures::JsFuture;

    let devices = web_sys::window()
        .and_then(|w| w.navigator().media_devices().ok())
        .ok_or_else(|| CaptureError::Camera("media devices unavailable".to_owned()))?;

    let video = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&video, &"width".into(), &640.into());
    let _ = js_sys::Reflect::set(&video, &"height".into(), &480.into());
    let _ = js_sys::Reflect::set(&video, &"facingMode".into(), &"user".into());

    let constraints = web_sys::MediaStreamConstraints::new();
    constraints.set_video(&video.into());

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| CaptureError::Camera(js_error_message(&e)))?;
    let stream = JsFuture::from(promise)
        .await
        .map_err(|e| CaptureError::Camera(js_error_message(&e)))?;

    stream
        .dyn_into::<web_sys::MediaStream>()
        .map_err(|_| CaptureError::Camera("unexpected stream type".to_owned()))
}

/// Read a user-selected file into the same encoded-image representation as
/// `capture_frame`, recovering dimensions by decoding it off-screen. Never
/// touches the camera.
#[cfg(feature = "csr")]
pub async fn load_from_file(file: gloo_file::File) -> Result<CapturedImage, CaptureError> {
    use wasm_bindgen_futures::JsFuture;

    let data_url = gloo_file::futures::read_as_data_url(&file)
        .await
        .map_err(|e| CaptureError::File(e.to_string()))?;

    let img = web_sys::HtmlImageElement::new()
        .map_err(|_| CaptureError::File("image element unavailable".to_owned()))?;
    img.set_src(&data_url);
    JsFuture::from(img.decode())
        .await
        .map_err(|_| CaptureError::File("not a decodable image".to_owned()))?;

    Ok(CapturedImage {
        width: img.natural_width(),
        height: img.natural_height(),
        data_url,
    })
}

/// Pull the first selected file out of a file-input change event.
#[cfg(feature = "csr")]
pub fn picked_file(ev: &leptos::ev::Event) -> Option<gloo_file::File> {
    let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    let file = input.files()?.get(0)?;
    // Allow re-selecting the same file after a start-over.
    input.set_value("");
    Some(gloo_file::File::from(file))
}

/// Stop a stream that was acquired but never attached (e.g. the video
/// surface disappeared while the permission prompt was open).
#[cfg(feature = "csr")]
pub fn discard_stream(stream: &web_sys::MediaStream) {
    stop_tracks(stream);
}

#[cfg(feature = "csr")]
fn stop_tracks(stream: &web_sys::MediaStream) {
    for track in stream.get_tracks().iter() {
        track.unchecked_into::<web_sys::MediaStreamTrack>().stop();
    }
}

#[cfg(feature = "csr")]
fn js_error_message(value: &wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &"message".into())
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| "unknown error".to_owned())
}
