//! Browser media interop: camera acquisition and release, audio cues,
//! image-file reading, and alert dialogs.
//!
//! This module is the only place that touches `MediaDevices`, `FileReader`
//! and friends; the application layer talks to it through plain Rust
//! functions so the rest of the UI logic stays free of raw JS plumbing.

use log::warn;
use std::fmt;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    File, FileReader, HtmlAudioElement, HtmlImageElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints,
};
use yew::{Callback, NodeRef};

// Error type for camera acquisition. `Display` is the user-facing alert
// copy; the denial detail is kept separately for the console.
#[derive(Debug)]
pub enum CameraError {
    /// The MediaDevices API is missing or blocked entirely.
    Unsupported,
    /// Permission was refused or no suitable device exists.
    Denied(String),
}

impl CameraError {
    /// Raw browser error detail, when there is one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            CameraError::Unsupported => None,
            CameraError::Denied(detail) => Some(detail),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::Unsupported => write!(f, "الكاميرا غير مدعومة في هذا المتصفح."),
            CameraError::Denied(_) => write!(
                f,
                "لا يمكن الوصول إلى الكاميرا. سيتم التبديل إلى وضع رفع الصور."
            ),
        }
    }
}

impl std::error::Error for CameraError {}

/// Request a rear-facing (`environment`) video stream.
///
/// Suspends until the browser resolves the permission prompt. The caller
/// owns the returned stream and must release it via [`stop_stream`] before
/// requesting another one.
pub async fn request_rear_camera() -> Result<MediaStream, CameraError> {
    let navigator = gloo_utils::window().navigator();
    let media_devices = navigator
        .media_devices()
        .map_err(|_| CameraError::Unsupported)?;

    let video_constraints = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &video_constraints,
        &JsValue::from_str("facingMode"),
        &JsValue::from_str("environment"),
    );
    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&video_constraints);

    let promise = media_devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|err| CameraError::Denied(format!("{err:?}")))?;
    let stream = wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|err| CameraError::Denied(format!("{err:?}")))?;

    Ok(stream.unchecked_into::<MediaStream>())
}

/// Attach a stream to the video surface and start playback.
pub fn bind_stream(video: &HtmlVideoElement, stream: &MediaStream) {
    video.set_src_object(Some(stream));
    video.set_autoplay(true);
    video.set_muted(true);
    // iOS refuses inline playback without this attribute.
    if let Err(err) = video.set_attribute("playsinline", "true") {
        warn!("failed to set playsinline: {err:?}");
    }
    if let Err(err) = video.play() {
        warn!("video playback failed: {err:?}");
    }
}

/// Stop every track of the given stream, releasing the device.
pub fn stop_stream(stream: Option<MediaStream>) {
    if let Some(stream) = stream {
        stream.get_tracks().for_each(&mut |track, _index, _array| {
            track.unchecked_into::<web_sys::MediaStreamTrack>().stop();
        });
    }
}

/// Read the selected image file as a data URL, decode it, and hand the
/// decoded element to `on_image` once it is ready to draw.
pub fn read_image_file(file: &File, on_image: Callback<HtmlImageElement>) {
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(err) => {
            warn!("FileReader unavailable: {err:?}");
            return;
        }
    };

    let reader_handle = reader.clone();
    let onload = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let Some(data_url) = reader_handle.result().ok().and_then(|v| v.as_string()) else {
            warn!("file read produced no data URL");
            return;
        };
        let Ok(image) = HtmlImageElement::new() else {
            return;
        };

        let image_handle = image.clone();
        let on_image = on_image.clone();
        let image_onload = Closure::wrap(Box::new(move |_: web_sys::Event| {
            on_image.emit(image_handle.clone());
        }) as Box<dyn FnMut(web_sys::Event)>);
        image.set_onload(Some(image_onload.as_ref().unchecked_ref()));
        image_onload.forget();

        image.set_src(&data_url);
    }) as Box<dyn FnMut(web_sys::Event)>);

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();

    if let Err(err) = reader.read_as_data_url(file) {
        warn!("failed to read image file: {err:?}");
    }
}

/// Blocking user-facing alert.
pub fn alert(message: &str) {
    let _ = gloo_utils::window().alert_with_message(message);
}

/// One-time setup for an audio cue element.
pub fn configure_cue(node: &NodeRef, volume: f64, looped: bool) {
    if let Some(audio) = node.cast::<HtmlAudioElement>() {
        audio.set_volume(volume);
        audio.set_loop(looped);
    }
}

pub fn play_audio(node: &NodeRef) {
    if let Some(audio) = node.cast::<HtmlAudioElement>() {
        let _ = audio.play();
    }
}

/// Pause the cue and rewind it so the next scan starts from the top.
pub fn rewind_audio(node: &NodeRef) {
    if let Some(audio) = node.cast::<HtmlAudioElement>() {
        let _ = audio.pause();
        audio.set_current_time(0.0);
    }
}
