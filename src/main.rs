//! Main module for the mineral scanner application using Yew.
//! Wires UI components, state hooks, and side-effect logic.

use gloo_timers::callback::Interval;
use log::warn;
use mineral_scanner::{defaults, generate_report, DisplayMode, ScanReport, ScanTimeline};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, HtmlInputElement,
    HtmlVideoElement, MediaStream,
};
use yew::prelude::*;

mod components;
mod config;
mod media;
mod utils;

use components::{render_results, AnomalyOverlay, SettingsModal};
use config::*;
use utils::{hud_gradient, letterbox_rect};

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    let mode = use_state(|| DisplayMode::Camera);
    let scanning = use_state(|| false);
    let progress = use_state(|| 0u32);
    let report = use_state(|| None::<Rc<ScanReport>>);
    let status = use_state(|| STATUS_AIM_CAMERA.to_string());
    let sensitivity = use_state(|| DEFAULT_SENSITIVITY_PCT);
    let opacity = use_state(|| DEFAULT_OPACITY_PCT);
    let settings_open = use_state(|| false);

    // Non-rendered resources: the scan state machine, the progress timer
    // handle, and the camera stream the component currently owns.
    let timeline = use_mut_ref(ScanTimeline::new);
    let scan_interval = use_mut_ref(|| None::<Interval>);
    let camera_stream = use_mut_ref(|| None::<MediaStream>);

    let video_ref = use_node_ref();
    let canvas_ref = use_node_ref();
    let upload_ref = use_node_ref();
    let scan_audio_ref = use_node_ref();
    let alert_audio_ref = use_node_ref();

    // Acquire (or re-acquire) the rear camera. Any previously held stream
    // is stopped first, so repeated initialization never leaks a device.
    // On failure the UI alerts and falls back to upload mode.
    let initialize_camera = {
        let mode = mode.clone();
        let status = status.clone();
        let camera_stream = camera_stream.clone();
        let video_ref = video_ref.clone();
        let upload_ref = upload_ref.clone();
        Callback::from(move |_: ()| {
            let mode = mode.clone();
            let status = status.clone();
            let camera_stream = camera_stream.clone();
            let video_ref = video_ref.clone();
            let upload_ref = upload_ref.clone();
            wasm_bindgen_futures::spawn_local(async move {
                media::stop_stream(camera_stream.borrow_mut().take());
                match media::request_rear_camera().await {
                    Ok(stream) => {
                        if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                            media::bind_stream(&video, &stream);
                        }
                        *camera_stream.borrow_mut() = Some(stream);
                        mode.set(DisplayMode::Camera);
                        status.set(STATUS_AIM_CAMERA.to_string());
                    }
                    Err(err) => {
                        warn!(
                            "camera access failed: {}",
                            err.detail().unwrap_or("API unavailable")
                        );
                        media::alert(&err.to_string());
                        mode.set(DisplayMode::Upload);
                        status.set(STATUS_UPLOAD_PROMPT.to_string());
                        if let Some(input) = upload_ref.cast::<HtmlInputElement>() {
                            input.click();
                        }
                    }
                }
            });
        })
    };

    // Configure audio cues and start the camera on mount.
    {
        let initialize_camera = initialize_camera.clone();
        let scan_audio_ref = scan_audio_ref.clone();
        let alert_audio_ref = alert_audio_ref.clone();
        use_effect_with((), move |_| {
            media::configure_cue(&scan_audio_ref, SCAN_AUDIO_VOLUME, true);
            media::configure_cue(&alert_audio_ref, ALERT_AUDIO_VOLUME, false);
            initialize_camera.emit(());
        });
    }

    let toggle_mode = {
        let mode = mode.clone();
        let status = status.clone();
        let camera_stream = camera_stream.clone();
        let upload_ref = upload_ref.clone();
        let initialize_camera = initialize_camera.clone();
        Callback::from(move |_: MouseEvent| match *mode {
            DisplayMode::Camera => {
                media::stop_stream(camera_stream.borrow_mut().take());
                mode.set(DisplayMode::Upload);
                status.set(STATUS_UPLOAD_PROMPT.to_string());
                if let Some(input) = upload_ref.cast::<HtmlInputElement>() {
                    input.click();
                }
            }
            DisplayMode::Upload => {
                if camera_stream.borrow().is_some() {
                    mode.set(DisplayMode::Camera);
                    status.set(STATUS_AIM_CAMERA.to_string());
                } else {
                    initialize_camera.emit(());
                }
            }
        })
    };

    // Draw a decoded upload onto the canvas, letterboxed to the container.
    let on_image_decoded = {
        let canvas_ref = canvas_ref.clone();
        let status = status.clone();
        Callback::from(move |image: HtmlImageElement| {
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                return;
            };
            let Some(container) = canvas.parent_element() else {
                return;
            };
            let container_w = container.client_width() as f64;
            let container_h = container.client_height() as f64;
            canvas.set_width(container_w as u32);
            canvas.set_height(container_h as u32);

            let context = canvas
                .get_context("2d")
                .ok()
                .flatten()
                .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
            let Some(context) = context else {
                warn!("2d canvas context unavailable");
                return;
            };

            let rect = letterbox_rect(
                container_w,
                container_h,
                image.natural_width() as f64,
                image.natural_height() as f64,
            );
            if let Err(err) = context.draw_image_with_html_image_element_and_dw_and_dh(
                &image,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
            ) {
                warn!("failed to draw uploaded image: {err:?}");
                return;
            }
            status.set(STATUS_IMAGE_READY.to_string());
        })
    };

    let on_upload_change = {
        let on_image_decoded = on_image_decoded.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            // No file selected is a silent no-op.
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            media::read_image_file(&file, on_image_decoded.clone());
        })
    };

    // Begin the scripted scan: guarded against overlapping runs, clears the
    // previous report, and arms the fixed-cadence progress timer.
    let start_scan = {
        let scanning = scanning.clone();
        let progress = progress.clone();
        let report = report.clone();
        let status = status.clone();
        let timeline = timeline.clone();
        let scan_interval = scan_interval.clone();
        let scan_audio_ref = scan_audio_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if !timeline.borrow_mut().begin() {
                return;
            }
            scanning.set(true);
            report.set(None);
            progress.set(0);
            status.set(STATUS_ANALYZING.to_string());
            media::play_audio(&scan_audio_ref);

            let timeline = timeline.clone();
            let progress = progress.clone();
            *scan_interval.borrow_mut() = Some(Interval::new(defaults::SCAN_TICK_MS, move || {
                progress.set(timeline.borrow_mut().tick());
            }));
        })
    };

    // Completion effect: fires once per scan when progress hits 100.
    {
        let scanning = scanning.clone();
        let report = report.clone();
        let status = status.clone();
        let scan_interval = scan_interval.clone();
        let scan_audio_ref = scan_audio_ref.clone();
        let alert_audio_ref = alert_audio_ref.clone();
        use_effect_with(*progress, move |&percent| {
            if percent >= defaults::PROGRESS_COMPLETE {
                scan_interval.borrow_mut().take();
                media::rewind_audio(&scan_audio_ref);
                media::play_audio(&alert_audio_ref);
                report.set(Some(Rc::new(generate_report(&mut rand::rng()))));
                status.set(STATUS_COMPLETE.to_string());
                scanning.set(false);
            }
            || ()
        });
    }

    let open_report = Callback::from(|_: MouseEvent| {
        if let Err(err) = gloo_utils::window().location().set_href(REPORT_PAGE) {
            warn!("report navigation failed: {err:?}");
        }
    });

    let open_settings = {
        let settings_open = settings_open.clone();
        Callback::from(move |_: MouseEvent| settings_open.set(true))
    };
    let close_settings = {
        let settings_open = settings_open.clone();
        Callback::from(move |_: MouseEvent| settings_open.set(false))
    };

    let on_sensitivity = {
        let sensitivity = sensitivity.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(value) = input.value().parse::<u32>() {
                sensitivity.set(value);
            }
        })
    };
    let on_opacity = {
        let opacity = opacity.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(value) = input.value().parse::<u32>() {
                opacity.set(value);
            }
        })
    };

    let (video_style, canvas_style) = match *mode {
        DisplayMode::Camera => ("display:block", "display:none"),
        DisplayMode::Upload => ("display:none", "display:block"),
    };
    let (toggle_icon, toggle_title) = match *mode {
        DisplayMode::Camera => ("fas fa-upload", TOGGLE_TO_UPLOAD_TITLE),
        DisplayMode::Upload => ("fas fa-camera", TOGGLE_TO_CAMERA_TITLE),
    };

    html! {
        <div class="app-container" dir="rtl">
            <div class="viewport">
                <video ref={video_ref.clone()} id="live-camera" style={video_style}></video>
                <canvas ref={canvas_ref.clone()} id="image-canvas" style={canvas_style}></canvas>

                <div class="ui-hud" style={hud_gradient(*opacity)}></div>

                <div id="ar-overlay" class="ar-overlay">
                    if let Some(report) = (*report).as_ref() {
                        <AnomalyOverlay marker={report.anomaly.clone()} />
                    }
                </div>

                <div class="top-bar">
                    <button class="icon-button" id="settings-icon" onclick={open_settings}>
                        <i class="fas fa-cog"></i>
                    </button>
                    <button class="icon-button"
                        id="toggle-mode-button"
                        title={toggle_title}
                        onclick={toggle_mode}>
                        <i class={toggle_icon}></i>
                    </button>
                </div>

                <div class="scan-panel">
                    <p id="scan-message">{ (*status).clone() }</p>
                    if *scanning {
                        <div id="scan-progress-bar" class="scan-progress-bar">
                            <div id="progress"
                                class="progress"
                                style={format!("width:{}%", *progress)}>
                            </div>
                        </div>
                    }
                    if (*report).is_none() {
                        <button id="scan-button"
                            class={classes!("btn-primary", "scan-button", (*scanning).then_some("scanning"))}
                            onclick={start_scan}>
                            { if *scanning { SCAN_BUTTON_ACTIVE } else { SCAN_BUTTON_IDLE } }
                        </button>
                    } else {
                        <button id="report-button" class="btn-primary" onclick={open_report}>
                            { REPORT_BUTTON_LABEL }
                        </button>
                    }
                </div>
            </div>

            { render_results((*report).as_deref()) }

            <input ref={upload_ref.clone()}
                id="image-upload-input"
                type="file"
                accept="image/*"
                class="hidden"
                onchange={on_upload_change}
            />
            <audio ref={scan_audio_ref.clone()} src="assets/scan-loop.mp3" preload="auto"></audio>
            <audio ref={alert_audio_ref.clone()} src="assets/detection-alert.mp3" preload="auto"></audio>

            <SettingsModal
                open={*settings_open}
                sensitivity={*sensitivity}
                opacity={*opacity}
                on_sensitivity={on_sensitivity}
                on_opacity={on_opacity}
                on_close={close_settings}
            />
        </div>
    }
}

/// Entry point: installs the panic hook and mounts the Yew renderer.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
