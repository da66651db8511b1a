//! Pure Yew view components for the scanner HUD.
//!
//! This module contains stateless components that render based on props,
//! making them easy to test and reuse.

use mineral_scanner::{AnomalyMarker, Category, ResultEntry, ScanReport};
use yew::prelude::*;

use crate::config::{
    GEMSTONES_HEADING, METALS_HEADING, METEORITES_HEADING, OPACITY_LABEL, SAVE_SETTINGS_LABEL,
    SENSITIVITY_LABEL, SETTINGS_HEADING, STATUS_AWAITING_SCAN,
};
use crate::utils::percent_label;

/// Renders the three detection lists plus the structure info line.
///
/// Before the first completed scan (and right after a scan starts) the
/// lists are empty and the structure line shows the waiting text.
pub fn render_results(report: Option<&ScanReport>) -> Html {
    let structure_text = report
        .map(|r| r.anomaly.summary.clone())
        .unwrap_or_else(|| STATUS_AWAITING_SCAN.to_string());

    html! {
        <div class="results-panel">
            { render_category_list(METALS_HEADING, "precious-metals-list",
                report.map(|r| r.entries(Category::PreciousMetals))) }
            { render_category_list(GEMSTONES_HEADING, "gemstones-list",
                report.map(|r| r.entries(Category::Gemstones))) }
            { render_category_list(METEORITES_HEADING, "meteorites-list",
                report.map(|r| r.entries(Category::Meteorites))) }
            <div class="structure-info">{ structure_text }</div>
        </div>
    }
}

fn render_category_list(
    heading: &'static str,
    list_id: &'static str,
    entries: Option<&[ResultEntry]>,
) -> Html {
    html! {
        <div class="result-section">
            <h3>{ heading }</h3>
            <ul id={list_id}>
                { entries.unwrap_or_default().iter().map(render_entry_row).collect::<Html>() }
            </ul>
        </div>
    }
}

fn render_entry_row(entry: &ResultEntry) -> Html {
    html! {
        <li>
            <span>{ &entry.name }</span>
            <span class="value detected">{ entry.display_value() }</span>
        </li>
    }
}

/// Fabricated subsurface marker drawn over the viewport.
#[derive(Properties, PartialEq)]
pub struct AnomalyOverlayProps {
    pub marker: AnomalyMarker,
}

#[function_component(AnomalyOverlay)]
pub fn anomaly_overlay(props: &AnomalyOverlayProps) -> Html {
    let marker = &props.marker;
    let style = format!(
        "top:{}%;left:{}%;width:{}px;height:{}px",
        marker.top_pct, marker.left_pct, marker.width_px, marker.height_px
    );
    html! {
        <div class="ar-target" style={style}>
            <span>{ &marker.label }</span>
            { &marker.depth_text }
        </div>
    }
}

/// Settings modal with the two cosmetic sliders.
#[derive(Properties, PartialEq)]
pub struct SettingsModalProps {
    pub open: bool,
    pub sensitivity: u32,
    pub opacity: u32,
    pub on_sensitivity: Callback<InputEvent>,
    pub on_opacity: Callback<InputEvent>,
    pub on_close: Callback<MouseEvent>,
}

#[function_component(SettingsModal)]
pub fn settings_modal(props: &SettingsModalProps) -> Html {
    if !props.open {
        return html! {};
    }

    html! {
        <div class="settings-modal">
            <div class="settings-content">
                <div class="settings-header">
                    <h2>{ SETTINGS_HEADING }</h2>
                    <button class="icon-button close-settings" onclick={props.on_close.clone()}>
                        { "×" }
                    </button>
                </div>
                <div class="form-group">
                    <label for="sensitivity-slider">{ SENSITIVITY_LABEL }</label>
                    <div class="slider-with-value">
                        <input type="range"
                            id="sensitivity-slider"
                            min="0"
                            max="100"
                            value={props.sensitivity.to_string()}
                            oninput={props.on_sensitivity.clone()}
                        />
                        <span class="slider-value">{ percent_label(props.sensitivity) }</span>
                    </div>
                </div>
                <div class="form-group">
                    <label for="opacity-slider">{ OPACITY_LABEL }</label>
                    <div class="slider-with-value">
                        <input type="range"
                            id="opacity-slider"
                            min="0"
                            max="100"
                            value={props.opacity.to_string()}
                            oninput={props.on_opacity.clone()}
                        />
                        <span class="slider-value">{ percent_label(props.opacity) }</span>
                    </div>
                </div>
                <button class="btn-primary save-settings" onclick={props.on_close.clone()}>
                    { SAVE_SETTINGS_LABEL }
                </button>
            </div>
        </div>
    }
}
