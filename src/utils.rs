//! Pure geometry and formatting helpers for the scanner UI.

/// Destination rectangle for drawing an image onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Compute the letterboxed draw rectangle for an image inside a container.
///
/// The relatively longer image dimension is scaled to fill the container
/// and the other axis is centered: an image wider than the container gets
/// vertical padding, a narrower one gets horizontal padding.
pub fn letterbox_rect(container_w: f64, container_h: f64, image_w: f64, image_h: f64) -> DrawRect {
    if container_w <= 0.0 || container_h <= 0.0 || image_w <= 0.0 || image_h <= 0.0 {
        return DrawRect {
            x: 0.0,
            y: 0.0,
            width: container_w.max(0.0),
            height: container_h.max(0.0),
        };
    }

    let container_ratio = container_w / container_h;
    let image_ratio = image_w / image_h;

    if image_ratio > container_ratio {
        let height = container_w / image_ratio;
        DrawRect {
            x: 0.0,
            y: (container_h - height) / 2.0,
            width: container_w,
            height,
        }
    } else {
        let width = container_h * image_ratio;
        DrawRect {
            x: (container_w - width) / 2.0,
            y: 0.0,
            width,
            height: container_h,
        }
    }
}

/// Derive the two HUD gradient alphas from the opacity slider percentage,
/// formatted to two decimal places.
pub fn hud_alphas(opacity_pct: u32) -> (String, String) {
    let fraction = opacity_pct as f64 / 100.0;
    (
        format!("{:.2}", fraction * 0.7),
        format!("{:.2}", fraction * 0.8),
    )
}

/// Inline style for the vertical HUD gradient overlay.
pub fn hud_gradient(opacity_pct: u32) -> String {
    let (alpha_top, alpha_bottom) = hud_alphas(opacity_pct);
    format!(
        "background: linear-gradient(180deg, rgba(0,0,0,{alpha_top}) 0%, rgba(0,0,0,0) 30%, \
         rgba(0,0,0,0) 70%, rgba(0,0,0,{alpha_bottom}) 100%)"
    )
}

/// Slider readout text, e.g. `50%`.
pub fn percent_label(value: u32) -> String {
    format!("{value}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_image_is_letterboxed_with_vertical_padding() {
        // 2:1 image in a 1:1 container.
        let rect = letterbox_rect(400.0, 400.0, 200.0, 100.0);
        assert_eq!(rect.width, 400.0);
        assert_eq!(rect.height, 200.0);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 100.0);
    }

    #[test]
    fn narrow_image_is_letterboxed_with_horizontal_padding() {
        // 1:2 image in a 1:1 container.
        let rect = letterbox_rect(400.0, 400.0, 100.0, 200.0);
        assert_eq!(rect.width, 200.0);
        assert_eq!(rect.height, 400.0);
        assert_eq!(rect.x, 100.0);
        assert_eq!(rect.y, 0.0);
    }

    #[test]
    fn matching_ratio_fills_the_container() {
        let rect = letterbox_rect(300.0, 200.0, 600.0, 400.0);
        assert_eq!(
            rect,
            DrawRect {
                x: 0.0,
                y: 0.0,
                width: 300.0,
                height: 200.0
            }
        );
    }

    #[test]
    fn degenerate_dimensions_fall_back_to_the_container() {
        let rect = letterbox_rect(300.0, 200.0, 0.0, 0.0);
        assert_eq!(rect.width, 300.0);
        assert_eq!(rect.height, 200.0);
    }

    #[test]
    fn opacity_fifty_yields_the_documented_alphas() {
        assert_eq!(hud_alphas(50), ("0.35".to_string(), "0.40".to_string()));
    }

    #[test]
    fn gradient_style_embeds_both_alphas() {
        let style = hud_gradient(100);
        assert!(style.contains("rgba(0,0,0,0.70) 0%"));
        assert!(style.contains("rgba(0,0,0,0.80) 100%"));
    }

    #[test]
    fn zero_opacity_clears_the_gradient() {
        assert_eq!(hud_alphas(0), ("0.00".to_string(), "0.00".to_string()));
    }

    #[test]
    fn percent_label_appends_the_sign() {
        assert_eq!(percent_label(65), "65%");
    }
}
