use dioxus::prelude::*;

pub fn scroll_progress_percent(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 || !scrollable.is_finite() {
        return 0.0;
    }
    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

#[cfg(target_arch = "wasm32")]
pub fn current_progress(window: &web_sys::Window) -> f64 {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let scroll_height = window
        .document()
        .and_then(|document| document.document_element())
        .map(|root| f64::from(root.scroll_height()))
        .unwrap_or(0.0);
    scroll_progress_percent(scroll_y, scroll_height, viewport)
}

const BAR_STYLE: &str = "position: fixed; top: 0; left: 0; height: 3px; background: linear-gradient(90deg, #667eea, #764ba2); z-index: 1000; transition: width 0.1s ease;";

#[component]
pub fn ScrollProgressBar(percent: Signal<f64>) -> Element {
    rsx! {
        div {
            class: "scroll-progress",
            style: "{BAR_STYLE} width: {percent()}%;",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn progress_is_clamped() {
        assert_eq!(scroll_progress_percent(0.0, 2000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress_percent(500.0, 2000.0, 1000.0), 50.0);
        assert_eq!(scroll_progress_percent(1500.0, 2000.0, 1000.0), 100.0);
        assert_eq!(scroll_progress_percent(-20.0, 2000.0, 1000.0), 0.0);
    }

    #[test]
    fn unscrollable_page_reports_zero() {
        assert_eq!(scroll_progress_percent(0.0, 800.0, 1000.0), 0.0);
        assert_eq!(scroll_progress_percent(10.0, 1000.0, 1000.0), 0.0);
    }
}
