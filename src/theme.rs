use dioxus::prelude::*;

pub const DARK_THEME_CLASS: &str = "dark-theme";

const DARK_THEME_CSS: &str = r#"
.dark-theme {
    background-color: #1a1a1a !important;
    color: #e0e0e0 !important;
}
.dark-theme .project-card {
    background: #2a2a2a !important;
    color: #e0e0e0 !important;
}
.dark-theme .hero h1,
.dark-theme .section-title,
.dark-theme .project-title {
    color: #e0e0e0 !important;
}
.dark-theme nav a {
    color: #b0b0b0 !important;
}
.dark-theme nav a:hover {
    color: #e0e0e0 !important;
}
"#;

const TOGGLE_STYLE: &str = "position: fixed; top: 20px; right: 20px; width: 50px; height: 50px; border-radius: 50%; border: none; background: #333; color: white; font-size: 20px; cursor: pointer; transition: all 0.3s ease; z-index: 100;";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn apply_body_class(theme: Theme) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };
    let _ = body
        .class_list()
        .toggle_with_force(DARK_THEME_CLASS, theme == Theme::Dark);
}

#[component]
pub fn ThemeToggle() -> Element {
    let mut theme = use_signal(Theme::default);

    rsx! {
        style { {DARK_THEME_CSS} }
        button {
            r#type: "button",
            class: "theme-toggle",
            aria_label: "Toggle dark theme",
            style: TOGGLE_STYLE,
            onclick: move |_| {
                let next = theme().toggled();
                theme.set(next);
                tracing::debug!("theme: switched to {next:?}");
                #[cfg(target_arch = "wasm32")]
                apply_body_class(next);
            },
            "{theme().icon()}"
        }
    }
}
