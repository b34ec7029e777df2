use dioxus::prelude::*;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScrollTopConfig {
    pub threshold: f64,
    pub debounce_ms: u32,
    pub enter_delay_ms: u32,
    pub hide_delay_ms: u32,
}

impl Default for ScrollTopConfig {
    fn default() -> Self {
        Self {
            threshold: 300.0,
            debounce_ms: 100,
            enter_delay_ms: 100,
            hide_delay_ms: 300,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonPhase {
    Entering,
    Visible,
    Leaving,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollTopCommand {
    FinishEnter { generation: u64, delay_ms: u32 },
    FinishRemoval { generation: u64, delay_ms: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ButtonSlot {
    phase: ButtonPhase,
    generation: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollTopControl {
    config: ScrollTopConfig,
    slot: Option<ButtonSlot>,
    generation: u64,
    created: u64,
}

impl ScrollTopControl {
    pub fn new(config: ScrollTopConfig) -> Self {
        Self {
            config,
            slot: None,
            generation: 0,
            created: 0,
        }
    }

    pub fn config(&self) -> &ScrollTopConfig {
        &self.config
    }

    pub fn phase(&self) -> Option<ButtonPhase> {
        self.slot.map(|slot| slot.phase)
    }

    pub fn is_present(&self) -> bool {
        self.slot.is_some()
    }

    pub fn created(&self) -> u64 {
        self.created
    }

    fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn on_scroll(&mut self, offset: f64) -> Option<ScrollTopCommand> {
        if offset > self.config.threshold {
            match self.slot.map(|slot| slot.phase) {
                None => {
                    let generation = self.bump();
                    self.created += 1;
                    self.slot = Some(ButtonSlot {
                        phase: ButtonPhase::Entering,
                        generation,
                    });
                    Some(ScrollTopCommand::FinishEnter {
                        generation,
                        delay_ms: self.config.enter_delay_ms,
                    })
                }
                Some(ButtonPhase::Leaving) => {
                    // Reuse the button that is fading out; its pending removal
                    // becomes stale.
                    let generation = self.bump();
                    self.slot = Some(ButtonSlot {
                        phase: ButtonPhase::Visible,
                        generation,
                    });
                    None
                }
                Some(ButtonPhase::Entering | ButtonPhase::Visible) => None,
            }
        } else {
            match self.slot.map(|slot| slot.phase) {
                Some(ButtonPhase::Entering | ButtonPhase::Visible) => {
                    let generation = self.bump();
                    self.slot = Some(ButtonSlot {
                        phase: ButtonPhase::Leaving,
                        generation,
                    });
                    Some(ScrollTopCommand::FinishRemoval {
                        generation,
                        delay_ms: self.config.hide_delay_ms,
                    })
                }
                Some(ButtonPhase::Leaving) | None => None,
            }
        }
    }

    pub fn finish_enter(&mut self, generation: u64) -> bool {
        match self.slot {
            Some(slot) if slot.phase == ButtonPhase::Entering && slot.generation == generation => {
                self.slot = Some(ButtonSlot {
                    phase: ButtonPhase::Visible,
                    generation,
                });
                true
            }
            _ => false,
        }
    }

    /// Removes the button only if it is still the one this removal was
    /// scheduled for.
    pub fn finish_removal(&mut self, generation: u64) -> bool {
        match self.slot {
            Some(slot) if slot.phase == ButtonPhase::Leaving && slot.generation == generation => {
                self.slot = None;
                true
            }
            _ => false,
        }
    }

    pub fn apply(&mut self, command: ScrollTopCommand) -> bool {
        match command {
            ScrollTopCommand::FinishEnter { generation, .. } => self.finish_enter(generation),
            ScrollTopCommand::FinishRemoval { generation, .. } => self.finish_removal(generation),
        }
    }
}

impl ScrollTopCommand {
    pub fn delay_ms(&self) -> u32 {
        match self {
            ScrollTopCommand::FinishEnter { delay_ms, .. }
            | ScrollTopCommand::FinishRemoval { delay_ms, .. } => *delay_ms,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn handle_scroll(mut control: Signal<ScrollTopControl>, offset: f64) {
    let Some(command) = control.write().on_scroll(offset) else {
        return;
    };
    tracing::debug!("scroll-top: {command:?} at offset {offset}");
    crate::timers::schedule_detached(command.delay_ms(), move || {
        control.write().apply(command);
    });
}

#[cfg(target_arch = "wasm32")]
fn scroll_to_top() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let options = web_sys::ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

const BUTTON_STYLE: &str = "position: fixed; bottom: 30px; right: 30px; width: 50px; height: 50px; border-radius: 50%; border: none; background: #333; color: white; font-size: 20px; cursor: pointer; z-index: 100;";

#[component]
pub fn ScrollTopButton(control: Signal<ScrollTopControl>) -> Element {
    let (phase, transition_ms) = {
        let control = control.read();
        (control.phase(), control.config().hide_delay_ms)
    };
    let Some(phase) = phase else {
        return rsx! {};
    };
    let (opacity, offset) = match phase {
        ButtonPhase::Visible => ("1", "0"),
        ButtonPhase::Entering | ButtonPhase::Leaving => ("0", "20px"),
    };

    rsx! {
        button {
            id: "scroll-top-btn",
            r#type: "button",
            aria_label: "Scroll to top",
            style: "{BUTTON_STYLE} transition: all {transition_ms}ms ease; opacity: {opacity}; transform: translateY({offset});",
            onclick: move |_| {
                #[cfg(target_arch = "wasm32")]
                scroll_to_top();
            },
            "↑"
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn control() -> ScrollTopControl {
        ScrollTopControl::new(ScrollTopConfig::default())
    }

    #[test]
    fn shows_past_threshold_and_hides_after_transition() {
        let mut control = control();
        assert_eq!(control.on_scroll(300.0), None);
        assert!(!control.is_present());

        let enter = control.on_scroll(301.0).unwrap();
        assert_eq!(control.phase(), Some(ButtonPhase::Entering));
        assert_eq!(enter.delay_ms(), 100);
        assert!(control.apply(enter));
        assert_eq!(control.phase(), Some(ButtonPhase::Visible));

        let removal = control.on_scroll(120.0).unwrap();
        assert_eq!(removal.delay_ms(), 300);
        assert_eq!(control.phase(), Some(ButtonPhase::Leaving));
        assert!(control.apply(removal));
        assert!(!control.is_present());
    }

    #[test]
    fn reshow_during_exit_keeps_the_same_button() {
        let mut control = control();
        let enter = control.on_scroll(800.0).unwrap();
        control.apply(enter);
        let removal = control.on_scroll(0.0).unwrap();

        assert_eq!(control.on_scroll(900.0), None);
        assert_eq!(control.phase(), Some(ButtonPhase::Visible));

        assert!(!control.apply(removal));
        assert!(control.is_present());
        assert_eq!(control.created(), 1);
    }

    #[test]
    fn stale_enter_does_not_resurrect_a_leaving_button() {
        let mut control = control();
        let enter = control.on_scroll(500.0).unwrap();
        let removal = control.on_scroll(10.0).unwrap();

        assert!(!control.apply(enter));
        assert_eq!(control.phase(), Some(ButtonPhase::Leaving));
        assert!(control.apply(removal));
        assert!(!control.is_present());
    }

    #[test]
    fn repeated_hides_schedule_one_removal() {
        let mut control = control();
        control.on_scroll(500.0);
        assert!(control.on_scroll(100.0).is_some());
        assert_eq!(control.on_scroll(50.0), None);
        assert_eq!(control.on_scroll(0.0), None);
    }

    #[test]
    fn debounced_burst_creates_one_button() {
        use std::cell::RefCell;
        use std::rc::Rc;

        use crate::debounce::debounce;
        use crate::timers::manual::ManualScheduler;

        let scheduler = ManualScheduler::default();
        let shared = Rc::new(RefCell::new(control()));
        let commands = Rc::new(RefCell::new(Vec::new()));
        let (target, sink) = (shared.clone(), commands.clone());
        let on_scroll = debounce(
            move |offset: f64| {
                if let Some(command) = target.borrow_mut().on_scroll(offset) {
                    sink.borrow_mut().push(command);
                }
            },
            shared.borrow().config().debounce_ms,
            scheduler.clone(),
        );

        for offset in [100.0, 250.0, 320.0, 280.0, 640.0, 900.0] {
            on_scroll.call(offset);
            scheduler.advance(16);
        }
        assert!(!shared.borrow().is_present());

        scheduler.advance(100);
        assert_eq!(shared.borrow().phase(), Some(ButtonPhase::Entering));
        assert_eq!(shared.borrow().created(), 1);
        assert_eq!(commands.borrow().len(), 1);
    }
}

#[cfg(test)]
mod render_tests {
    use dioxus::prelude::*;

    use super::*;
    use crate::test_dom::mount;

    #[component]
    fn ButtonAfter(config: ScrollTopConfig, offsets: Vec<f64>, settle: bool) -> Element {
        let control = use_signal(move || {
            let mut control = ScrollTopControl::new(config);
            for offset in &offsets {
                if let Some(command) = control.on_scroll(*offset) {
                    if settle {
                        control.apply(command);
                    }
                }
            }
            control
        });
        rsx! {
            ScrollTopButton { control }
        }
    }

    fn render(config: ScrollTopConfig, offsets: &[f64], settle: bool) -> String {
        mount(
            ButtonAfter,
            ButtonAfterProps {
                config,
                offsets: offsets.to_vec(),
                settle,
            },
        )
        .html()
    }

    #[test]
    fn hidden_control_renders_nothing() {
        let config = ScrollTopConfig::default();
        assert!(!render(config, &[], false).contains("scroll-top-btn"));
        assert!(!render(config, &[120.0], true).contains("scroll-top-btn"));
        assert!(!render(config, &[800.0, 10.0], true).contains("scroll-top-btn"));
    }

    #[test]
    fn entering_button_starts_transparent() {
        let html = render(ScrollTopConfig::default(), &[800.0], false);
        assert!(html.contains("scroll-top-btn"), "{html}");
        assert!(html.contains("opacity: 0;"), "{html}");
        assert!(html.contains("translateY(20px)"), "{html}");
    }

    #[test]
    fn visible_button_is_opaque() {
        let html = render(ScrollTopConfig::default(), &[800.0], true);
        assert!(html.contains("opacity: 1;"), "{html}");
        assert!(html.contains("translateY(0)"), "{html}");
    }

    #[test]
    fn leaving_button_fades_before_removal() {
        let html = render(ScrollTopConfig::default(), &[800.0, 10.0], false);
        assert!(html.contains("scroll-top-btn"), "{html}");
        assert!(html.contains("opacity: 0;"), "{html}");
    }

    #[test]
    fn transition_length_follows_hide_delay() {
        let html = render(ScrollTopConfig::default(), &[800.0], true);
        assert!(html.contains("transition: all 300ms ease;"), "{html}");

        let slow = ScrollTopConfig {
            hide_delay_ms: 450,
            ..ScrollTopConfig::default()
        };
        let html = render(slow, &[800.0], true);
        assert!(html.contains("transition: all 450ms ease;"), "{html}");
    }
}
