pub const HERO_HEADING_SELECTOR: &str = ".hero h1";
pub const START_DELAY_MS: u32 = 500;
pub const CHAR_DELAY_MS: u32 = 50;
pub const CARET_LINGER_MS: u32 = 1000;
pub const CARET_STYLE: [(&str, &str); 1] = [("border-right", "2px solid #333")];
pub const CARET_CLEARED: [(&str, &str); 1] = [("border-right", "none")];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypingStep {
    Type { text: String, next_delay_ms: u32 },
    Finished { caret_delay_ms: u32 },
}

#[derive(Clone, Debug)]
pub struct TypingAnimation {
    chars: Vec<char>,
    typed: usize,
}

impl TypingAnimation {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            typed: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.typed >= self.chars.len()
    }

    pub fn step(&mut self) -> TypingStep {
        if self.is_finished() {
            return TypingStep::Finished {
                caret_delay_ms: CARET_LINGER_MS,
            };
        }
        self.typed += 1;
        TypingStep::Type {
            text: self.chars[..self.typed].iter().collect(),
            next_delay_ms: CHAR_DELAY_MS,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn start_typing(document: &web_sys::Document) {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;

    use crate::page::set_styles;

    let Some(heading) = document
        .query_selector(HERO_HEADING_SELECTOR)
        .ok()
        .flatten()
        .and_then(|heading| heading.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        tracing::debug!("typing: no hero heading, animation disabled");
        return;
    };
    let text = heading.text_content().unwrap_or_default();
    heading.set_text_content(Some(""));
    set_styles(&heading, &CARET_STYLE);

    let animation = Rc::new(RefCell::new(TypingAnimation::new(&text)));
    schedule_step(heading, animation, START_DELAY_MS);
}

#[cfg(target_arch = "wasm32")]
fn schedule_step(
    heading: web_sys::HtmlElement,
    animation: std::rc::Rc<std::cell::RefCell<TypingAnimation>>,
    delay_ms: u32,
) {
    crate::timers::schedule_detached(delay_ms, move || {
        let step = animation.borrow_mut().step();
        match step {
            TypingStep::Type {
                text,
                next_delay_ms,
            } => {
                heading.set_text_content(Some(&text));
                schedule_step(heading, animation, next_delay_ms);
            }
            TypingStep::Finished { caret_delay_ms } => {
                crate::timers::schedule_detached(caret_delay_ms, move || {
                    crate::page::set_styles(&heading, &CARET_CLEARED);
                });
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn types_prefixes_then_finishes() {
        let mut animation = TypingAnimation::new("Hé!");
        let mut typed = Vec::new();
        loop {
            match animation.step() {
                TypingStep::Type {
                    text,
                    next_delay_ms,
                } => {
                    assert_eq!(next_delay_ms, CHAR_DELAY_MS);
                    typed.push(text);
                }
                TypingStep::Finished { caret_delay_ms } => {
                    assert_eq!(caret_delay_ms, CARET_LINGER_MS);
                    break;
                }
            }
        }
        assert_eq!(typed, vec!["H", "Hé", "Hé!"]);
        assert!(animation.is_finished());
    }

    #[test]
    fn empty_heading_finishes_immediately() {
        let mut animation = TypingAnimation::new("");
        assert_eq!(
            animation.step(),
            TypingStep::Finished {
                caret_delay_ms: CARET_LINGER_MS
            }
        );
    }
}
