pub mod cards;
pub mod config;
pub mod debounce;
pub mod highlight;
pub mod modal;
pub mod overlay;
#[cfg(target_arch = "wasm32")]
pub mod page;
pub mod progress;
pub mod reveal;
pub mod scroll_top;
#[cfg(test)]
mod test_dom;
pub mod theme;
pub mod timers;
pub mod typing;
pub mod visibility;

pub use overlay::App;
