use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarginUnit {
    #[default]
    Px,
    Percent,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MarginLength {
    pub value: f64,
    pub unit: MarginUnit,
}

impl MarginLength {
    pub fn px(value: f64) -> Self {
        Self {
            value,
            unit: MarginUnit::Px,
        }
    }

    pub fn percent(value: f64) -> Self {
        Self {
            value,
            unit: MarginUnit::Percent,
        }
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            MarginUnit::Px => write!(f, "{}px", self.value),
            MarginUnit::Percent => write!(f, "{}%", self.value),
        }
    }
}

impl FromStr for MarginLength {
    type Err = String;

    fn from_str(part: &str) -> Result<Self, Self::Err> {
        let (number, unit) = if let Some(number) = part.strip_suffix('%') {
            (number, MarginUnit::Percent)
        } else {
            (part.strip_suffix("px").unwrap_or(part), MarginUnit::Px)
        };
        let value = number
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| format!("invalid root margin component: {part}"))?;
        Ok(Self { value, unit })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct RootMargin {
    pub top: MarginLength,
    pub right: MarginLength,
    pub bottom: MarginLength,
    pub left: MarginLength,
}

impl RootMargin {
    pub fn to_css(&self) -> String {
        format!("{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for RootMargin {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts = value
            .split_whitespace()
            .map(str::parse::<MarginLength>)
            .collect::<Result<Vec<_>, _>>()?;
        let [top, right, bottom, left] = match parts.as_slice() {
            [all] => [*all; 4],
            [vertical, horizontal] => [*vertical, *horizontal, *vertical, *horizontal],
            [top, horizontal, bottom] => [*top, *horizontal, *bottom, *horizontal],
            [top, right, bottom, left] => [*top, *right, *bottom, *left],
            _ => return Err(format!("root margin needs 1-4 values, got {value:?}")),
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl TryFrom<String> for RootMargin {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TrackerOptions {
    pub threshold: f64,
    #[serde(default)]
    pub root_margin: RootMargin,
}

impl TrackerOptions {
    pub fn new(threshold: f64, root_margin: RootMargin) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            root_margin,
        }
    }

    pub fn reveal() -> Self {
        Self::new(
            0.1,
            RootMargin {
                bottom: MarginLength::px(-50.0),
                ..RootMargin::default()
            },
        )
    }

    pub fn sections() -> Self {
        Self::new(0.3, RootMargin::default())
    }

    pub fn clamped(self) -> Self {
        Self::new(self.threshold, self.root_margin)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilitySample {
    pub intersecting: bool,
    pub ratio: f64,
}

impl VisibilitySample {
    pub fn visible(ratio: f64) -> Self {
        Self {
            intersecting: true,
            ratio,
        }
    }

    pub fn hidden() -> Self {
        Self {
            intersecting: false,
            ratio: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Entered,
    Left,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityChange<K> {
    pub key: K,
    pub transition: Transition,
    pub ratio: f64,
}

#[derive(Clone, Debug)]
pub struct VisibilityTracker<K> {
    options: TrackerOptions,
    visible: HashMap<K, bool>,
}

impl<K: Clone + Eq + Hash> VisibilityTracker<K> {
    pub fn new(options: TrackerOptions) -> Self {
        Self {
            options: options.clamped(),
            visible: HashMap::new(),
        }
    }

    pub fn register(&mut self, key: K) {
        self.visible.entry(key).or_insert(false);
    }

    pub fn is_visible(&self, key: &K) -> bool {
        self.visible.get(key).copied().unwrap_or(false)
    }

    fn satisfies(&self, sample: &VisibilitySample) -> bool {
        if !sample.intersecting {
            return false;
        }
        self.options.threshold <= 0.0 || sample.ratio >= self.options.threshold
    }

    pub fn apply<I>(&mut self, batch: I) -> Vec<VisibilityChange<K>>
    where
        I: IntoIterator<Item = (K, VisibilitySample)>,
    {
        let mut changes = Vec::new();
        for (key, sample) in batch {
            let now_visible = self.satisfies(&sample);
            let Some(was_visible) = self.visible.get_mut(&key) else {
                continue;
            };
            if *was_visible == now_visible {
                continue;
            }
            *was_visible = now_visible;
            changes.push(VisibilityChange {
                key,
                transition: if now_visible {
                    Transition::Entered
                } else {
                    Transition::Left
                },
                ratio: sample.ratio,
            });
        }
        changes
    }
}

#[cfg(target_arch = "wasm32")]
pub use observer::IntersectionWatcher;

#[cfg(target_arch = "wasm32")]
mod observer {
    use std::rc::Rc;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

    use super::{TrackerOptions, VisibilitySample};

    type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

    pub struct IntersectionWatcher {
        observer: IntersectionObserver,
        _closure: Rc<ObserverCallback>,
    }

    impl IntersectionWatcher {
        pub fn observe<F>(
            options: &TrackerOptions,
            targets: &[Element],
            mut on_batch: F,
        ) -> Result<Self, String>
        where
            F: FnMut(Vec<(usize, VisibilitySample)>) + 'static,
        {
            let lookup: Vec<Element> = targets.to_vec();
            let closure = Rc::new(Closure::wrap(Box::new(
                move |entries: js_sys::Array, _observer: IntersectionObserver| {
                    let batch = entries
                        .iter()
                        .filter(|entry| !entry.is_null() && !entry.is_undefined())
                        .filter_map(|entry| {
                            let entry: IntersectionObserverEntry = entry.unchecked_into();
                            let target = entry.target();
                            let key = lookup.iter().position(|element| *element == target)?;
                            Some((
                                key,
                                VisibilitySample {
                                    intersecting: entry.is_intersecting(),
                                    ratio: entry.intersection_ratio(),
                                },
                            ))
                        })
                        .collect::<Vec<_>>();
                    if !batch.is_empty() {
                        on_batch(batch);
                    }
                },
            ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>));

            let init = IntersectionObserverInit::new();
            init.set_threshold(&JsValue::from_f64(options.threshold));
            init.set_root_margin(&options.root_margin.to_css());
            let observer = IntersectionObserver::new_with_options(
                closure.as_ref().as_ref().unchecked_ref(),
                &init,
            )
            .map_err(|err| format!("intersection observer unavailable: {err:?}"))?;
            for target in targets {
                observer.observe(target);
            }
            Ok(Self {
                observer,
                _closure: closure,
            })
        }
    }

    impl Drop for IntersectionWatcher {
        fn drop(&mut self) {
            self.observer.disconnect();
        }
    }
}
