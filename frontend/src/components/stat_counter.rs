use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{js_sys, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

const STEPS: f64 = 50.0;
const TICK_MS: u32 = 30;

/// Number and trailing decoration of a stat label like "2.500+" or "%98".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatValue {
    pub number: u64,
    pub suffix: String,
}

impl StatValue {
    /// Keeps every digit as the number and every other non-space char as the
    /// suffix. None when there are no digits.
    pub fn parse(text: &str) -> Option<Self> {
        let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
        let number = digits.parse().ok()?;
        let suffix = text
            .chars()
            .filter(|c| !c.is_ascii_digit() && !c.is_whitespace())
            .collect();
        Some(Self { number, suffix })
    }

    pub fn render(&self, current: u64) -> String {
        format!("{}{}", current, self.suffix)
    }
}

pub struct CounterAnimation {
    target: f64,
    current: f64,
    increment: f64,
}

impl CounterAnimation {
    pub fn new(target: u64) -> Self {
        Self {
            target: target as f64,
            current: 0.0,
            increment: target as f64 / STEPS,
        }
    }

    /// Advances one frame. The bool is true once the target was reached.
    pub fn tick(&mut self) -> (u64, bool) {
        self.current += self.increment;
        if self.current >= self.target {
            self.current = self.target;
            return (self.target as u64, true);
        }
        (self.current.floor() as u64, false)
    }
}

#[derive(Properties, PartialEq)]
pub struct StatCounterProps {
    pub value: AttrValue,
    pub label: AttrValue,
}

/// Counts up from zero the first time the number is half on screen.
#[function_component(StatCounter)]
pub fn stat_counter(props: &StatCounterProps) -> Html {
    let display = use_state(|| props.value.to_string());
    let number_ref = use_node_ref();

    {
        let display = display.clone();
        let number_ref = number_ref.clone();
        use_effect_with_deps(
            move |value: &AttrValue| {
                let parsed = StatValue::parse(value);
                let interval: Rc<RefCell<Option<Interval>>> = Rc::default();
                let mut observer_parts = None;

                if let (Some(stat), Some(element)) = (parsed, number_ref.cast::<Element>()) {
                    let interval = interval.clone();
                    let callback = Closure::wrap(Box::new(
                        move |entries: js_sys::Array, observer: IntersectionObserver| {
                            let visible = entries.iter().any(|entry| {
                                entry
                                    .dyn_into::<IntersectionObserverEntry>()
                                    .map(|e| e.is_intersecting())
                                    .unwrap_or(false)
                            });
                            if !visible || interval.borrow().is_some() {
                                return;
                            }
                            observer.disconnect();
                            log::debug!("animating stat to {}", stat.number);

                            let mut animation = CounterAnimation::new(stat.number);
                            let display = display.clone();
                            let stat = stat.clone();
                            let handle = interval.clone();
                            *interval.borrow_mut() = Some(Interval::new(TICK_MS, move || {
                                let (current, done) = animation.tick();
                                display.set(stat.render(current));
                                if done {
                                    // Can't drop the Interval from inside its own tick.
                                    let handle = handle.clone();
                                    spawn_local(async move {
                                        handle.borrow_mut().take();
                                    });
                                }
                            }));
                        },
                    )
                        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

                    let init = IntersectionObserverInit::new();
                    init.set_threshold(&JsValue::from_f64(0.5));
                    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
                        Ok(observer) => {
                            observer.observe(&element);
                            observer_parts = Some((observer, callback));
                        }
                        Err(e) => log::warn!("IntersectionObserver unavailable: {:?}", e),
                    }
                }

                move || {
                    if let Some((observer, _callback)) = observer_parts {
                        observer.disconnect();
                    }
                    interval.borrow_mut().take();
                }
            },
            props.value.clone(),
        );
    }

    html! {
        <div class="stat-item">
            <span ref={number_ref} class="stat-number">{(*display).clone()}</span>
            <span class="stat-label">{&props.label}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_number_and_suffix() {
        assert_eq!(
            StatValue::parse("500+"),
            Some(StatValue { number: 500, suffix: "+".into() })
        );
        assert_eq!(
            StatValue::parse("%98"),
            Some(StatValue { number: 98, suffix: "%".into() })
        );
        assert_eq!(
            StatValue::parse("2.500 +"),
            Some(StatValue { number: 2500, suffix: ".+".into() })
        );
    }

    #[test]
    fn text_without_digits_is_left_alone() {
        assert_eq!(StatValue::parse("many"), None);
        assert_eq!(StatValue::parse(""), None);
    }

    #[test]
    fn animation_reaches_target_in_fifty_steps() {
        let mut animation = CounterAnimation::new(500);
        let mut frames = Vec::new();
        loop {
            let (value, done) = animation.tick();
            frames.push(value);
            if done {
                break;
            }
        }
        assert_eq!(frames.len(), 50);
        assert_eq!(frames[0], 10);
        assert_eq!(*frames.last().unwrap(), 500);
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let mut animation = CounterAnimation::new(0);
        assert_eq!(animation.tick(), (0, true));
    }

    #[test]
    fn render_appends_suffix() {
        let stat = StatValue::parse("10K+").unwrap();
        assert_eq!(stat.number, 10);
        assert_eq!(stat.render(3), "3K+");
    }
}
