use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use web_sys::Element;
use yew::prelude::*;

const GAP_PX: f64 = 10.0;

static NEXT_TRIGGER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipPopup {
    pub text: String,
    /// Horizontal center of the trigger, viewport px.
    pub left: f64,
    /// Bottom edge of the popup, viewport px.
    pub top: f64,
}

impl TooltipPopup {
    pub fn above(text: &str, rect_left: f64, rect_top: f64, rect_width: f64) -> Self {
        Self {
            text: text.to_string(),
            left: rect_left + rect_width / 2.0,
            top: rect_top - GAP_PX,
        }
    }

    fn style(&self) -> String {
        format!(
            "position: fixed; left: {}px; top: {}px; transform: translate(-50%, -100%); pointer-events: none; z-index: 1000;",
            self.left, self.top
        )
    }
}

pub enum TooltipAction {
    Show(u64, TooltipPopup),
    Hide(u64),
}

/// Side table of open popups, keyed by trigger.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipTable {
    popups: BTreeMap<u64, TooltipPopup>,
}

impl TooltipTable {
    pub fn get(&self, trigger: u64) -> Option<&TooltipPopup> {
        self.popups.get(&trigger)
    }
}

impl Reducible for TooltipTable {
    type Action = TooltipAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut popups = self.popups.clone();
        match action {
            TooltipAction::Show(trigger, popup) => {
                popups.insert(trigger, popup);
            }
            TooltipAction::Hide(trigger) => {
                if popups.remove(&trigger).is_none() {
                    return self;
                }
            }
        }
        Rc::new(Self { popups })
    }
}

#[derive(Clone, PartialEq)]
pub struct Tooltips {
    pub table: TooltipTable,
    dispatch: Callback<TooltipAction>,
}

impl Tooltips {
    pub fn new(table: TooltipTable, dispatch: Callback<TooltipAction>) -> Self {
        Self { table, dispatch }
    }
}

#[derive(Properties, PartialEq)]
pub struct TooltipProps {
    pub text: AttrValue,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Tooltip)]
pub fn tooltip(props: &TooltipProps) -> Html {
    let tooltips = use_context::<Tooltips>();
    let trigger = *use_state(|| NEXT_TRIGGER.fetch_add(1, Ordering::Relaxed));
    let node = use_node_ref();

    {
        let tooltips = tooltips.clone();
        use_effect_with_deps(
            move |_| {
                move || {
                    if let Some(tooltips) = tooltips {
                        tooltips.dispatch.emit(TooltipAction::Hide(trigger));
                    }
                }
            },
            (),
        );
    }

    let onmouseenter = {
        let tooltips = tooltips.clone();
        let node = node.clone();
        let text = props.text.clone();
        Callback::from(move |_: MouseEvent| {
            let (Some(tooltips), Some(element)) = (&tooltips, node.cast::<Element>()) else {
                return;
            };
            let rect = element.get_bounding_client_rect();
            let popup = TooltipPopup::above(&text, rect.left(), rect.top(), rect.width());
            tooltips.dispatch.emit(TooltipAction::Show(trigger, popup));
        })
    };

    let onmouseleave = {
        let tooltips = tooltips.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(tooltips) = &tooltips {
                tooltips.dispatch.emit(TooltipAction::Hide(trigger));
            }
        })
    };

    html! {
        <span ref={node} class="has-tooltip" data-tooltip={props.text.clone()} {onmouseenter} {onmouseleave}>
            { for props.children.iter() }
        </span>
    }
}

/// Renders every open popup. Lives once at the end of the page.
#[function_component(TooltipLayer)]
pub fn tooltip_layer() -> Html {
    let tooltips = use_context::<Tooltips>();
    let Some(tooltips) = tooltips else {
        return html! {};
    };

    html! {
        <>
            { for tooltips.table.popups.iter().map(|(trigger, popup)| html! {
                <div key={trigger.to_string()} class="tooltip-popup" style={popup.style()}>
                    {&popup.text}
                </div>
            }) }
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_is_centered_above_trigger() {
        let popup = TooltipPopup::above("Visa help", 100.0, 300.0, 80.0);
        assert_eq!(popup.left, 140.0);
        assert_eq!(popup.top, 290.0);
    }

    #[test]
    fn show_and_hide_are_keyed_by_trigger() {
        let table = Rc::new(TooltipTable::default())
            .reduce(TooltipAction::Show(1, TooltipPopup::above("a", 0.0, 50.0, 10.0)))
            .reduce(TooltipAction::Show(2, TooltipPopup::above("b", 0.0, 50.0, 10.0)))
            .reduce(TooltipAction::Hide(1));

        assert!(table.get(1).is_none());
        assert_eq!(table.get(2).map(|p| p.text.as_str()), Some("b"));
        assert_eq!(table.popups.len(), 1);
    }

    #[test]
    fn hiding_unknown_trigger_is_a_no_op() {
        let table = Rc::new(TooltipTable::default());
        let after = table.clone().reduce(TooltipAction::Hide(7));
        assert!(Rc::ptr_eq(&table, &after));
        assert!(after.popups.is_empty());
    }
}
