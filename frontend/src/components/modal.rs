use std::collections::BTreeSet;
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::JsValue;
use web_sys::{window, KeyboardEvent};
use yew::prelude::*;
use yew_hooks::use_event_with_window;

pub type OverlayId = String;

pub enum OverlayAction {
    Register(OverlayId),
    Unregister(OverlayId),
    Open(OverlayId),
    Close(OverlayId),
    /// Escape key: close whatever is open.
    CloseActive,
}

/// Owns which overlay is visible. At most one is, ever.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayManager {
    registered: BTreeSet<OverlayId>,
    active: Option<OverlayId>,
}

impl OverlayManager {
    pub fn is_visible(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    pub fn active(&self) -> Option<&OverlayId> {
        self.active.as_ref()
    }

    /// Page scrolling is suppressed while anything is visible.
    pub fn scroll_locked(&self) -> bool {
        self.active.is_some()
    }

    fn with_active(&self, active: Option<OverlayId>) -> Rc<Self> {
        Rc::new(Self {
            registered: self.registered.clone(),
            active,
        })
    }
}

impl Reducible for OverlayManager {
    type Action = OverlayAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            OverlayAction::Register(id) => {
                let mut registered = self.registered.clone();
                registered.insert(id);
                Rc::new(Self {
                    registered,
                    active: self.active.clone(),
                })
            }
            OverlayAction::Unregister(id) => {
                let mut registered = self.registered.clone();
                registered.remove(&id);
                let active = self.active.clone().filter(|a| *a != id);
                Rc::new(Self { registered, active })
            }
            OverlayAction::Open(id) => {
                if !self.registered.contains(&id) {
                    warn!("no overlay with id {}", id);
                    return self;
                }
                if self.active.as_ref() == Some(&id) {
                    return self;
                }
                if let Some(previous) = &self.active {
                    debug!("closing overlay {} before opening {}", previous, id);
                }
                info!("opening overlay {}", id);
                self.with_active(Some(id))
            }
            OverlayAction::Close(id) => {
                if self.active.as_ref() != Some(&id) {
                    return self;
                }
                info!("closing overlay {}", id);
                self.with_active(None)
            }
            OverlayAction::CloseActive => match &self.active {
                Some(id) => {
                    info!("closing overlay {} (escape)", id);
                    self.with_active(None)
                }
                None => self,
            },
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct Overlays {
    pub state: OverlayManager,
    dispatch: Callback<OverlayAction>,
}

impl Overlays {
    pub fn new(state: OverlayManager, dispatch: Callback<OverlayAction>) -> Self {
        Self { state, dispatch }
    }

    pub fn dispatch(&self, action: OverlayAction) {
        self.dispatch.emit(action);
    }
}

pub fn set_scroll_locked(locked: bool) {
    let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };
    let result = if locked {
        body.style().set_property("overflow", "hidden")
    } else {
        body.style().remove_property("overflow").map(|_| ())
    };
    if let Err(e) = result {
        warn!("could not toggle scroll lock: {:?}", e);
    }
}

/// Installs the Escape handler and keeps the body scroll lock in sync.
#[hook]
pub fn use_overlay_keyboard(overlays: &Overlays) {
    {
        let overlays = overlays.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                overlays.dispatch(OverlayAction::CloseActive);
            }
        });
    }

    let locked = overlays.state.scroll_locked();
    use_effect_with_deps(
        move |locked: &bool| {
            set_scroll_locked(*locked);
            || ()
        },
        locked,
    );
}

/// True only when the click landed on the backdrop itself, not on content
/// inside it. Listeners are delegated to the app root, so `current_target` is
/// never the overlay and the comparison has to go against its node.
fn is_background_click<T: PartialEq>(target: Option<T>, overlay: Option<T>) -> bool {
    matches!((target, overlay), (Some(target), Some(overlay)) if target == overlay)
}

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub id: AttrValue,
    pub title: AttrValue,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let overlays = use_context::<Overlays>();
    let overlay_ref = use_node_ref();

    {
        let overlays = overlays.clone();
        use_effect_with_deps(
            move |id: &AttrValue| {
                let id = id.to_string();
                if let Some(overlays) = &overlays {
                    overlays.dispatch(OverlayAction::Register(id.clone()));
                }
                move || {
                    if let Some(overlays) = overlays {
                        overlays.dispatch(OverlayAction::Unregister(id));
                    }
                }
            },
            props.id.clone(),
        );
    }

    let Some(overlays) = overlays else {
        warn!("modal {} rendered outside of an overlay provider", props.id);
        return html! {};
    };

    let visible = overlays.state.is_visible(&props.id);

    let on_background = {
        let overlays = overlays.clone();
        let overlay_ref = overlay_ref.clone();
        let id = props.id.to_string();
        Callback::from(move |e: MouseEvent| {
            let target = e.target().map(JsValue::from);
            let overlay = overlay_ref.get().map(JsValue::from);
            if is_background_click(target, overlay) {
                overlays.dispatch(OverlayAction::Close(id.clone()));
            }
        })
    };

    let on_close = {
        let overlays = overlays.clone();
        let id = props.id.to_string();
        Callback::from(move |_: MouseEvent| overlays.dispatch(OverlayAction::Close(id.clone())))
    };

    html! {
        <div ref={overlay_ref} id={props.id.clone()} class={classes!("modal-overlay", visible.then(|| "active"))} onclick={on_background}>
            <div class="modal-content">
                <div class="modal-header">
                    <h3>{&props.title}</h3>
                    <button type="button" class="modal-close" onclick={on_close}>{"×"}</button>
                </div>
                { for props.children.iter() }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalTriggerProps {
    pub target: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ModalTrigger)]
pub fn modal_trigger(props: &ModalTriggerProps) -> Html {
    let overlays = use_context::<Overlays>();
    let onclick = {
        let target = props.target.to_string();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            match &overlays {
                Some(overlays) => overlays.dispatch(OverlayAction::Open(target.clone())),
                None => warn!("modal trigger for {} has no overlay provider", target),
            }
        })
    };

    html! {
        <a href={format!("#{}", props.target)} class={props.class.clone()} data-modal={props.target.clone()} {onclick}>
            { for props.children.iter() }
        </a>
    }
}
