//! Back-to-top widget with FSM-driven visibility
//!
//! The BackToTop widget provides:
//! - A button appended to a scrollable container, shown once the container
//!   is scrolled past a threshold
//! - Visibility states hidden/visible driven by scroll notifications
//! - Themes and show/hide effects applied as CSS class bundles
//! - Instant or animated scroll back to the top on click
//!
//! A page-level widget (container = body) observes and scrolls the viewport
//! and is positioned `fixed`; a widget inside a panel observes and scrolls
//! that panel and stays `sticky` in its flow.

use std::cell::RefCell;
use std::rc::Rc;

use backtop_animation::ScrollTween;
use backtop_core::events::{event_types, EventTarget};
use backtop_core::fsm::{SignalId, StateId, StateMachine};
use backtop_core::{Document, NodeId, ScrollTarget};

use crate::classes::{self, EffectClasses};
use crate::config::{BackToTopConfig, Container};
use crate::context::{Host, WidgetContext};
use crate::error::{Result, WidgetError};
use crate::widget::WidgetId;

/// Visibility states
pub mod states {
    use super::StateId;

    pub const HIDDEN: StateId = 0;
    pub const VISIBLE: StateId = 1;
}

/// Signals driving the visibility FSM
pub mod signals {
    use super::SignalId;

    pub const SHOW: SignalId = 1;
    pub const HIDE: SignalId = 2;
}

/// Prefix of generated element ids
const ID_PREFIX: &str = "back-to-top";

/// How the button is positioned relative to its container
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Positioning {
    /// Pinned to the viewport
    Fixed,
    /// Flows with the container's content
    Sticky,
}

impl Positioning {
    pub fn as_css(&self) -> &'static str {
        match self {
            Positioning::Fixed => "fixed",
            Positioning::Sticky => "sticky",
        }
    }
}

/// Widget state shared between the handle and its event handlers
struct BackToTopState {
    id: WidgetId,
    config: Rc<BackToTopConfig>,
    element: Option<NodeId>,
    container: Option<NodeId>,
    scroll_target: ScrollTarget,
    positioning: Positioning,
    fsm: StateMachine,
    enabled: bool,
    theme_class: Option<String>,
    effect: EffectClasses,
}

fn visibility_fsm() -> StateMachine {
    StateMachine::builder(states::HIDDEN)
        .on(states::HIDDEN, signals::SHOW, states::VISIBLE)
        .on(states::VISIBLE, signals::HIDE, states::HIDDEN)
        .build()
}

impl BackToTopState {
    fn opened(&self) -> bool {
        self.fsm.is_in(states::VISIBLE)
    }

    /// The button element, if it is still in the document. Removing the
    /// container without `dispose` takes the element with it.
    fn live_element(&self, doc: &Document) -> Option<NodeId> {
        self.element.filter(|&element| doc.contains(element))
    }

    /// Geometry, colors and positioning as inline styles
    fn apply_style(&self, doc: &mut Document) {
        let Some(element) = self.live_element(doc) else {
            return;
        };
        let config = &self.config;

        doc.set_style(element, "position", self.positioning.as_css());
        doc.set_style(element, "width", format!("{}px", config.width));
        doc.set_style(element, "height", format!("{}px", config.height));
        doc.set_style(element, "bottom", format!("{}px", config.bottom));
        doc.set_style(element, config.float.as_css(), format!("{}px", config.right));
        if self.positioning == Positioning::Sticky {
            doc.set_style(element, "float", config.float.as_css());
        }
        doc.set_style(element, "z-index", config.z_index.to_string());
        doc.set_style(element, "color", config.color.as_str());
        doc.set_style(element, "background-color", config.background_color.as_str());
    }

    fn change_theme(&mut self, doc: &mut Document, theme: &str) {
        let Some(element) = self.live_element(doc) else {
            return;
        };

        if let Some(previous) = self.theme_class.take() {
            doc.remove_class(element, &previous);
        }
        let class = classes::theme_class(theme);
        doc.add_class(element, &class);
        tracing::debug!(widget = %self.id, class = %class, "theme applied");
        self.theme_class = Some(class);

        self.apply_style(doc);
    }

    fn change_effect(&mut self, doc: &mut Document, effect: &str) {
        let Some(element) = self.live_element(doc) else {
            return;
        };

        doc.remove_class(element, &self.effect.all());
        self.effect = EffectClasses::for_effect(effect);

        // Keep the current visibility without replaying a transition
        let status = if self.opened() {
            classes::STATUS_ON
        } else {
            classes::STATUS_OFF
        };
        doc.add_class(element, status);
        tracing::debug!(widget = %self.id, effect, "effect applied");
    }

    fn show(&mut self, doc: &mut Document, disable_effect: bool) {
        let Some(element) = self.live_element(doc) else {
            return;
        };

        doc.remove_class(element, &self.effect.off);
        if disable_effect {
            doc.add_class(element, classes::STATUS_ON);
        } else {
            doc.add_class(element, &self.effect.on);
        }
        self.fsm.send(signals::SHOW);
        tracing::debug!(widget = %self.id, disable_effect, "shown");
    }

    fn hide(&mut self, doc: &mut Document, disable_effect: bool) {
        let Some(element) = self.live_element(doc) else {
            return;
        };

        doc.remove_class(element, &self.effect.on);
        if disable_effect {
            doc.add_class(element, classes::STATUS_OFF);
        } else {
            doc.add_class(element, &self.effect.off);
        }
        self.fsm.send(signals::HIDE);
        tracing::debug!(widget = %self.id, disable_effect, "hidden");
    }

    fn toggle(&mut self, doc: &mut Document, disable_effect: bool) {
        if self.opened() {
            self.hide(doc, disable_effect);
        } else {
            self.show(doc, disable_effect);
        }
    }

    fn enable(&mut self, doc: &mut Document, status: bool, disable_effect: bool) {
        self.enabled = status;
        if !status && self.opened() {
            self.hide(doc, disable_effect);
        }
    }

    /// Scroll notification from the observed target
    fn on_scroll(&mut self, doc: &mut Document) {
        if !self.enabled || self.live_element(doc).is_none() {
            return;
        }

        let offset = doc.scroll_top(self.scroll_target);
        tracing::trace!(widget = %self.id, offset, "scroll");
        if offset > self.config.px_to_trigger {
            if !self.opened() {
                self.show(doc, false);
            }
        } else if self.opened() {
            self.hide(doc, false);
        }
    }

    /// Default press action
    fn scroll_to_top(&self, host: &mut Host) {
        if self.live_element(&host.document).is_none() {
            return;
        }

        let target = self.scroll_target;
        if self.config.scroll_animation == 0 {
            host.animations.cancel(&target);
            host.scroll_to(target, 0.0);
        } else {
            let from = host.document.scroll_top(target);
            let tween = ScrollTween::new(from, 0.0, self.config.scroll_animation)
                .with_easing(self.config.easing);
            host.animations.animate(target, tween);
        }
    }
}

/// Back-to-top widget handle
///
/// Cloning the handle shares the same widget. A handle returned for a
/// container that already hosts a widget is detached: every operation on
/// it is a no-op.
#[derive(Clone)]
pub struct BackToTop {
    state: Rc<RefCell<BackToTopState>>,
}

impl BackToTop {
    /// Create the widget inside its configured container
    pub fn new(ctx: &mut WidgetContext, config: BackToTopConfig) -> Result<Self> {
        let container = resolve_container(ctx.document(), &config.container)?;
        let (scroll_target, positioning) = if container == ctx.document().body() {
            (ScrollTarget::Viewport, Positioning::Fixed)
        } else {
            (ScrollTarget::Element(container), Positioning::Sticky)
        };

        let config = Rc::new(config);
        let id = unique_id(ctx.document());
        let mut state = BackToTopState {
            id: id.clone(),
            config: Rc::clone(&config),
            element: None,
            container: None,
            scroll_target,
            positioning,
            fsm: visibility_fsm(),
            enabled: config.enabled,
            theme_class: None,
            effect: EffectClasses::default(),
        };

        if !ctx.registry_mut().claim(container, id.clone()) {
            if let Some(existing) = ctx.registry().widget_for(container) {
                tracing::debug!(%existing, "container already hosts a back-to-top widget");
            }
            return Ok(Self::from_state(state));
        }

        let element = match build_element(ctx.document_mut(), &id, &config.icon, container) {
            Ok(element) => element,
            Err(err) => {
                ctx.registry_mut().release(container, &id);
                return Err(err);
            }
        };

        let doc = ctx.document_mut();
        state.element = Some(element);
        state.container = Some(container);
        state.change_theme(doc, &config.theme);
        state.change_effect(doc, &config.effect);

        let widget = Self::from_state(state);
        widget.bind(ctx, element, scroll_target);
        tracing::debug!(widget = %id, ?scroll_target, ?positioning, "back-to-top attached");

        if config.auto_open {
            widget.show(ctx, true);
        }
        Ok(widget)
    }

    fn from_state(state: BackToTopState) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Register the scroll and click handlers under the widget's namespace
    fn bind(&self, ctx: &mut WidgetContext, element: NodeId, scroll_target: ScrollTarget) {
        let namespace = self.state.borrow().id.namespace();

        let state = Rc::clone(&self.state);
        ctx.events_mut().register(
            EventTarget::from(scroll_target),
            event_types::SCROLL,
            namespace.clone(),
            move |host, _| state.borrow_mut().on_scroll(&mut host.document),
        );

        let state = Rc::clone(&self.state);
        ctx.events_mut().register(
            EventTarget::Node(element),
            event_types::CLICK,
            namespace,
            move |host, event| {
                event.prevent_default();
                let (action, target) = {
                    let state = state.borrow();
                    (state.config.on_click.clone(), state.scroll_target)
                };
                match action {
                    Some(action) => action.call(host, target),
                    None => state.borrow().scroll_to_top(host),
                }
            },
        );
    }

    /// Swap the theme class and re-apply styling
    pub fn change_theme(&self, ctx: &mut WidgetContext, theme: &str) {
        self.state
            .borrow_mut()
            .change_theme(ctx.document_mut(), theme);
    }

    /// Swap the effect classes used by later show/hide calls
    pub fn change_effect(&self, ctx: &mut WidgetContext, effect: &str) {
        self.state
            .borrow_mut()
            .change_effect(ctx.document_mut(), effect);
    }

    pub fn show(&self, ctx: &mut WidgetContext, disable_effect: bool) {
        self.state.borrow_mut().show(ctx.document_mut(), disable_effect);
    }

    pub fn hide(&self, ctx: &mut WidgetContext, disable_effect: bool) {
        self.state.borrow_mut().hide(ctx.document_mut(), disable_effect);
    }

    pub fn toggle(&self, ctx: &mut WidgetContext, disable_effect: bool) {
        self.state
            .borrow_mut()
            .toggle(ctx.document_mut(), disable_effect);
    }

    /// Turn scroll tracking on or off. Disabling while shown hides the button;
    /// enabling waits for the next scroll notification.
    pub fn enable(&self, ctx: &mut WidgetContext, status: bool, disable_effect: bool) {
        self.state
            .borrow_mut()
            .enable(ctx.document_mut(), status, disable_effect);
    }

    /// Run the default press action without a click
    pub fn scroll_to_top(&self, ctx: &mut WidgetContext) {
        self.state.borrow().scroll_to_top(ctx.host_mut());
        ctx.flush();
    }

    /// Unbind handlers, stop any scroll animation, remove the element and
    /// free the container. Safe to call more than once.
    pub fn dispose(&self, ctx: &mut WidgetContext) {
        let mut state = self.state.borrow_mut();
        let Some(element) = state.element.take() else {
            return;
        };

        let removed = ctx.events_mut().unregister_namespace(&state.id.namespace());
        ctx.host_mut().animations.cancel(&state.scroll_target);
        ctx.document_mut().remove(element);
        if let Some(container) = state.container.take() {
            ctx.registry_mut().release(container, &state.id);
        }

        state.fsm.reset();
        state.theme_class = None;
        state.effect = EffectClasses::default();
        tracing::debug!(widget = %state.id, handlers = removed, "back-to-top disposed");
    }

    pub fn id(&self) -> WidgetId {
        self.state.borrow().id.clone()
    }

    /// The button element, `None` when detached or disposed
    pub fn element(&self) -> Option<NodeId> {
        self.state.borrow().element
    }

    pub fn is_attached(&self) -> bool {
        self.state.borrow().element.is_some()
    }

    pub fn is_opened(&self) -> bool {
        self.state.borrow().opened()
    }

    pub fn is_enabled(&self) -> bool {
        self.state.borrow().enabled
    }

    /// What the widget observes and scrolls
    pub fn scroll_target(&self) -> ScrollTarget {
        self.state.borrow().scroll_target
    }

    pub fn positioning(&self) -> Positioning {
        self.state.borrow().positioning
    }

    pub fn theme_class(&self) -> Option<String> {
        self.state.borrow().theme_class.clone()
    }

    pub fn effect_classes(&self) -> EffectClasses {
        self.state.borrow().effect.clone()
    }

    pub fn config(&self) -> Rc<BackToTopConfig> {
        Rc::clone(&self.state.borrow().config)
    }
}

fn resolve_container(doc: &Document, container: &Container) -> Result<NodeId> {
    match container {
        Container::Body => Ok(doc.body()),
        Container::Element(id) => doc
            .get_element_by_id(id)
            .ok_or_else(|| WidgetError::ContainerNotFound(id.clone())),
        Container::Node(node) if doc.is_attached(*node) => Ok(*node),
        Container::Node(node) => Err(WidgetError::ContainerDetached(*node)),
    }
}

/// The button element with its icon, appended as the container's last child
fn build_element(
    doc: &mut Document,
    id: &WidgetId,
    icon_classes: &str,
    container: NodeId,
) -> Result<NodeId> {
    let element = doc.create_element("div");
    doc.set_id(element, id.as_str());
    doc.add_class(element, classes::CLASS_PREFIX);
    let icon = doc.create_element("i");
    doc.add_class(icon, icon_classes);

    let attached = doc
        .append_child(element, icon)
        .and_then(|()| doc.append_child(container, element));
    if let Err(err) = attached {
        doc.remove(icon);
        doc.remove(element);
        return Err(err.into());
    }
    Ok(element)
}

/// A random id no attached element uses yet
fn unique_id(doc: &Document) -> WidgetId {
    loop {
        let id = WidgetId::random(ID_PREFIX);
        if doc.get_element_by_id(id.as_str()).is_none() {
            return id;
        }
    }
}
