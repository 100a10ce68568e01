//! Session replay

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use backtop_widgets::{BackToTop, BackToTopConfig, Container, WidgetContext};

/// Frames stepped before an animation is considered stuck
const MAX_FRAMES: u32 = 100_000;

/// A scripted session
pub struct Session {
    pub config: Option<PathBuf>,
    pub panel: Option<String>,
    pub offsets: Vec<f64>,
    pub click: bool,
    pub frame_ms: u32,
}

pub fn run(session: Session) -> Result<()> {
    let mut ctx = WidgetContext::new();
    let widget = attach(&mut ctx, &session)?;

    report(&ctx, &widget, "attached");
    replay(&mut ctx, &widget, &session, |ctx, widget, label| {
        report(ctx, widget, label)
    })
}

/// Build the document and attach the widget described by the session
fn attach(ctx: &mut WidgetContext, session: &Session) -> Result<BackToTop> {
    let mut config = match &session.config {
        Some(path) => BackToTopConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => BackToTopConfig::default(),
    };
    if let Some(panel) = &session.panel {
        config = config.in_element(panel.clone());
    }

    ensure_container(ctx, &config.container)?;
    let widget = BackToTop::new(ctx, config).context("failed to attach back-to-top widget")?;
    if !widget.is_attached() {
        bail!("back-to-top widget was not attached");
    }
    Ok(widget)
}

/// Replay scrolls, then the optional click and its animation
fn replay<F>(ctx: &mut WidgetContext, widget: &BackToTop, session: &Session, mut step: F) -> Result<()>
where
    F: FnMut(&WidgetContext, &BackToTop, &str),
{
    let target = widget.scroll_target();
    for offset in &session.offsets {
        ctx.scroll_to(target, *offset);
        step(ctx, widget, &format!("scroll {offset}"));
    }

    if !session.click {
        return Ok(());
    }
    let Some(element) = widget.element() else {
        bail!("back-to-top widget has no element to click");
    };

    let event = ctx.click(element);
    tracing::debug!(default_prevented = event.default_prevented, "click dispatched");
    step(ctx, widget, "click");

    let start = ctx.now_ms();
    let mut frames = 0;
    while ctx.is_animating() {
        if frames == MAX_FRAMES {
            bail!("scroll animation did not finish after {MAX_FRAMES} frames");
        }
        ctx.advance(session.frame_ms.max(1));
        frames += 1;
    }
    if frames > 0 {
        step(ctx, widget, &format!("+{}ms", ctx.now_ms() - start));
    }
    Ok(())
}

/// Create the panel a config refers to when the document lacks it
fn ensure_container(ctx: &mut WidgetContext, container: &Container) -> Result<()> {
    let Container::Element(id) = container else {
        return Ok(());
    };
    if ctx.document().get_element_by_id(id).is_some() {
        return Ok(());
    }

    let doc = ctx.document_mut();
    let panel = doc.create_element("div");
    doc.set_id(panel, id.as_str());
    doc.append_child(doc.body(), panel)?;
    tracing::info!(panel = %id, "created scrollable panel");
    Ok(())
}

fn report(ctx: &WidgetContext, widget: &BackToTop, label: &str) {
    let offset = ctx.document().scroll_top(widget.scroll_target());
    let state = if widget.is_opened() { "visible" } else { "hidden" };
    let classes = widget
        .element()
        .map(|element| ctx.document().class_name(element))
        .unwrap_or_default();

    println!("{label:<14} offset={offset:>8.1}  {state:<7}  {classes}");
}

pub fn default_config_toml() -> Result<String> {
    Ok(BackToTopConfig::default().to_toml_string()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(panel: Option<&str>, offsets: &[f64], click: bool) -> Session {
        Session {
            config: None,
            panel: panel.map(str::to_string),
            offsets: offsets.to_vec(),
            click,
            frame_ms: 16,
        }
    }

    fn replay_states(session: &Session) -> Vec<(String, bool)> {
        let mut ctx = WidgetContext::new();
        let widget = attach(&mut ctx, session).unwrap();
        let mut steps = Vec::new();
        replay(&mut ctx, &widget, session, |_, widget, label| {
            steps.push((label.to_string(), widget.is_opened()))
        })
        .unwrap();
        steps
    }

    #[test]
    fn test_replay_page_session() {
        let steps = replay_states(&session(None, &[599.0, 601.0, 500.0], false));
        assert_eq!(
            steps,
            vec![
                ("scroll 599".to_string(), false),
                ("scroll 601".to_string(), true),
                ("scroll 500".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_replay_click_in_panel() {
        let steps = replay_states(&session(Some("side"), &[900.0], true));
        assert_eq!(steps.last(), Some(&("click".to_string(), false)));
    }

    #[test]
    fn test_panel_is_created() {
        let mut ctx = WidgetContext::new();
        let widget = attach(&mut ctx, &session(Some("side"), &[], false)).unwrap();
        let panel = ctx.document().get_element_by_id("side").unwrap();
        assert_eq!(ctx.document().parent(widget.element().unwrap()), Some(panel));
    }

    #[test]
    fn test_defaults_toml() {
        let text = default_config_toml().unwrap();
        assert!(text.contains("px_to_trigger = 600.0"));
        assert!(text.contains("container = \"body\""));
    }
}
