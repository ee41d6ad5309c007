//! Welcome modal and the step-by-step dashboard tutorial.
//!
//! Both are one-shot: a localStorage flag marks them seen and later
//! visits skip them. `reset_onboarding` clears the flags.

use cumbre_core::onboarding::{
    SlideDirection, TUTORIAL_SEEN_KEY, TUTORIAL_STEPS, WELCOME_SEEN_KEY, is_last_step, step_after,
    step_before, swipe_direction,
};
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::future::TimeoutFuture;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom;

fn flag_set(key: &str) -> bool {
    LocalStorage::get::<String>(key).is_ok()
}

fn set_flag(key: &str) {
    let _ = LocalStorage::set(key, "1");
}

/// Clear both seen-flags so the welcome and tutorial show again.
/// Exported to the host page for manual testing.
#[wasm_bindgen(js_name = resetOnboarding)]
pub fn reset_onboarding() {
    LocalStorage::delete(WELCOME_SEEN_KEY);
    LocalStorage::delete(TUTORIAL_SEEN_KEY);
}

fn viewport_width() -> u32 {
    dom::window()
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as u32
}

// ── Welcome modal (login screen) ──

pub fn maybe_show_welcome() {
    if flag_set(WELCOME_SEEN_KEY) {
        return;
    }

    let backdrop = dom::create_element("div");
    backdrop.set_id("welcome-backdrop");
    let _ = backdrop.set_attribute(
        "style",
        "position: fixed; inset: 0; z-index: 50; \
         background: rgba(30, 49, 53, 0.8); \
         backdrop-filter: blur(6px); \
         -webkit-backdrop-filter: blur(6px); \
         display: flex; align-items: center; justify-content: center; \
         padding: 1rem; \
         animation: fadeIn 0.35s ease both;",
    );

    let card = dom::create_element("div");
    let _ = card.set_attribute(
        "style",
        "background: var(--bg-card); \
         border: 1px solid rgba(115, 213, 226, 0.18); \
         border-radius: 20px; \
         padding: 2rem 1.5rem; \
         max-width: 400px; \
         width: 100%; \
         box-shadow: 0 8px 40px rgba(0,0,0,0.4); \
         animation: scaleIn 0.38s cubic-bezier(0.34, 1.3, 0.64, 1) both; \
         text-align: center;",
    );

    let features: String = [
        ("add_circle", "Crea metas con nombre, detalles y fecha limite"),
        ("check_circle", "Marca tus metas cuando las completes"),
        ("edit", "Edita o elimina tus metas cuando quieras"),
        ("insights", "Ve tu progreso con un resumen visual"),
    ]
    .iter()
    .map(|(icon, text)| {
        format!(
            r#"
        <div style="display: flex; align-items: center; gap: 0.75rem;">
          <span class="material-icons-round" style="font-size: 1.1rem; color: var(--accent); flex-shrink: 0">{icon}</span>
          <span style="font-family: Nunito, sans-serif; font-weight: 600; font-size: 0.85rem; color: var(--text-muted)">{text}</span>
        </div>
        "#,
        )
    })
    .collect();

    card.set_inner_html(&format!(
        r#"
    <div style="
      width: 72px; height: 72px; border-radius: 20px; margin: 0 auto 1.25rem;
      background: linear-gradient(135deg, rgba(115,213,226,0.2), rgba(115,213,226,0.05));
      border: 1.5px solid rgba(115,213,226,0.3);
      display: flex; align-items: center; justify-content: center;
    ">
      <span class="material-icons-round" style="font-size: 2.2rem; color: var(--accent)">flag</span>
    </div>

    <h2 style="
      font-family: Nunito, sans-serif; font-weight: 900; font-size: 1.6rem;
      color: var(--text); letter-spacing: -0.03em; margin: 0 0 0.3rem;
    ">Bienvenido a Cumbre</h2>

    <p style="
      font-family: Nunito, sans-serif; font-weight: 600; font-size: 0.9rem;
      color: var(--accent); margin: 0 0 1.25rem; letter-spacing: 0.02em;
    ">Tu espacio para alcanzar lo que te propones</p>

    <p style="
      font-family: Nunito, sans-serif; font-weight: 500; font-size: 0.92rem;
      color: var(--text-muted); line-height: 1.65; margin: 0 0 1.5rem;
    ">
      Cumbre es una app para que organices y le des seguimiento a tus metas personales.
      Crea metas, ponles fecha limite y marcalas cuando las logres.
      Simple, claro y enfocado en ti.
    </p>

    <div style="
      display: flex; flex-direction: column; gap: 0.6rem;
      margin-bottom: 1.75rem; text-align: left;
    ">{features}</div>

    <button id="welcome-close-btn" style="
      width: 100%; background: var(--accent); color: var(--bg-dark);
      font-family: Nunito, sans-serif; font-weight: 800; font-size: 0.95rem;
      padding: 0.8rem 1.5rem; border: none; border-radius: 12px; cursor: pointer;
      transition: background 0.2s ease, transform 0.15s ease;
      min-height: 48px;
    ">
      Entendido, vamos
    </button>
    "#,
    ));

    backdrop.append_child(&card).unwrap();
    dom::body().append_child(&backdrop).unwrap();

    // Marked seen on display, not on dismissal: a reload mid-modal
    // still counts as a visit.
    set_flag(WELCOME_SEEN_KEY);

    let close = {
        let backdrop = backdrop.clone();
        Rc::new(move || {
            dom::set_style(&backdrop, "animation", "fadeIn 0.25s ease reverse both");
            let backdrop = backdrop.clone();
            spawn_local(async move {
                TimeoutFuture::new(260).await;
                backdrop.remove();
            });
        })
    };

    if let Some(btn) = dom::query_within(&card, "#welcome-close-btn") {
        let close = close.clone();
        dom::listen(&btn, "click", move |_| close());
    }
    {
        let backdrop2 = backdrop.clone();
        dom::listen(&backdrop, "click", move |e| {
            if let Some(target) = e.target() {
                let target: wasm_bindgen::JsValue = target.into();
                if &target == AsRef::<wasm_bindgen::JsValue>::as_ref(&backdrop2) {
                    close();
                }
            }
        });
    }
}

// ── Dashboard tutorial ──

pub fn maybe_show_tutorial() {
    if flag_set(TUTORIAL_SEEN_KEY) {
        return;
    }

    let overlay = dom::create_element("div");
    overlay.set_id("tutorial-overlay");
    let _ = overlay.set_attribute(
        "style",
        "position: fixed; inset: 0; z-index: 60; \
         background: var(--bg-dark); \
         display: flex; flex-direction: column; \
         animation: fadeIn 0.35s ease both; \
         overflow: hidden;",
    );

    overlay.set_inner_html(
        r#"
    <div id="tutorial-header" style="
      display: flex; align-items: center; justify-content: space-between;
      padding: 1rem 1.25rem 0.5rem;
      flex-shrink: 0;
    ">
      <div id="tutorial-dots" style="display: flex; gap: 6px; align-items: center;"></div>

      <button id="tutorial-skip" style="
        font-family: Nunito, sans-serif; font-weight: 700; font-size: 0.82rem;
        color: var(--text-muted); background: transparent; border: none;
        cursor: pointer; padding: 0.4rem 0.5rem; border-radius: 8px;
        transition: color 0.2s ease;
        min-height: 44px; touch-action: manipulation;
      ">Saltar</button>
    </div>

    <div id="tutorial-body" style="
      flex: 1; display: flex; flex-direction: column;
      align-items: center; justify-content: flex-start;
      padding: 0.5rem 1.25rem; overflow-y: auto;
    "></div>

    <div id="tutorial-footer" style="
      display: flex; align-items: center; justify-content: space-between;
      padding: 1rem 1.25rem;
      padding-bottom: calc(1rem + env(safe-area-inset-bottom, 0px));
      flex-shrink: 0;
      border-top: 1px solid rgba(115, 213, 226, 0.08);
      gap: 0.75rem;
    ">
      <button id="tutorial-prev" style="
        font-family: Nunito, sans-serif; font-weight: 700; font-size: 0.9rem;
        color: var(--text-muted); background: transparent;
        border: 1.5px solid rgba(115, 213, 226, 0.2); border-radius: 10px;
        cursor: pointer; padding: 0.7rem 1.2rem; min-height: 48px;
        transition: border-color 0.2s, color 0.2s;
        touch-action: manipulation; min-width: 90px;
      ">Anterior</button>

      <button id="tutorial-next" style="
        font-family: Nunito, sans-serif; font-weight: 800; font-size: 0.95rem;
        color: var(--bg-dark); background: var(--accent);
        border: none; border-radius: 10px;
        cursor: pointer; padding: 0.7rem 1.5rem; min-height: 48px;
        transition: background 0.2s, transform 0.15s;
        touch-action: manipulation; flex: 1;
      ">Siguiente</button>
    </div>
    "#,
    );
    dom::body().append_child(&overlay).unwrap();

    let current = Rc::new(Cell::new(0usize));

    let finish = {
        let overlay = overlay.clone();
        Rc::new(move || {
            set_flag(TUTORIAL_SEEN_KEY);
            dom::set_style(&overlay, "transition", "opacity 0.35s ease");
            dom::set_style(&overlay, "opacity", "0");
            let overlay = overlay.clone();
            spawn_local(async move {
                TimeoutFuture::new(360).await;
                overlay.remove();
            });
        })
    };

    if let Some(skip) = dom::query_within(&overlay, "#tutorial-skip") {
        let finish = finish.clone();
        dom::listen(&skip, "click", move |_| finish());
    }

    {
        let overlay2 = overlay.clone();
        let current = current.clone();
        let finish = finish.clone();
        if let Some(next) = dom::query_within(&overlay, "#tutorial-next") {
            dom::listen(&next, "click", move |_| {
                match step_after(current.get()) {
                    Some(i) => {
                        current.set(i);
                        render_step(&overlay2, i, SlideDirection::Forward);
                    }
                    None => finish(),
                }
            });
        }
    }

    {
        let overlay2 = overlay.clone();
        let current = current.clone();
        if let Some(prev) = dom::query_within(&overlay, "#tutorial-prev") {
            dom::listen(&prev, "click", move |_| {
                if let Some(i) = step_before(current.get()) {
                    current.set(i);
                    render_step(&overlay2, i, SlideDirection::Back);
                }
            });
        }
    }

    // Touch swipe: left advances, right goes back.
    let touch_start_x = Rc::new(Cell::new(0.0f64));
    {
        let touch_start_x = touch_start_x.clone();
        dom::listen(&overlay, "touchstart", move |e| {
            let te: web_sys::TouchEvent = e.unchecked_into();
            if let Some(touch) = te.changed_touches().get(0) {
                touch_start_x.set(touch.client_x() as f64);
            }
        });
    }
    {
        let overlay2 = overlay.clone();
        let current = current.clone();
        dom::listen(&overlay, "touchend", move |e| {
            let te: web_sys::TouchEvent = e.unchecked_into();
            let Some(touch) = te.changed_touches().get(0) else {
                return;
            };
            let delta = touch_start_x.get() - touch.client_x() as f64;
            match swipe_direction(delta) {
                Some(SlideDirection::Forward) => {
                    if let Some(i) = step_after(current.get()) {
                        current.set(i);
                        render_step(&overlay2, i, SlideDirection::Forward);
                    }
                }
                Some(SlideDirection::Back) => {
                    if let Some(i) = step_before(current.get()) {
                        current.set(i);
                        render_step(&overlay2, i, SlideDirection::Back);
                    }
                }
                None => {}
            }
        });
    }

    render_step(&overlay, 0, SlideDirection::Forward);
}

fn render_step(overlay: &Element, index: usize, direction: SlideDirection) {
    let step = &TUTORIAL_STEPS[index];
    let Some(body) = dom::query_within(overlay, "#tutorial-body") else {
        return;
    };
    let gif_src = step.illustration(viewport_width());

    let anim_in = match direction {
        SlideDirection::Forward => "slideInFromRight 0.32s cubic-bezier(0.4,0,0.2,1) both",
        SlideDirection::Back => "slideInFromLeft 0.32s cubic-bezier(0.4,0,0.2,1) both",
    };

    body.set_inner_html(&format!(
        r#"
    <div style="
      width: 100%; max-width: 560px; text-align: center;
      animation: {anim_in};
    ">
      <div style="margin-bottom: 1rem;">
        <span style="
          display: inline-block;
          font-family: Nunito, sans-serif; font-weight: 800; font-size: 0.72rem;
          color: var(--accent); letter-spacing: 0.1em; text-transform: uppercase;
          background: rgba(115,213,226,0.1); padding: 0.25rem 0.7rem;
          border-radius: 99px; margin-bottom: 0.6rem;
        ">Paso {step_number} de {step_count}</span>

        <h3 style="
          font-family: Nunito, sans-serif; font-weight: 900; font-size: 1.3rem;
          color: var(--text); letter-spacing: -0.02em;
          margin: 0; line-height: 1.2;
        ">{title}</h3>
      </div>

      <div style="
        width: 100%; border-radius: 14px; overflow: hidden;
        border: 1px solid rgba(115,213,226,0.15);
        background: rgba(30,49,53,0.6);
        margin-bottom: 1.25rem;
        max-height: 42vh;
        display: flex; align-items: center; justify-content: center;
      ">
        <img
          src="{gif_src}"
          alt="{title}"
          style="
            width: 100%; height: 100%;
            object-fit: contain; display: block;
            max-height: 42vh;
          "
          onerror="this.parentElement.innerHTML='<div style=padding:2rem;color:var(--text-muted);font-family:Nunito,sans-serif;font-size:0.85rem;font-weight:600>GIF proximamente</div>'"
        />
      </div>

      <p style="
        font-family: Nunito, sans-serif; font-weight: 500; font-size: 0.92rem;
        color: var(--text-muted); line-height: 1.65;
        margin: 0; padding: 0 0.25rem;
      ">{description}</p>
    </div>
    "#,
        step_number = index + 1,
        step_count = TUTORIAL_STEPS.len(),
        title = step.title,
        description = step.description,
    ));

    render_dots(overlay, index);

    if let Some(next) = dom::query_within(overlay, "#tutorial-next") {
        next.set_text_content(Some(if is_last_step(index) {
            "Empezar"
        } else {
            "Siguiente"
        }));
    }
    if let Some(prev) = dom::query_within(overlay, "#tutorial-prev") {
        dom::set_style(
            &prev,
            "visibility",
            if index == 0 { "hidden" } else { "visible" },
        );
    }
}

fn render_dots(overlay: &Element, active: usize) {
    let Some(dots) = dom::query_within(overlay, "#tutorial-dots") else {
        return;
    };
    let html: String = (0..TUTORIAL_STEPS.len())
        .map(|i| {
            format!(
                r#"
      <div style="
        width: {width};
        height: 7px; border-radius: 99px;
        background: {background};
        transition: width 0.3s ease, background 0.3s ease;
      "></div>
      "#,
                width = if i == active { "20px" } else { "7px" },
                background = if i == active {
                    "var(--accent)"
                } else {
                    "rgba(115,213,226,0.25)"
                },
            )
        })
        .collect();
    dots.set_inner_html(&html);
}
