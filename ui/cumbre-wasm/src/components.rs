//! Reusable UI components: toasts, loading overlay, form fields,
//! buttons with ripple, modals, topbar with overflow menu, empty
//! state, goodbye screen and the progress summary.

use cumbre_core::goal::{Progress, initials};
use cumbre_core::validate::escape_html;
use gloo_timers::future::TimeoutFuture;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom;

// ── Toast ──

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn css(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "check_circle",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }
}

const TOAST_DURATION_MS: u32 = 3_500;

pub fn show_toast(message: &str, kind: ToastKind) {
    let Some(container) = dom::by_id("toast-container") else {
        return;
    };

    let toast = dom::create_element("div");
    toast.set_class_name(&format!("toast {}", kind.css()));
    toast.set_inner_html(&format!(
        r#"<span class="material-icons-round" style="font-size:1.1rem">{}</span><span>{}</span>"#,
        kind.icon(),
        escape_html(message),
    ));
    container.append_child(&toast).unwrap();

    spawn_local(async move {
        TimeoutFuture::new(TOAST_DURATION_MS).await;
        dom::add_class(&toast, "removing");
        let toast2 = toast.clone();
        dom::listen_once(&toast, "animationend", move |_| toast2.remove());
    });
}

// ── Loading overlay ──

pub fn show_loading(message: &str) {
    let Some(overlay) = dom::by_id("loading-overlay") else {
        return;
    };
    if let Some(msg) = dom::by_id("loading-message") {
        msg.set_text_content(Some(message));
    }
    dom::remove_class(&overlay, "hidden");
}

pub fn hide_loading() {
    if let Some(overlay) = dom::by_id("loading-overlay") {
        dom::add_class(&overlay, "hidden");
    }
}

// ── Form field ──

pub struct FieldSpec<'a> {
    id: &'a str,
    label: &'a str,
    kind: &'a str,
    placeholder: &'a str,
    required: bool,
    value: &'a str,
}

impl<'a> FieldSpec<'a> {
    pub fn new(id: &'a str, label: &'a str) -> FieldSpec<'a> {
        FieldSpec {
            id,
            label,
            kind: "text",
            placeholder: "",
            required: false,
            value: "",
        }
    }

    pub fn email(mut self) -> Self {
        self.kind = "email";
        self
    }

    pub fn password(mut self) -> Self {
        self.kind = "password";
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn value(mut self, value: &'a str) -> Self {
        self.value = value;
        self
    }
}

/// Field wrapper with label, input and an error slot below.
pub fn create_field(spec: &FieldSpec) -> Element {
    let wrapper = dom::create_element("div");
    wrapper.set_class_name("mb-4");
    let autocomplete = if spec.kind == "password" {
        "current-password"
    } else {
        "off"
    };
    wrapper.set_inner_html(&format!(
        r#"
    <label class="field-label" for="{id}">{label}</label>
    <input
      class="field-input"
      id="{id}"
      name="{id}"
      type="{kind}"
      placeholder="{placeholder}"
      {required}
      autocomplete="{autocomplete}"
      value="{value}"
    />
    <p class="field-error hidden text-xs mt-1 font-semibold" id="{id}-error" style="color:var(--danger)"></p>
    "#,
        id = spec.id,
        label = spec.label,
        kind = spec.kind,
        placeholder = spec.placeholder,
        required = if spec.required { "required" } else { "" },
        autocomplete = autocomplete,
        value = escape_html(spec.value),
    ));
    wrapper
}

/// Show (non-empty message) or clear (empty message) a field error.
pub fn set_field_error(id: &str, message: &str) {
    let Some(input) = dom::by_id(id) else {
        return;
    };
    let Some(error) = dom::by_id(&format!("{id}-error")) else {
        return;
    };
    if message.is_empty() {
        dom::remove_class(&input, "error");
        dom::add_class(&error, "hidden");
    } else {
        dom::add_class(&input, "error");
        error.set_text_content(Some(message));
        dom::remove_class(&error, "hidden");
    }
}

pub fn clear_field_errors(ids: &[&str]) {
    for id in ids {
        set_field_error(id, "");
    }
}

// ── Button ──

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonVariant {
    Primary,
    Ghost,
    Danger,
}

impl ButtonVariant {
    fn css(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn-primary",
            ButtonVariant::Ghost => "btn-ghost",
            ButtonVariant::Danger => "btn-danger",
        }
    }
}

/// Design-system button with a ripple affordance on click.
pub fn create_button(
    text: &str,
    icon: &str,
    variant: ButtonVariant,
    full_width: bool,
) -> web_sys::HtmlButtonElement {
    let btn: web_sys::HtmlButtonElement = dom::create_element("button").unchecked_into();
    btn.set_class_name(&format!(
        "btn {}{}",
        variant.css(),
        if full_width { " w-full" } else { "" }
    ));
    btn.set_type("button");
    let icon_html = if icon.is_empty() {
        String::new()
    } else {
        format!(
            r#"<span class="material-icons-round" style="font-size:1.15rem">{icon}</span>"#
        )
    };
    btn.set_inner_html(&format!("{icon_html}<span>{text}</span>"));

    let btn2 = btn.clone();
    dom::listen(&btn, "click", move |e| {
        let me: web_sys::MouseEvent = e.unchecked_into();
        let rect = btn2.get_bounding_client_rect();
        let x = me.client_x() as f64 - rect.left();
        let y = me.client_y() as f64 - rect.top();
        let style = btn2.style();
        let _ = style.set_property("--ripple-x", &format!("{x}px"));
        let _ = style.set_property("--ripple-y", &format!("{y}px"));
        let _ = btn2.class_list().remove_1("ripple");
        let _ = btn2.offset_width(); // force reflow so the animation restarts
        let _ = btn2.class_list().add_1("ripple");
    });

    btn
}

// ── Modal ──

/// Backdrop plus centered panel. Closing animates out before removal.
#[derive(Clone)]
pub struct Modal {
    pub backdrop: Element,
    pub panel: Element,
}

pub fn open_modal(title: &str) -> Modal {
    let backdrop = dom::create_element("div");
    backdrop.set_class_name("modal-backdrop");
    dom::set_style(&backdrop, "animation", "fadeIn 0.25s ease both");

    let panel = dom::create_element("div");
    panel.set_class_name("modal-panel");

    let header = dom::create_element("div");
    header.set_class_name("flex items-center justify-between mb-5");
    header.set_inner_html(&format!(
        r#"<h3 class="text-lg font-800 font-extrabold" style="color:var(--text)">{title}</h3>"#
    ));

    let close_btn = dom::create_element("button");
    close_btn.set_class_name("btn btn-ghost p-2");
    dom::set_style(&close_btn, "min-width", "0");
    dom::set_style(&close_btn, "padding", "0.35rem");
    close_btn.set_inner_html(
        r#"<span class="material-icons-round" style="font-size:1.2rem">close</span>"#,
    );

    header.append_child(&close_btn).unwrap();
    panel.append_child(&header).unwrap();
    backdrop.append_child(&panel).unwrap();
    dom::body().append_child(&backdrop).unwrap();

    let modal = Modal {
        backdrop: backdrop.clone(),
        panel,
    };

    {
        let m = modal.clone();
        dom::listen(&close_btn, "click", move |_| m.close());
    }
    {
        // Only a click on the backdrop itself dismisses, not on the panel.
        let m = modal.clone();
        dom::listen(&backdrop, "click", move |e| {
            if let Some(target) = e.target() {
                let target: JsValue = target.into();
                if &target == AsRef::<JsValue>::as_ref(&m.backdrop) {
                    m.close();
                }
            }
        });
    }

    modal
}

impl Modal {
    pub fn close(&self) {
        self.close_then(|| {});
    }

    /// Animate out, remove the backdrop, then run `after`.
    pub fn close_then(&self, after: impl FnOnce() + 'static) {
        dom::add_class(&self.panel, "closing");
        dom::set_style(&self.backdrop, "animation", "fadeIn 0.2s ease reverse both");
        let backdrop = self.backdrop.clone();
        dom::listen_once(&self.panel, "animationend", move |_| {
            backdrop.remove();
            after();
        });
    }
}

// ── Topbar ──

pub struct TopbarActions {
    pub on_settings: fn(),
    pub on_help: fn(),
    pub on_logout: fn(),
}

const DROPDOWN_WIDTH_PX: f64 = 180.0;

/// Application top bar: avatar with initials, greeting and an overflow
/// menu (settings / help / logout) clamped to the viewport.
pub fn render_topbar(display_name: &str, actions: TopbarActions) -> Element {
    let topbar = dom::create_element("div");
    topbar.set_class_name("topbar");
    topbar.set_id("topbar");

    let name = escape_html(display_name);
    topbar.set_inner_html(&format!(
        r#"
    <div class="flex items-center gap-3">
      <div class="user-avatar">{avatar}</div>
      <div>
        <p class="text-xs font-semibold" style="color:var(--text-muted);line-height:1">Hola,</p>
        <p class="font-800 text-sm font-extrabold" style="color:var(--text);line-height:1.3">{name}</p>
      </div>
    </div>
    <button id="menu-btn" class="btn btn-ghost" style="min-width:0;padding:0.4rem">
      <span class="material-icons-round">more_vert</span>
    </button>
    "#,
        avatar = initials(display_name),
    ));

    let menu_btn = dom::query_within(&topbar, "#menu-btn").unwrap();
    let open: Rc<RefCell<Option<Element>>> = Rc::new(RefCell::new(None));

    let close_dropdown = {
        let open = open.clone();
        Rc::new(move || {
            if let Some(dropdown) = open.borrow_mut().take() {
                dom::set_style(&dropdown, "animation", "dropdownOpen 0.15s ease reverse both");
                let dd = dropdown.clone();
                dom::listen_once(&dropdown, "animationend", move |_| dd.remove());
            }
        })
    };

    {
        let open = open.clone();
        let close = close_dropdown.clone();
        let menu_btn2 = menu_btn.clone();
        dom::listen(&menu_btn, "click", move |e| {
            e.stop_propagation();
            if open.borrow().is_some() {
                close();
                return;
            }

            let dropdown = dom::create_element("div");
            dropdown.set_class_name("dropdown-menu open");
            dropdown.set_inner_html(
                r#"
      <div class="dropdown-item" id="dd-settings">
        <span class="material-icons-round" style="font-size:1.1rem">settings</span> Ajustes
      </div>
      <div class="dropdown-item" id="dd-help">
        <span class="material-icons-round" style="font-size:1.1rem">help_outline</span> Ayuda
      </div>
      <div class="divider" style="margin:0"></div>
      <div class="dropdown-item danger" id="dd-logout">
        <span class="material-icons-round" style="font-size:1.1rem">logout</span> Cerrar sesion
      </div>
      "#,
            );
            dom::body().append_child(&dropdown).unwrap();

            // Position under the button without leaving the viewport.
            let rect = menu_btn2.get_bounding_client_rect();
            let win_width = dom::window()
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            let right_offset = win_width - rect.right();
            let clamped_right = right_offset
                .min(win_width - DROPDOWN_WIDTH_PX - 8.0)
                .max(8.0);
            dom::set_style(&dropdown, "top", &format!("{}px", rect.bottom() + 8.0));
            dom::set_style(&dropdown, "right", &format!("{clamped_right}px"));

            for (selector, action) in [
                ("#dd-settings", actions.on_settings),
                ("#dd-help", actions.on_help),
                ("#dd-logout", actions.on_logout),
            ] {
                if let Some(item) = dom::query_within(&dropdown, selector) {
                    let close = close.clone();
                    dom::listen(&item, "click", move |_| {
                        close();
                        action();
                    });
                }
            }

            *open.borrow_mut() = Some(dropdown);
        });
    }

    {
        let close = close_dropdown.clone();
        dom::listen(&dom::document(), "click", move |_| close());
    }

    topbar
}

// ── Empty state ──

pub fn render_empty_state() -> Element {
    let el = dom::create_element("div");
    el.set_class_name("empty-state");
    el.set_inner_html(
        r#"
    <div style="
      width:80px; height:80px; border-radius:50%;
      background:rgba(115,213,226,0.08);
      border:2px dashed rgba(115,213,226,0.25);
      display:flex; align-items:center; justify-content:center;
      margin-bottom:1.25rem;
    ">
      <span class="material-icons-round" style="font-size:2rem;color:var(--text-muted)">flag</span>
    </div>
    <p class="font-extrabold text-lg" style="color:var(--text)">Sin metas aun</p>
    <p class="text-sm mt-1" style="color:var(--text-muted)">Presiona el boton + para crear tu primera meta</p>
    "#,
    );
    el
}

// ── Goodbye screen ──

const GOODBYE_DURATION_MS: u32 = 2_200;

/// Full-screen farewell shown during logout. Runs `after` once the
/// exit animation completes; the caller navigates from there.
pub fn show_goodbye(display_name: &str, after: impl FnOnce() + 'static) {
    let el = dom::create_element("div");
    el.set_class_name("goodbye-msg");

    let first_name = display_name.split_whitespace().next().unwrap_or_default();
    el.set_inner_html(&format!(
        r#"
    <div style="text-align:center">
      <div class="app-icon" style="margin-bottom:1.5rem">
        <span class="material-icons-round" style="font-size:2rem;color:var(--accent)">flag</span>
      </div>
      <p class="goodbye-text">Hasta pronto, {}!</p>
      <p style="color:var(--text-muted);font-weight:600;margin-top:1rem;opacity:0;animation:fadeIn 0.3s ease 0.3s both">
        Sigue alcanzando tus metas
      </p>
    </div>
    "#,
        escape_html(first_name),
    ));
    dom::body().append_child(&el).unwrap();

    spawn_local(async move {
        TimeoutFuture::new(GOODBYE_DURATION_MS).await;
        dom::set_style(&el, "animation", "fadeIn 0.4s ease reverse both");
        let el2 = el.clone();
        dom::listen_once(&el, "animationend", move |_| {
            el2.remove();
            after();
        });
    });
}

// ── Progress summary ──

pub fn render_progress_summary(progress: &Progress) -> Element {
    let pct = progress.percent();
    let el = dom::create_element("div");
    el.set_id("progress-summary");
    dom::set_style(&el, "margin-bottom", "1.25rem");
    el.set_inner_html(&format!(
        r#"
    <div class="flex justify-between items-center mb-2">
      <span class="text-sm font-semibold" style="color:var(--text-muted)">{label}</span>
      <span class="text-sm font-bold brand-highlight">{pct}%</span>
    </div>
    <div class="progress-bar">
      <div class="progress-fill" style="width:{pct}%"></div>
    </div>
    "#,
        label = progress.label(),
    ));
    el
}
