//! Dashboard: the live goal list plus the create/edit and delete
//! modals. Writes go straight to Firestore; the snapshot subscription
//! re-renders the list, so mutation handlers never patch the DOM
//! beyond their own feedback animation.

use chrono::Local;
use cumbre_core::goal::{DashboardView, Goal, deadline_status, format_deadline};
use cumbre_core::route::Screen;
use cumbre_core::validate::{escape_html, validate_title};
use std::cell::{Cell, RefCell};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::components::{
    self, ButtonVariant, FieldSpec, ToastKind, clear_field_errors, create_button, create_field,
    set_field_error,
};
use crate::{auth_screens, dom, firebase, onboarding, router, state};

thread_local! {
    /// Unsubscribe handle of the live query; at most one is active.
    static UNSUBSCRIBE: RefCell<Option<js_sys::Function>> = const { RefCell::new(None) };
    /// Latched after the first snapshot of a dashboard mount so the
    /// tutorial check runs once, not on every goal change.
    static TUTORIAL_LATCH: Cell<bool> = const { Cell::new(false) };
}

/// Detach the live goal subscription, if any. Called on every
/// navigation so a stale listener never outlives its screen.
pub fn cancel_subscription() {
    UNSUBSCRIBE.with(|u| {
        if let Some(unsub) = u.borrow_mut().take() {
            let _ = unsub.call0(&JsValue::NULL);
        }
    });
}

// ── Dashboard screen ──

pub fn render_dashboard(app: &Element) {
    let container = dom::create_element("div");
    container.set_class_name("min-h-screen");
    dom::set_style(&container, "animation", "fadeIn 0.3s ease both");

    let topbar = components::render_topbar(
        &state::display_name(),
        components::TopbarActions {
            on_settings: || router::navigate(Screen::Settings),
            on_help: || router::navigate(Screen::Help),
            on_logout: auth_screens::handle_logout,
        },
    );
    container.append_child(&topbar).unwrap();

    let content = dom::create_element("div");
    content.set_class_name("content-area");

    let section_header = dom::create_element("div");
    section_header.set_class_name("flex items-center justify-between mb-4 mt-2");
    section_header.set_inner_html(r#"<h2 class="section-title">Mis metas</h2>"#);
    content.append_child(&section_header).unwrap();

    let progress_container = dom::create_element("div");
    progress_container.set_id("progress-container");
    content.append_child(&progress_container).unwrap();

    let goals_list = dom::create_element("div");
    goals_list.set_id("goals-list");
    goals_list.set_inner_html(
        r#"
    <div class="flex items-center justify-center py-8">
      <div class="loader-ring" style="width:32px;height:32px;border-width:3px"></div>
    </div>
    "#,
    );
    content.append_child(&goals_list).unwrap();
    container.append_child(&content).unwrap();

    let fab = dom::create_element("button");
    fab.set_class_name("fab fab-appear");
    let _ = fab.set_attribute("title", "Nueva meta");
    fab.set_inner_html(r#"<span class="material-icons-round" style="font-size:1.5rem">add</span>"#);
    dom::listen(&fab, "click", |_| open_goal_modal(None));
    container.append_child(&fab).unwrap();

    app.append_child(&container).unwrap();

    TUTORIAL_LATCH.with(|t| t.set(false));
    subscribe();
}

fn subscribe() {
    cancel_subscription();
    let Some(identity) = state::identity() else {
        return;
    };

    let query = firebase::goals(&identity.uid).order_by("createdAt", "desc");

    let next = Closure::wrap(Box::new(|snapshot: JsValue| {
        let snapshot: firebase::QuerySnapshot = snapshot.unchecked_into();
        let goals: Vec<Goal> = snapshot
            .docs()
            .iter()
            .map(|d| firebase::goal_from_doc(&d.unchecked_into()))
            .collect();
        render_goals_list(&goals);
        components::hide_loading();

        if !TUTORIAL_LATCH.with(|t| t.replace(true)) {
            onboarding::maybe_show_tutorial();
        }
    }) as Box<dyn FnMut(JsValue)>);

    let error = Closure::wrap(Box::new(|_err: JsValue| {
        components::show_toast("Error al cargar metas", ToastKind::Error);
        components::hide_loading();
    }) as Box<dyn FnMut(JsValue)>);

    let unsub = query.on_snapshot(next.as_ref().unchecked_ref(), error.as_ref().unchecked_ref());
    next.forget();
    error.forget();

    UNSUBSCRIBE.with(|u| *u.borrow_mut() = Some(unsub));
}

fn render_goals_list(goals: &[Goal]) {
    let Some(list) = dom::by_id("goals-list") else {
        return;
    };
    list.set_inner_html("");

    let view = DashboardView::build(goals);

    if let Some(progress) = dom::by_id("progress-container") {
        progress.set_inner_html("");
        if !view.is_empty() {
            progress
                .append_child(&components::render_progress_summary(&view.progress))
                .unwrap();
        }
    }

    if view.is_empty() {
        list.append_child(&components::render_empty_state()).unwrap();
        return;
    }

    let append_group = |group: &[&Goal]| {
        for (idx, goal) in group.iter().enumerate() {
            let card = create_goal_card(goal);
            dom::set_style(&card, "animation-delay", &format!("{}s", idx as f64 * 0.04));
            dom::add_class(&card, "card-appear");
            list.append_child(&card).unwrap();
        }
    };

    append_group(&view.pending);
    if view.show_completed_separator() {
        let sep = dom::create_element("p");
        sep.set_class_name("text-xs font-bold mt-4 mb-3");
        dom::set_style(&sep, "color", "var(--text-muted)");
        dom::set_style(&sep, "text-transform", "uppercase");
        dom::set_style(&sep, "letter-spacing", "0.06em");
        sep.set_text_content(Some("Completadas"));
        list.append_child(&sep).unwrap();
    }
    append_group(&view.completed);
}

// ── Goal card ──

fn create_goal_card(goal: &Goal) -> Element {
    let card = dom::create_element("div");
    card.set_class_name("goal-card mb-3");
    let _ = card.set_attribute("data-id", &goal.id);
    if goal.completed {
        dom::add_class(&card, "completed");
    }

    let deadline_badge = goal
        .deadline
        .map(|d| {
            let status = deadline_status(Some(d), Local::now().date_naive());
            format!(
                r#"<div class="mt-1.5"><span class="deadline-badge {}">
          <span class="material-icons-round" style="font-size:0.75rem">event</span>
          {}
        </span></div>"#,
                status.css_class(),
                format_deadline(d),
            )
        })
        .unwrap_or_default();

    let details_html = if goal.details.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p class="text-xs mt-0.5 leading-snug" style="color:var(--text-muted);word-break:break-word">{}</p>"#,
            escape_html(&goal.details),
        )
    };

    card.set_inner_html(&format!(
        r#"
    <div class="goal-header flex items-start justify-between gap-3 cursor-pointer" role="button" tabindex="0">
      <div class="flex items-start gap-3 flex-1 min-w-0">
        <span class="material-icons-round mt-0.5 flex-shrink-0" style="font-size:1.1rem;color:{icon_color}">
          {icon}
        </span>
        <div class="flex-1 min-w-0">
          <p class="goal-title font-bold text-sm leading-tight" style="color:var(--text);word-break:break-word">
            {title}
          </p>
          {details}
          {deadline}
        </div>
      </div>
      <span class="material-icons-round chevron flex-shrink-0 transition-transform duration-300" style="color:var(--text-muted);font-size:1rem">
        expand_more
      </span>
    </div>

    <div class="goal-actions mt-0" id="actions-{id}">
      <div class="divider"></div>
      <div class="goal-action-btns">
        <button class="btn btn-success btn-complete" style="font-size:0.8rem;padding:0.5rem 0.75rem;min-height:40px">
          <span class="material-icons-round" style="font-size:1rem">{complete_icon}</span>
          <span>{complete_label}</span>
        </button>
        <button class="btn btn-ghost btn-edit" style="font-size:0.8rem;padding:0.5rem 0.75rem;min-height:40px">
          <span class="material-icons-round" style="font-size:1rem">edit</span>
          <span>Editar</span>
        </button>
        <button class="btn btn-danger btn-delete" style="font-size:0.8rem;padding:0.5rem 0.75rem;min-height:40px">
          <span class="material-icons-round" style="font-size:1rem">delete_outline</span>
          <span>Eliminar</span>
        </button>
      </div>
    </div>
    "#,
        icon_color = if goal.completed {
            "var(--success)"
        } else {
            "var(--accent)"
        },
        icon = if goal.completed {
            "check_circle"
        } else {
            "radio_button_unchecked"
        },
        title = escape_html(&goal.title),
        details = details_html,
        deadline = deadline_badge,
        id = goal.id,
        complete_icon = if goal.completed { "undo" } else { "check_circle" },
        complete_label = if goal.completed { "Deshacer" } else { "Completada" },
    ));

    let header = dom::query_within(&card, ".goal-header").unwrap();
    let actions = dom::query_within(&card, ".goal-actions").unwrap();
    let chevron = dom::query_within(&card, ".chevron").unwrap();

    let toggle_card = {
        let actions = actions.clone();
        let chevron = chevron.clone();
        move || {
            let is_open = dom::has_class(&actions, "open");
            // Only one card may be expanded at a time.
            for other in dom::query_all(".goal-actions.open") {
                dom::remove_class(&other, "open");
                if let Some(c) = other
                    .closest(".goal-card")
                    .ok()
                    .flatten()
                    .and_then(|card| dom::query_within(&card, ".chevron"))
                {
                    dom::set_style(&c, "transform", "rotate(0deg)");
                }
            }
            if !is_open {
                dom::add_class(&actions, "open");
                dom::set_style(&chevron, "transform", "rotate(180deg)");
            }
        }
    };

    {
        let toggle = toggle_card.clone();
        dom::listen(&header, "click", move |_| toggle());
    }
    {
        let toggle = toggle_card.clone();
        dom::listen(&header, "keydown", move |e| {
            let ke: web_sys::KeyboardEvent = e.unchecked_into();
            if ke.key() == "Enter" || ke.key() == " " {
                toggle();
            }
        });
    }

    if let Some(btn) = dom::query_within(&card, ".btn-complete") {
        let goal = goal.clone();
        let card = card.clone();
        dom::listen(&btn, "click", move |e| {
            e.stop_propagation();
            toggle_completed(goal.clone(), card.clone());
        });
    }

    if let Some(btn) = dom::query_within(&card, ".btn-edit") {
        let goal = goal.clone();
        let actions = actions.clone();
        let chevron = chevron.clone();
        dom::listen(&btn, "click", move |e| {
            e.stop_propagation();
            dom::remove_class(&actions, "open");
            dom::set_style(&chevron, "transform", "rotate(0deg)");
            open_goal_modal(Some(goal.clone()));
        });
    }

    if let Some(btn) = dom::query_within(&card, ".btn-delete") {
        let goal = goal.clone();
        dom::listen(&btn, "click", move |e| {
            e.stop_propagation();
            open_delete_confirm(goal.clone());
        });
    }

    card
}

fn toggle_completed(goal: Goal, card: Element) {
    let Some(identity) = state::identity() else {
        return;
    };
    spawn_local(async move {
        let new_status = !goal.completed;
        let data = js_sys::Object::new();
        firebase::obj_set(&data, "completed", &JsValue::from_bool(new_status));
        firebase::obj_set(
            &data,
            "completedAt",
            &if new_status {
                firebase::server_timestamp()
            } else {
                JsValue::NULL
            },
        );

        let update = firebase::goal_doc(&identity.uid, &goal.id).update(&data);
        match firebase::call(update).await {
            Ok(_) => {
                // The snapshot listener redraws; this only plays the check.
                if let Some(icon) = dom::query_within(&card, ".material-icons-round") {
                    dom::add_class(&icon, "check-animate");
                    let icon2 = icon.clone();
                    dom::listen_once(&icon, "animationend", move |_| {
                        dom::remove_class(&icon2, "check-animate");
                    });
                }
            }
            Err(_) => components::show_toast("No se pudo actualizar la meta", ToastKind::Error),
        }
    });
}

// ── Create / edit modal ──

fn open_goal_modal(goal: Option<Goal>) {
    let Some(identity) = state::identity() else {
        return;
    };
    let is_edit = goal.is_some();
    let modal = components::open_modal(if is_edit { "Editar meta" } else { "Nueva meta" });

    let form = dom::create_element("div");
    form.set_inner_html(
        r#"
    <div id="modal-fields"></div>
    <div id="modal-error" class="hidden text-sm font-semibold py-2 px-3 rounded-lg mb-3"
      style="background:rgba(226,115,115,0.1);color:var(--danger)"></div>
    "#,
    );

    let title_value = goal.as_ref().map(|g| g.title.clone()).unwrap_or_default();
    let details_value = goal.as_ref().map(|g| g.details.clone()).unwrap_or_default();
    let deadline_value = goal
        .as_ref()
        .and_then(|g| g.deadline)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();

    let fields = dom::query_within(&form, "#modal-fields").unwrap();
    fields
        .append_child(&create_field(
            &FieldSpec::new("goal-title", "Nombre de la meta")
                .placeholder("Ej: Leer 12 libros este ano")
                .required()
                .value(&title_value),
        ))
        .unwrap();

    let details_wrapper = dom::create_element("div");
    details_wrapper.set_class_name("mb-4");
    details_wrapper.set_inner_html(&format!(
        r#"
    <label class="field-label" for="goal-details">Detalles (opcional)</label>
    <textarea
      class="field-input"
      id="goal-details"
      placeholder="Describe tu meta..."
      rows="3"
      style="resize:vertical"
    >{}</textarea>
    <p class="field-error hidden text-xs mt-1 font-semibold" id="goal-details-error" style="color:var(--danger)"></p>
    "#,
        escape_html(&details_value),
    ));
    fields.append_child(&details_wrapper).unwrap();

    let deadline_wrapper = dom::create_element("div");
    deadline_wrapper.set_class_name("mb-4");
    deadline_wrapper.set_inner_html(&format!(
        r#"
    <label class="field-label" for="goal-deadline">Fecha limite (opcional)</label>
    <input
      class="field-input"
      id="goal-deadline"
      type="date"
      min="{today}"
      value="{deadline_value}"
      style="color-scheme: dark"
    />
    <p class="field-error hidden text-xs mt-1 font-semibold" id="goal-deadline-error" style="color:var(--danger)"></p>
    "#,
    ));
    fields.append_child(&deadline_wrapper).unwrap();

    let footer = dom::create_element("div");
    footer.set_class_name("flex gap-3 mt-4");
    let cancel = create_button("Cancelar", "", ButtonVariant::Ghost, false);
    dom::add_class(&cancel, "flex-1");
    let save_btn = create_button(
        if is_edit { "Guardar" } else { "Crear meta" },
        if is_edit { "save" } else { "add" },
        ButtonVariant::Primary,
        false,
    );
    dom::add_class(&save_btn, "flex-1");
    footer.append_child(&cancel).unwrap();
    footer.append_child(&save_btn).unwrap();
    form.append_child(&footer).unwrap();

    modal.panel.append_child(&form).unwrap();

    {
        let m = modal.clone();
        dom::listen(&cancel, "click", move |_| m.close());
    }

    let goal_id = goal.map(|g| g.id);
    let uid = identity.uid;
    let save_btn2 = save_btn.clone();
    let modal2 = modal.clone();
    dom::listen(&save_btn, "click", move |_| {
        let title = dom::input_value("goal-title");
        let details = dom::textarea_value("goal-details");
        let deadline = dom::input_value("goal-deadline");

        if let Some(banner) = dom::by_id("modal-error") {
            dom::add_class(&banner, "hidden");
        }
        clear_field_errors(&["goal-title"]);

        if let Err(e) = validate_title(&title) {
            set_field_error("goal-title", &e.to_string());
            return;
        }

        save_btn2.set_disabled(true);

        let save_btn = save_btn2.clone();
        let modal = modal2.clone();
        let goal_id = goal_id.clone();
        let uid = uid.clone();
        spawn_local(async move {
            let data = js_sys::Object::new();
            firebase::obj_set(&data, "title", &JsValue::from_str(&title));
            firebase::obj_set(&data, "details", &JsValue::from_str(&details));
            firebase::obj_set(
                &data,
                "deadline",
                &if deadline.is_empty() {
                    JsValue::NULL
                } else {
                    JsValue::from_str(&deadline)
                },
            );
            firebase::obj_set(&data, "updatedAt", &firebase::server_timestamp());

            let result = match &goal_id {
                Some(id) => firebase::call(firebase::goal_doc(&uid, id).update(&data)).await,
                None => {
                    firebase::obj_set(&data, "completed", &JsValue::FALSE);
                    firebase::obj_set(&data, "completedAt", &JsValue::NULL);
                    firebase::obj_set(&data, "createdAt", &firebase::server_timestamp());
                    firebase::call(firebase::goals(&uid).add(&data)).await
                }
            };

            match result {
                Ok(_) => {
                    components::show_toast(
                        if goal_id.is_some() {
                            "Meta actualizada"
                        } else {
                            "Meta creada"
                        },
                        ToastKind::Success,
                    );
                    modal.close();
                }
                Err(_) => {
                    save_btn.set_disabled(false);
                    if let Some(banner) = dom::by_id("modal-error") {
                        banner.set_text_content(Some("No se pudo guardar. Intenta de nuevo."));
                        dom::remove_class(&banner, "hidden");
                    }
                }
            }
        });
    });
}

// ── Delete confirmation ──

fn open_delete_confirm(goal: Goal) {
    let Some(identity) = state::identity() else {
        return;
    };
    let modal = components::open_modal("Eliminar meta");

    let body = dom::create_element("div");
    body.set_inner_html(&format!(
        r#"
    <p class="text-sm mb-5" style="color:var(--text-muted);line-height:1.6;font-weight:500">
      Esta accion no se puede deshacer. Se eliminara permanentemente
      <strong style="color:var(--text)">"{}"</strong>.
    </p>
    "#,
        escape_html(&goal.title),
    ));

    let footer = dom::create_element("div");
    footer.set_class_name("flex gap-3");
    let cancel = create_button("Cancelar", "", ButtonVariant::Ghost, false);
    dom::add_class(&cancel, "flex-1");
    let confirm = create_button("Eliminar", "delete_forever", ButtonVariant::Danger, false);
    dom::add_class(&confirm, "flex-1");
    footer.append_child(&cancel).unwrap();
    footer.append_child(&confirm).unwrap();
    body.append_child(&footer).unwrap();
    modal.panel.append_child(&body).unwrap();

    {
        let m = modal.clone();
        dom::listen(&cancel, "click", move |_| m.close());
    }

    let confirm2 = confirm.clone();
    let modal2 = modal.clone();
    dom::listen(&confirm, "click", move |_| {
        confirm2.set_disabled(true);
        let confirm = confirm2.clone();
        let modal = modal2.clone();
        let uid = identity.uid.clone();
        let goal_id = goal.id.clone();
        spawn_local(async move {
            match firebase::call(firebase::goal_doc(&uid, &goal_id).delete()).await {
                Ok(_) => {
                    modal.close_then(move || {
                        // The card may already be gone if the snapshot
                        // beat the animation; both paths are fine.
                        if let Some(card) = dom::query(&format!(r#"[data-id="{goal_id}"]"#)) {
                            dom::add_class(&card, "card-remove");
                            let card2 = card.clone();
                            dom::listen_once(&card, "animationend", move |_| card2.remove());
                        }
                        components::show_toast("Meta eliminada", ToastKind::Info);
                    });
                }
                Err(_) => {
                    confirm.set_disabled(false);
                    components::show_toast(
                        "No se pudo eliminar. Intenta de nuevo.",
                        ToastKind::Error,
                    );
                }
            }
        });
    });
}
