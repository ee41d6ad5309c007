//! Account settings and the help/contact screen.

use cumbre_core::errors::auth_message;
use cumbre_core::route::Screen;
use cumbre_core::validate::{escape_html, is_strong_password, is_valid_email};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::components::{
    self, ButtonVariant, FieldSpec, ToastKind, clear_field_errors, create_button, create_field,
    set_field_error,
};
use crate::{dom, firebase, router, state};

fn back_topbar(title: &str, back_id: &str) -> Element {
    let topbar = dom::create_element("div");
    topbar.set_class_name("topbar");
    topbar.set_inner_html(&format!(
        r#"
    <div class="flex items-center gap-3">
      <button id="{back_id}" class="btn btn-ghost" style="min-width:0;padding:0.4rem">
        <span class="material-icons-round">arrow_back</span>
      </button>
      <h2 class="font-extrabold text-base" style="color:var(--text)">{title}</h2>
    </div>
    "#,
    ));
    if let Some(back) = dom::query_within(&topbar, &format!("#{back_id}")) {
        dom::listen(&back, "click", |_| router::navigate(Screen::Dashboard));
    }
    topbar
}

// ── Settings ──

pub fn render_settings(app: &Element) {
    let container = dom::create_element("div");
    container.set_class_name("min-h-screen screen-enter");
    container.append_child(&back_topbar("Ajustes", "settings-back")).unwrap();

    let content = dom::create_element("div");
    content.set_class_name("content-area");

    let profile = state::profile().unwrap_or_default();
    let email = state::identity().map(|i| i.email).unwrap_or_default();

    let card = dom::create_element("div");
    card.set_class_name("auth-card");
    dom::set_style(&card, "max-width", "100%");

    let account_heading = dom::create_element("h3");
    account_heading.set_class_name("font-bold text-sm uppercase tracking-widest mb-4");
    dom::set_style(&account_heading, "color", "var(--text-muted)");
    account_heading.set_text_content(Some("Informacion de cuenta"));
    card.append_child(&account_heading).unwrap();

    let fields = dom::create_element("div");
    for spec in [
        FieldSpec::new("sett-displayname", "Nombre completo")
            .value(&profile.display_name)
            .required(),
        FieldSpec::new("sett-username", "Nombre de usuario")
            .value(&profile.username)
            .required(),
        FieldSpec::new("sett-email", "Correo electronico")
            .email()
            .value(&email)
            .required(),
    ] {
        fields.append_child(&create_field(&spec)).unwrap();
    }
    card.append_child(&fields).unwrap();

    let banner = dom::create_element("div");
    banner.set_id("settings-error");
    banner.set_class_name("hidden text-sm font-semibold py-2 px-3 rounded-lg mb-3");
    dom::set_style(&banner, "background", "rgba(226,115,115,0.1)");
    dom::set_style(&banner, "color", "var(--danger)");
    card.append_child(&banner).unwrap();

    let divider = dom::create_element("div");
    divider.set_class_name("divider");
    card.append_child(&divider).unwrap();

    let pw_heading = dom::create_element("h3");
    pw_heading.set_class_name("font-bold text-sm uppercase tracking-widest mb-4");
    dom::set_style(&pw_heading, "color", "var(--text-muted)");
    pw_heading.set_text_content(Some("Cambiar contrasena"));
    card.append_child(&pw_heading).unwrap();

    let pw_fields = dom::create_element("div");
    pw_fields.set_id("pw-fields");
    for spec in [
        FieldSpec::new("sett-pw-current", "Contrasena actual")
            .password()
            .placeholder("••••••••")
            .required(),
        FieldSpec::new("sett-pw-new", "Nueva contrasena")
            .password()
            .placeholder("8+ caracteres")
            .required(),
        FieldSpec::new("sett-pw-new2", "Repetir nueva contrasena")
            .password()
            .placeholder("••••••••")
            .required(),
    ] {
        pw_fields.append_child(&create_field(&spec)).unwrap();
    }
    card.append_child(&pw_fields).unwrap();

    let save = create_button("Guardar cambios", "save", ButtonVariant::Primary, true);
    card.append_child(&save).unwrap();
    content.append_child(&card).unwrap();
    container.append_child(&content).unwrap();
    app.append_child(&container).unwrap();

    let save2 = save.clone();
    dom::listen(&save, "click", move |_| handle_save(save2.clone()));
}

fn handle_save(save_btn: web_sys::HtmlButtonElement) {
    let display_name = dom::input_value("sett-displayname");
    let username = dom::input_value("sett-username");
    let email = dom::input_value("sett-email");
    let pw_current = dom::input_value("sett-pw-current");
    let pw_new = dom::input_value("sett-pw-new");
    let pw_new2 = dom::input_value("sett-pw-new2");

    if let Some(banner) = dom::by_id("settings-error") {
        dom::add_class(&banner, "hidden");
    }
    clear_field_errors(&[
        "sett-displayname",
        "sett-username",
        "sett-email",
        "sett-pw-new",
        "sett-pw-new2",
    ]);

    let mut has_error = false;
    if display_name.is_empty() {
        set_field_error("sett-displayname", "Ingresa tu nombre");
        has_error = true;
    }
    if username.is_empty() {
        set_field_error("sett-username", "Ingresa un nombre de usuario");
        has_error = true;
    }
    if email.is_empty() || !is_valid_email(&email) {
        set_field_error("sett-email", "Correo no valido");
        has_error = true;
    }
    if has_error {
        return;
    }

    // The password block only validates when the user touched it.
    let changing_password = !pw_current.is_empty() || !pw_new.is_empty() || !pw_new2.is_empty();
    if changing_password {
        if pw_current.is_empty() {
            set_field_error("sett-pw-current", "Ingresa tu contrasena actual");
            return;
        }
        if !is_strong_password(&pw_new) {
            set_field_error("sett-pw-new", "Minimo 8 caracteres, mayuscula, numero y simbolo");
            return;
        }
        if pw_new != pw_new2 {
            set_field_error("sett-pw-new2", "Las contrasenas no coinciden");
            return;
        }
    }

    save_btn.set_disabled(true);
    components::show_loading("Guardando cambios...");

    spawn_local(async move {
        let result = apply_changes(&display_name, &username, &email, &pw_current, &pw_new, changing_password).await;
        components::hide_loading();
        save_btn.set_disabled(false);
        match result {
            Ok(()) => {
                components::show_toast("Cambios guardados", ToastKind::Success);
                state::with_session(|s| {
                    if let Some(mut p) = s.profile().cloned() {
                        p.display_name = display_name.clone();
                        p.username = username.clone();
                        p.email = email.clone();
                        s.set_profile(Some(p));
                    }
                });
            }
            Err(code) => {
                if let Some(banner) = dom::by_id("settings-error") {
                    banner.set_text_content(Some(auth_message(&code)));
                    dom::remove_class(&banner, "hidden");
                }
            }
        }
    });
}

/// Reauthenticate when credentials change, then run every update in
/// one batch. No compensation on partial failure: the error surfaces
/// and the user retries, same as a fresh save.
async fn apply_changes(
    display_name: &str,
    username: &str,
    email: &str,
    pw_current: &str,
    pw_new: &str,
    changing_password: bool,
) -> Result<(), String> {
    let Some(user) = firebase::auth().current_user() else {
        return Err(String::new());
    };
    let current_email = user.email().unwrap_or_default();
    let email_changed = email != current_email;

    if changing_password || email_changed {
        let credential = firebase::email_credential(&current_email, pw_current);
        firebase::call(user.reauthenticate_with_credential(&credential)).await?;
    }

    let updates = js_sys::Array::new();
    if email_changed {
        updates.push(&user.update_email(email));
    }
    if changing_password && !pw_new.is_empty() {
        updates.push(&user.update_password(pw_new));
    }

    let auth_profile = js_sys::Object::new();
    firebase::obj_set(&auth_profile, "displayName", &JsValue::from_str(display_name));
    updates.push(&user.update_profile(&auth_profile));

    let doc = js_sys::Object::new();
    firebase::obj_set(
        &doc,
        "displayName",
        &JsValue::from_str(&escape_html(display_name)),
    );
    firebase::obj_set(&doc, "username", &JsValue::from_str(&escape_html(username)));
    firebase::obj_set(&doc, "email", &JsValue::from_str(email));
    updates.push(&firebase::user_doc(&user.uid()).update(&doc));

    firebase::call(js_sys::Promise::all(&updates)).await?;
    Ok(())
}

// ── Help ──

struct Contact {
    icon: &'static str,
    label: &'static str,
    sub: &'static str,
    href: &'static str,
    color: &'static str,
}

const CONTACTS: [Contact; 3] = [
    Contact {
        icon: "email",
        label: "Correo electronico",
        sub: "desarrollador@correo.com",
        href: "mailto:desarrollador@correo.com",
        color: "var(--accent)",
    },
    Contact {
        icon: "code",
        label: "GitHub",
        sub: "github.com/tu-usuario/cumbre",
        href: "https://github.com/tu-usuario/cumbre",
        color: "#c9d1d9",
    },
    Contact {
        icon: "chat_bubble",
        label: "WhatsApp",
        sub: "+57 300 000 0000",
        href: "https://wa.me/573000000000",
        color: "#25D366",
    },
];

pub fn render_help(app: &Element) {
    let container = dom::create_element("div");
    container.set_class_name("min-h-screen screen-enter");
    container.append_child(&back_topbar("Ayuda", "help-back")).unwrap();

    let content = dom::create_element("div");
    content.set_class_name("content-area");

    let card = dom::create_element("div");
    card.set_inner_html(
        r#"
    <div class="mb-6">
      <h3 class="section-title mb-1">Contacta al desarrollador</h3>
      <p class="text-sm" style="color:var(--text-muted);font-weight:500">
        Si tienes dudas, sugerencias o encontraste un bug, no dudes en escribir.
      </p>
    </div>
    "#,
    );

    for contact in &CONTACTS {
        let link = dom::create_element("a");
        link.set_class_name("contact-btn mb-3");
        let _ = link.set_attribute("href", contact.href);
        let _ = link.set_attribute("target", "_blank");
        let _ = link.set_attribute("rel", "noopener noreferrer");
        link.set_inner_html(&format!(
            r#"
      <div style="
        width:42px; height:42px; border-radius:12px;
        background:rgba(115,213,226,0.08);
        display:flex; align-items:center; justify-content:center; flex-shrink:0;
      ">
        <span class="material-icons-round" style="color:{color}">{icon}</span>
      </div>
      <div>
        <p class="font-bold text-sm">{label}</p>
        <p class="text-xs" style="color:var(--text-muted);font-weight:500">{sub}</p>
      </div>
      <span class="material-icons-round ml-auto" style="color:var(--text-muted);font-size:1rem">open_in_new</span>
      "#,
            color = contact.color,
            icon = contact.icon,
            label = contact.label,
            sub = contact.sub,
        ));
        card.append_child(&link).unwrap();
    }

    content.append_child(&card).unwrap();
    container.append_child(&content).unwrap();
    app.append_child(&container).unwrap();
}
