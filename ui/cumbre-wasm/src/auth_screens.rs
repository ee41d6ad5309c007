//! Authentication screens: login, registration, password recovery and
//! the reset-confirmation screen reached from the email deep link.

use cumbre_core::errors::auth_message;
use cumbre_core::route::Screen;
use cumbre_core::validate::{escape_html, is_strong_password, is_valid_email};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::components::{
    self, ButtonVariant, FieldSpec, ToastKind, clear_field_errors, create_button, create_field,
    set_field_error,
};
use crate::{dom, firebase, onboarding, router, state};

const BANNER_CLASSES: &str = "hidden text-sm font-semibold text-center py-2 px-3 rounded-lg mb-3";

fn reset_banner(el: &Element) {
    el.set_class_name(BANNER_CLASSES);
}

fn show_error_banner(el: &Element, message: &str) {
    el.set_text_content(Some(message));
    dom::set_style(el, "background", "rgba(226,115,115,0.1)");
    dom::set_style(el, "color", "var(--danger)");
    dom::remove_class(el, "hidden");
}

fn show_success_banner(el: &Element, message: &str) {
    el.set_text_content(Some(message));
    dom::set_style(el, "background", "rgba(115,226,160,0.1)");
    dom::set_style(el, "color", "var(--success)");
    dom::remove_class(el, "hidden");
}

fn on_enter(page: &Element, f: fn()) {
    dom::listen(page, "keydown", move |e| {
        let ke: web_sys::KeyboardEvent = e.unchecked_into();
        if ke.key() == "Enter" {
            f();
        }
    });
}

// ── Login ──

pub fn render_login(app: &Element) {
    let page = dom::create_element("div");
    page.set_class_name("page-container screen-enter");
    page.set_inner_html(
        r##"
    <div class="auth-card">
      <div class="app-icon">
        <span class="material-icons-round" style="font-size:2rem;color:var(--accent)">flag</span>
      </div>
      <h1 class="text-center font-black text-2xl mb-1" style="color:var(--text);letter-spacing:-0.03em">
        Cumbre
      </h1>
      <p class="text-center text-sm mb-6" style="color:var(--text-muted);font-weight:500">Alcanza cada meta</p>

      <h2 class="text-base font-bold mb-5" style="color:var(--text-muted);text-transform:uppercase;letter-spacing:0.07em;font-size:0.75rem">
        Iniciar sesion
      </h2>

      <div id="login-fields"></div>

      <div id="login-error" class="hidden text-sm font-semibold text-center py-2 px-3 rounded-lg mb-3"
        style="background:rgba(226,115,115,0.1);color:var(--danger)"></div>

      <button class="btn btn-primary w-full mt-1" id="login-btn" type="button">
        <span class="material-icons-round" style="font-size:1.1rem">login</span>
        <span>Entrar</span>
      </button>

      <div class="text-center mt-5 flex flex-col gap-2">
        <a href="#recover" id="link-recover"
          class="text-xs font-semibold hover:underline"
          style="color:var(--text-muted)">
          Olvide mi contrasena
        </a>
        <a href="#register" id="link-register"
          class="text-sm font-bold hover:underline"
          style="color:var(--accent)">
          Crear cuenta nueva
        </a>
      </div>
    </div>
    "##,
    );
    app.append_child(&page).unwrap();

    let fields = dom::by_id("login-fields").unwrap();
    fields
        .append_child(&create_field(
            &FieldSpec::new("login-email", "Correo electronico")
                .email()
                .placeholder("tu@correo.com")
                .required(),
        ))
        .unwrap();
    fields
        .append_child(&create_field(
            &FieldSpec::new("login-password", "Contrasena")
                .password()
                .placeholder("••••••••")
                .required(),
        ))
        .unwrap();

    if let Some(link) = dom::by_id("link-recover") {
        dom::listen(&link, "click", |e| {
            e.prevent_default();
            router::navigate(Screen::Recover);
        });
    }
    if let Some(link) = dom::by_id("link-register") {
        dom::listen(&link, "click", |e| {
            e.prevent_default();
            router::navigate(Screen::Register);
        });
    }
    if let Some(btn) = dom::by_id("login-btn") {
        dom::listen(&btn, "click", |_| handle_login());
    }
    on_enter(&page, handle_login);

    onboarding::maybe_show_welcome();
}

fn handle_login() {
    let email = dom::input_value("login-email");
    let password = dom::input_value("login-password");
    if let Some(banner) = dom::by_id("login-error") {
        dom::add_class(&banner, "hidden");
    }
    clear_field_errors(&["login-email", "login-password"]);

    let mut has_error = false;
    if email.is_empty() {
        set_field_error("login-email", "Ingresa tu correo");
        has_error = true;
    } else if !is_valid_email(&email) {
        set_field_error("login-email", "Correo no valido");
        has_error = true;
    }
    if password.is_empty() {
        set_field_error("login-password", "Ingresa tu contrasena");
        has_error = true;
    }
    if has_error {
        return;
    }

    components::show_loading("Iniciando sesion...");
    spawn_local(async move {
        let signin = firebase::auth().sign_in_with_email_and_password(&email, &password);
        match firebase::call(signin).await {
            // The auth observer takes it from here.
            Ok(_) => {}
            Err(code) => {
                components::hide_loading();
                if let Some(banner) = dom::by_id("login-error") {
                    show_error_banner(&banner, auth_message(&code));
                }
            }
        }
    });
}

// ── Registration ──

pub fn render_register(app: &Element) {
    let page = dom::create_element("div");
    page.set_class_name("page-container screen-enter");
    dom::set_style(&page, "justify-content", "flex-start");
    dom::set_style(&page, "padding-top", "2rem");

    let card = dom::create_element("div");
    card.set_class_name("auth-card");

    let header = dom::create_element("div");
    header.set_class_name("flex items-center gap-3 mb-6");
    let back_btn = dom::create_element("button");
    back_btn.set_class_name("btn btn-ghost");
    dom::set_style(&back_btn, "min-width", "0");
    dom::set_style(&back_btn, "padding", "0.35rem");
    back_btn.set_inner_html(r#"<span class="material-icons-round">arrow_back</span>"#);
    dom::listen(&back_btn, "click", |_| router::navigate(Screen::Login));
    let heading = dom::create_element("h2");
    heading.set_class_name("font-black text-xl");
    dom::set_style(&heading, "color", "var(--text)");
    heading.set_text_content(Some("Registrarse"));
    header.append_child(&back_btn).unwrap();
    header.append_child(&heading).unwrap();
    card.append_child(&header).unwrap();

    let fields = dom::create_element("div");
    for spec in [
        FieldSpec::new("reg-firstname", "Nombre")
            .placeholder("Juan")
            .required(),
        FieldSpec::new("reg-lastname", "Apellido (opcional)").placeholder("Perez"),
        FieldSpec::new("reg-username", "Nombre de usuario")
            .placeholder("@juanperez")
            .required(),
        FieldSpec::new("reg-email", "Correo electronico")
            .email()
            .placeholder("tu@correo.com")
            .required(),
        FieldSpec::new("reg-password", "Contrasena")
            .password()
            .placeholder("8+ caracteres, mayus, numero, simbolo")
            .required(),
        FieldSpec::new("reg-password2", "Repetir contrasena")
            .password()
            .placeholder("••••••••")
            .required(),
    ] {
        fields.append_child(&create_field(&spec)).unwrap();
    }
    card.append_child(&fields).unwrap();

    let banner = dom::create_element("div");
    banner.set_id("reg-error");
    banner.set_class_name(BANNER_CLASSES);
    card.append_child(&banner).unwrap();

    let submit = create_button("Crear cuenta", "person_add", ButtonVariant::Primary, true);
    card.append_child(&submit).unwrap();

    page.append_child(&card).unwrap();
    app.append_child(&page).unwrap();

    dom::listen(&submit, "click", |_| handle_register());
    on_enter(&page, handle_register);
}

fn handle_register() {
    let firstname = dom::input_value("reg-firstname");
    let lastname = dom::input_value("reg-lastname");
    let username = dom::input_value("reg-username");
    let email = dom::input_value("reg-email");
    let password = dom::input_value("reg-password");
    let password2 = dom::input_value("reg-password2");

    if let Some(banner) = dom::by_id("reg-error") {
        dom::add_class(&banner, "hidden");
    }
    clear_field_errors(&[
        "reg-firstname",
        "reg-username",
        "reg-email",
        "reg-password",
        "reg-password2",
    ]);

    let mut has_error = false;

    if firstname.is_empty() {
        set_field_error("reg-firstname", "Ingresa tu nombre");
        has_error = true;
    }
    if username.is_empty() {
        set_field_error("reg-username", "Elige un nombre de usuario");
        has_error = true;
    } else if username.chars().count() < 3 {
        set_field_error("reg-username", "Minimo 3 caracteres");
        has_error = true;
    }

    if email.is_empty() {
        set_field_error("reg-email", "Ingresa tu correo");
        has_error = true;
    } else if !is_valid_email(&email) {
        set_field_error("reg-email", "Correo no valido");
        has_error = true;
    }

    if password.is_empty() {
        set_field_error("reg-password", "Ingresa una contrasena");
        has_error = true;
    } else if !is_strong_password(&password) {
        set_field_error(
            "reg-password",
            "Minimo 8 caracteres, una mayuscula, un numero y un simbolo",
        );
        has_error = true;
    }

    if password2.is_empty() {
        set_field_error("reg-password2", "Repite la contrasena");
        has_error = true;
    } else if password != password2 {
        set_field_error("reg-password2", "Las contrasenas no coinciden");
        has_error = true;
    }

    if has_error {
        return;
    }

    components::show_loading("Creando tu cuenta...");
    spawn_local(async move {
        if let Err(code) = register(&firstname, &lastname, &username, &email, &password).await {
            components::hide_loading();
            if let Some(banner) = dom::by_id("reg-error") {
                show_error_banner(&banner, auth_message(&code));
            }
        }
        // On success the auth observer redirects.
    });
}

async fn register(
    firstname: &str,
    lastname: &str,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), String> {
    let signup = firebase::auth().create_user_with_email_and_password(email, password);
    let credential = firebase::call(signup).await?;
    let user: firebase::User =
        js_sys::Reflect::get(&credential, &JsValue::from_str("user"))
            .map_err(|e| firebase::error_code(&e))?
            .unchecked_into();

    let display_name = if lastname.is_empty() {
        firstname.to_string()
    } else {
        format!("{firstname} {lastname}")
    };

    let profile = js_sys::Object::new();
    firebase::obj_set(&profile, "displayName", &JsValue::from_str(&display_name));
    firebase::call(user.update_profile(&profile)).await?;

    // Profile fields are sanitized before persisting, matching the
    // render path which escapes again on output.
    let doc = js_sys::Object::new();
    firebase::obj_set(&doc, "firstname", &JsValue::from_str(&escape_html(firstname)));
    firebase::obj_set(&doc, "lastname", &JsValue::from_str(&escape_html(lastname)));
    firebase::obj_set(&doc, "username", &JsValue::from_str(&escape_html(username)));
    firebase::obj_set(&doc, "email", &JsValue::from_str(email));
    firebase::obj_set(
        &doc,
        "displayName",
        &JsValue::from_str(&escape_html(&display_name)),
    );
    firebase::obj_set(&doc, "createdAt", &firebase::server_timestamp());
    firebase::call(firebase::user_doc(&user.uid()).set(&doc)).await?;

    Ok(())
}

// ── Password recovery request ──

pub fn render_recover(app: &Element) {
    let page = dom::create_element("div");
    page.set_class_name("page-container screen-enter");

    let card = dom::create_element("div");
    card.set_class_name("auth-card");
    card.set_inner_html(
        r#"
    <div class="flex items-center gap-3 mb-6">
      <button id="back-btn" class="btn btn-ghost" style="min-width:0;padding:0.35rem">
        <span class="material-icons-round">arrow_back</span>
      </button>
      <h2 class="font-black text-xl" style="color:var(--text)">Recuperar contrasena</h2>
    </div>
    <p class="text-sm mb-5" style="color:var(--text-muted);line-height:1.6;font-weight:500">
      Ingresa tu correo y te enviaremos un enlace para restablecer tu contrasena.
    </p>
    <div id="recover-fields"></div>
    <div id="recover-msg" class="hidden text-sm font-semibold text-center py-2 px-3 rounded-lg mb-3"></div>
    "#,
    );

    if let Some(back) = dom::query_within(&card, "#back-btn") {
        dom::listen(&back, "click", |_| router::navigate(Screen::Login));
    }

    if let Some(fields) = dom::query_within(&card, "#recover-fields") {
        fields
            .append_child(&create_field(
                &FieldSpec::new("recover-email", "Correo electronico")
                    .email()
                    .placeholder("tu@correo.com")
                    .required(),
            ))
            .unwrap();
    }

    let submit = create_button("Enviar enlace", "send", ButtonVariant::Primary, true);
    card.append_child(&submit).unwrap();
    page.append_child(&card).unwrap();
    app.append_child(&page).unwrap();

    let submit2 = submit.clone();
    dom::listen(&submit, "click", move |_| {
        let email = dom::input_value("recover-email");
        let Some(banner) = dom::by_id("recover-msg") else {
            return;
        };
        reset_banner(&banner);
        clear_field_errors(&["recover-email"]);

        if email.is_empty() {
            set_field_error("recover-email", "Ingresa tu correo");
            return;
        }
        if !is_valid_email(&email) {
            set_field_error("recover-email", "Correo no valido");
            return;
        }

        submit2.set_disabled(true);
        components::show_loading("Enviando enlace...");

        let submit = submit2.clone();
        spawn_local(async move {
            let send = firebase::auth().send_password_reset_email(&email);
            match firebase::call(send).await {
                Ok(_) => {
                    components::hide_loading();
                    // Stays disabled so the link is requested once.
                    if let Some(banner) = dom::by_id("recover-msg") {
                        show_success_banner(&banner, "Enlace enviado. Revisa tu correo.");
                    }
                }
                Err(code) => {
                    components::hide_loading();
                    submit.set_disabled(false);
                    if let Some(banner) = dom::by_id("recover-msg") {
                        show_error_banner(&banner, auth_message(&code));
                    }
                }
            }
        });
    });
}

// ── Reset confirmation (from the email link) ──

const RESET_NAV_DELAY_MS: u32 = 1_200;

pub fn render_reset_password(app: &Element, oob_code: &str) {
    let page = dom::create_element("div");
    page.set_class_name("page-container screen-enter");

    let card = dom::create_element("div");
    card.set_class_name("auth-card");
    card.set_inner_html(
        r#"
    <div class="app-icon mb-5">
      <span class="material-icons-round" style="font-size:2rem;color:var(--accent)">lock_reset</span>
    </div>
    <h2 class="font-black text-xl mb-2 text-center" style="color:var(--text)">Nueva contrasena</h2>
    <p class="text-sm mb-5 text-center" style="color:var(--text-muted);font-weight:500">
      Elige una contrasena segura para tu cuenta.
    </p>
    <div id="reset-fields"></div>
    <div id="reset-msg" class="hidden text-sm font-semibold text-center py-2 px-3 rounded-lg mb-3"></div>
    "#,
    );

    if let Some(fields) = dom::query_within(&card, "#reset-fields") {
        fields
            .append_child(&create_field(
                &FieldSpec::new("reset-password", "Nueva contrasena")
                    .password()
                    .placeholder("8+ caracteres")
                    .required(),
            ))
            .unwrap();
        fields
            .append_child(&create_field(
                &FieldSpec::new("reset-password2", "Repetir contrasena")
                    .password()
                    .placeholder("••••••••")
                    .required(),
            ))
            .unwrap();
    }

    let submit = create_button("Guardar cambios", "save", ButtonVariant::Primary, true);
    card.append_child(&submit).unwrap();
    page.append_child(&card).unwrap();
    app.append_child(&page).unwrap();

    let oob_code = oob_code.to_string();
    let submit2 = submit.clone();
    dom::listen(&submit, "click", move |_| {
        let password = dom::input_value("reset-password");
        let password2 = dom::input_value("reset-password2");
        let Some(banner) = dom::by_id("reset-msg") else {
            return;
        };
        reset_banner(&banner);
        clear_field_errors(&["reset-password", "reset-password2"]);

        if password.is_empty() {
            set_field_error("reset-password", "Ingresa la nueva contrasena");
            return;
        }
        if !is_strong_password(&password) {
            set_field_error(
                "reset-password",
                "Minimo 8 caracteres, mayuscula, numero y simbolo",
            );
            return;
        }
        if password != password2 {
            set_field_error("reset-password2", "Las contrasenas no coinciden");
            return;
        }

        submit2.set_disabled(true);
        components::show_loading("Guardando...");

        let oob_code = oob_code.clone();
        let submit = submit2.clone();
        spawn_local(async move {
            let result: Result<(), String> = async {
                firebase::call(firebase::auth().verify_password_reset_code(&oob_code)).await?;
                firebase::call(firebase::auth().confirm_password_reset(&oob_code, &password))
                    .await?;
                Ok(())
            }
            .await;

            components::hide_loading();
            match result {
                Ok(()) => {
                    components::show_toast(
                        "Contrasena actualizada. Inicia sesion.",
                        ToastKind::Success,
                    );
                    gloo_timers::future::TimeoutFuture::new(RESET_NAV_DELAY_MS).await;
                    router::navigate(Screen::Login);
                }
                Err(_) => {
                    // Expired and malformed codes read the same to the user.
                    submit.set_disabled(false);
                    if let Some(banner) = dom::by_id("reset-msg") {
                        show_error_banner(
                            &banner,
                            "El enlace expiro o no es valido. Solicita uno nuevo.",
                        );
                    }
                }
            }
        });
    });
}

// ── Logout ──

/// Sign out with the farewell screen. The session moves to
/// `LoggingOut` first so the observer's redirect is swallowed; the
/// goodbye callback performs the navigation itself.
pub fn handle_logout() {
    let name = state::display_name();
    state::with_session(|s| s.begin_logout());

    spawn_local(async move {
        match firebase::call(firebase::auth().sign_out()).await {
            Ok(_) => {
                components::show_goodbye(&name, || {
                    state::with_session(|s| s.finish_logout());
                    router::navigate(Screen::Login);
                });
            }
            Err(_) => {
                state::with_session(|s| s.finish_logout());
                router::navigate(Screen::Login);
            }
        }
    });
}
