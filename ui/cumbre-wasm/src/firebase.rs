//! Bindings to the Firebase compat SDK loaded by the host page.
//!
//! All remote traffic goes through here: the auth service, the
//! per-user profile document and the goal subcollection. Rejected
//! promises are reduced to their provider error code; screens map the
//! code to a user-facing message via `cumbre_core::errors`.

use chrono::{DateTime, NaiveDate, Utc};
use cumbre_core::goal::Goal;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    /// `firebase.auth()`
    #[wasm_bindgen(js_namespace = firebase, js_name = auth)]
    pub fn auth() -> Auth;

    /// `firebase.firestore()`
    #[wasm_bindgen(js_namespace = firebase, js_name = firestore)]
    pub fn firestore() -> Firestore;

    /// `firebase.auth.EmailAuthProvider.credential(email, password)`
    #[wasm_bindgen(js_namespace = ["firebase", "auth", "EmailAuthProvider"], js_name = credential)]
    pub fn email_credential(email: &str, password: &str) -> JsValue;

    /// `firebase.firestore.FieldValue.serverTimestamp()` — the write
    /// sentinel used for creation/update/completion times.
    #[wasm_bindgen(js_namespace = ["firebase", "firestore", "FieldValue"], js_name = serverTimestamp)]
    pub fn server_timestamp() -> JsValue;

    pub type Auth;

    /// Fires once on load with the persisted session (or none) and
    /// again on every sign-in/sign-out. Returns the unsubscribe handle.
    #[wasm_bindgen(method, js_name = onAuthStateChanged)]
    pub fn on_auth_state_changed(this: &Auth, observer: &js_sys::Function) -> js_sys::Function;

    #[wasm_bindgen(method, js_name = signInWithEmailAndPassword)]
    pub fn sign_in_with_email_and_password(this: &Auth, email: &str, password: &str)
    -> js_sys::Promise;

    #[wasm_bindgen(method, js_name = createUserWithEmailAndPassword)]
    pub fn create_user_with_email_and_password(
        this: &Auth,
        email: &str,
        password: &str,
    ) -> js_sys::Promise;

    #[wasm_bindgen(method, js_name = signOut)]
    pub fn sign_out(this: &Auth) -> js_sys::Promise;

    #[wasm_bindgen(method, js_name = sendPasswordResetEmail)]
    pub fn send_password_reset_email(this: &Auth, email: &str) -> js_sys::Promise;

    #[wasm_bindgen(method, js_name = verifyPasswordResetCode)]
    pub fn verify_password_reset_code(this: &Auth, code: &str) -> js_sys::Promise;

    #[wasm_bindgen(method, js_name = confirmPasswordReset)]
    pub fn confirm_password_reset(this: &Auth, code: &str, new_password: &str) -> js_sys::Promise;

    #[wasm_bindgen(method, getter, js_name = currentUser)]
    pub fn current_user(this: &Auth) -> Option<User>;

    pub type User;

    #[wasm_bindgen(method, getter)]
    pub fn uid(this: &User) -> String;

    #[wasm_bindgen(method, getter)]
    pub fn email(this: &User) -> Option<String>;

    #[wasm_bindgen(method, getter, js_name = displayName)]
    pub fn display_name(this: &User) -> Option<String>;

    #[wasm_bindgen(method, js_name = updateProfile)]
    pub fn update_profile(this: &User, profile: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(method, js_name = updateEmail)]
    pub fn update_email(this: &User, email: &str) -> js_sys::Promise;

    #[wasm_bindgen(method, js_name = updatePassword)]
    pub fn update_password(this: &User, password: &str) -> js_sys::Promise;

    #[wasm_bindgen(method, js_name = reauthenticateWithCredential)]
    pub fn reauthenticate_with_credential(this: &User, credential: &JsValue) -> js_sys::Promise;

    pub type Firestore;

    #[wasm_bindgen(method)]
    pub fn collection(this: &Firestore, path: &str) -> CollectionRef;

    pub type CollectionRef;

    #[wasm_bindgen(method)]
    pub fn doc(this: &CollectionRef, id: &str) -> DocRef;

    #[wasm_bindgen(method)]
    pub fn add(this: &CollectionRef, data: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(method, js_name = orderBy)]
    pub fn order_by(this: &CollectionRef, field: &str, direction: &str) -> Query;

    pub type DocRef;

    #[wasm_bindgen(method)]
    pub fn collection(this: &DocRef, path: &str) -> CollectionRef;

    #[wasm_bindgen(method)]
    pub fn get(this: &DocRef) -> js_sys::Promise;

    #[wasm_bindgen(method)]
    pub fn set(this: &DocRef, data: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(method)]
    pub fn update(this: &DocRef, data: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(method)]
    pub fn delete(this: &DocRef) -> js_sys::Promise;

    pub type Query;

    /// Live subscription. Returns the unsubscribe handle; exactly one
    /// may be active per dashboard mount.
    #[wasm_bindgen(method, js_name = onSnapshot)]
    pub fn on_snapshot(
        this: &Query,
        next: &js_sys::Function,
        error: &js_sys::Function,
    ) -> js_sys::Function;

    pub type QuerySnapshot;

    #[wasm_bindgen(method, getter)]
    pub fn docs(this: &QuerySnapshot) -> js_sys::Array;

    pub type QueryDoc;

    #[wasm_bindgen(method, getter)]
    pub fn id(this: &QueryDoc) -> String;

    #[wasm_bindgen(method)]
    pub fn data(this: &QueryDoc) -> JsValue;

    pub type DocSnapshot;

    #[wasm_bindgen(method, getter)]
    pub fn exists(this: &DocSnapshot) -> bool;

    #[wasm_bindgen(method)]
    pub fn data(this: &DocSnapshot) -> JsValue;

    pub type Timestamp;

    #[wasm_bindgen(method, js_name = toMillis)]
    pub fn to_millis(this: &Timestamp) -> f64;
}

// ── Collection shortcuts ──

pub fn user_doc(uid: &str) -> DocRef {
    firestore().collection("users").doc(uid)
}

pub fn goals(uid: &str) -> CollectionRef {
    user_doc(uid).collection("goals")
}

pub fn goal_doc(uid: &str, goal_id: &str) -> DocRef {
    goals(uid).doc(goal_id)
}

// ── Promise and payload helpers ──

/// Await a Firebase promise, reducing a rejection to its error code.
pub async fn call(promise: js_sys::Promise) -> Result<JsValue, String> {
    JsFuture::from(promise).await.map_err(|e| error_code(&e))
}

/// Extract `error.code`; absent or non-string codes yield an empty
/// string, which the message table maps to the generic fallback.
pub fn error_code(err: &JsValue) -> String {
    js_sys::Reflect::get(err, &JsValue::from_str("code"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}

pub fn obj_set(obj: &js_sys::Object, key: &str, value: &JsValue) {
    let _ = js_sys::Reflect::set(obj, &JsValue::from_str(key), value);
}

// ── Goal document decoding ──

fn field(data: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(data, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn str_field(data: &JsValue, key: &str) -> String {
    field(data, key).as_string().unwrap_or_default()
}

fn bool_field(data: &JsValue, key: &str) -> bool {
    field(data, key).as_bool().unwrap_or(false)
}

/// Server timestamps arrive as Firestore `Timestamp` objects; a write
/// whose sentinel has not resolved yet reads back as null.
fn timestamp_field(data: &JsValue, key: &str) -> Option<DateTime<Utc>> {
    let v = field(data, key);
    if v.is_null() || v.is_undefined() {
        return None;
    }
    let millis = v.unchecked_into::<Timestamp>().to_millis();
    DateTime::from_timestamp_millis(millis as i64)
}

/// Decode one document of the goal subcollection.
pub fn goal_from_doc(doc: &QueryDoc) -> Goal {
    let data = doc.data();
    let deadline = {
        let raw = str_field(&data, "deadline");
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok()
    };
    Goal {
        id: doc.id(),
        title: str_field(&data, "title"),
        details: str_field(&data, "details"),
        deadline,
        completed: bool_field(&data, "completed"),
        completed_at: timestamp_field(&data, "completedAt"),
        created_at: timestamp_field(&data, "createdAt"),
        updated_at: timestamp_field(&data, "updatedAt"),
    }
}
