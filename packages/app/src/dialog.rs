use dioxus::document;
use dioxus::logger::tracing::warn;

/// Shows `message` in the platform's blocking alert dialog.
///
/// The payload is embedded as a JS string literal, so whatever the provider
/// serialized is displayed verbatim. Headless builds have no document to
/// evaluate against; the failure is logged and the message dropped.
pub async fn alert(message: &str) {
    let Ok(literal) = serde_json::to_string(message) else {
        return;
    };
    if let Err(error) = document::eval(&format!("alert({literal})")).await {
        warn!(?error, "alert dialog unavailable, dropping location error");
    }
}
