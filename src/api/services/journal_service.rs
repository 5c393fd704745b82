use tokio::runtime::Runtime;

use crate::api::services::session_service::HostSession;
use crate::modules::journal::MoodTag;

pub fn submit_entry(session: &mut HostSession, runtime: &Runtime, text: &str, tag: MoodTag) -> Result<String, String> {
    let entry = runtime
        .block_on(session.controller.submit(text, tag))
        .map_err(|e| format!("Failed to submit mood: {}", e))?;

    let response = match entry {
        Some(entry) => serde_json::json!({ "submitted": true, "entry": entry }),
        None => serde_json::json!({ "submitted": false }),
    };
    Ok(response.to_string())
}

pub fn connect_session_device(session: &mut HostSession) -> Result<String, String> {
    session
        .controller
        .connect()
        .map(|_| "Device connected".to_string())
        .map_err(|e| format!("Failed to connect device: {}", e))
}

pub fn get_log_json(session: &HostSession) -> Result<String, String> {
    let log = session
        .controller
        .log()
        .map_err(|e| format!("Failed to load mood log: {}", e))?;

    serde_json::to_string(&log).map_err(|e| format!("Failed to serialize mood log: {}", e))
}

pub fn get_cards_json(session: &HostSession) -> Result<String, String> {
    serde_json::to_string(&session.cards.cards()).map_err(|e| format!("Failed to serialize cards: {}", e))
}
