use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tokio::runtime::Runtime;

use crate::api::types::{ApiResult, SessionId};
use crate::config::JournalConfig;
use crate::modules::card::CardLog;
use crate::modules::session::{JournalError, LogNotifier, SessionController};

lazy_static! {
    static ref JOURNAL_SESSIONS: Mutex<HashMap<SessionId, SharedSession>> = Mutex::new(HashMap::new());
}

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Each session locks on its own; the registry lock is only held for lookups.
pub type SharedSession = Arc<Mutex<HostSession>>;

/// A controller plus the card container the host reads back.
pub struct HostSession {
    pub controller: SessionController,
    pub cards: CardLog,
}

impl HostSession {
    pub fn from_config(config: &JournalConfig) -> Result<Self, JournalError> {
        let cards = CardLog::new();
        let controller =
            SessionController::from_config(config, Box::new(cards.clone()), Box::new(LogNotifier))?;
        Ok(Self { controller, cards })
    }
}

pub fn initialize_runtime() -> Result<(), *mut ApiResult> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| ApiResult::raw_error(format!("Failed to start runtime: {}", e)))?;

    RUNTIME
        .set(runtime)
        .map_err(|_| ApiResult::raw_error("Runtime already initialized"))?;

    Ok(())
}

pub fn runtime() -> Result<&'static Runtime, *mut ApiResult> {
    RUNTIME
        .get()
        .ok_or_else(|| ApiResult::raw_error("Runtime not initialized. Call initialize_journal_runtime first."))
}

pub fn get_sessions() -> Result<MutexGuard<'static, HashMap<SessionId, SharedSession>>, *mut ApiResult> {
    JOURNAL_SESSIONS
        .lock()
        .map_err(|_| ApiResult::raw_error("Failed to acquire session lock - mutex poisoned"))
}

pub fn create_session(session_id: SessionId, session: HostSession) -> Result<(), *mut ApiResult> {
    let mut sessions = get_sessions()?;
    if sessions.contains_key(&session_id) {
        return Err(ApiResult::raw_error(format!("Journal session '{}' already exists", session_id)));
    }
    sessions.insert(session_id, Arc::new(Mutex::new(session)));
    Ok(())
}

pub fn remove_session(session_id: &SessionId) -> Result<(), *mut ApiResult> {
    let mut sessions = get_sessions()?;
    if sessions.remove(session_id).is_none() {
        return Err(ApiResult::raw_error(format!("Journal session '{}' not found", session_id)));
    }
    Ok(())
}

pub fn with_session<F>(session_id: &SessionId, f: F) -> *mut ApiResult
where
    F: FnOnce(&mut HostSession, &Runtime) -> Result<String, String>,
{
    let runtime = match runtime() {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let session = {
        let sessions = match get_sessions() {
            Ok(sessions) => sessions,
            Err(result) => return result,
        };
        match sessions.get(session_id) {
            Some(session) => Arc::clone(session),
            None => {
                return ApiResult::raw_error(format!(
                    "Journal session '{}' not found. Call create_journal_session first.",
                    session_id
                ))
            }
        }
    };

    let mut session = match session.lock() {
        Ok(session) => session,
        Err(_) => return ApiResult::raw_error(format!("Journal session '{}' is poisoned", session_id)),
    };

    match f(&mut session, runtime) {
        Ok(data) => ApiResult::raw_success(data),
        Err(error) => ApiResult::raw_error(error),
    }
}
