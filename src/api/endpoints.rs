use std::os::raw::c_char;

use crate::api::{
    types::ApiResult,
    services::{
        validation_service::*,
        session_service::{create_session, remove_session, with_session, initialize_runtime, HostSession},
        journal_service::{submit_entry, connect_session_device, get_log_json, get_cards_json},
    },
};

#[no_mangle]
pub extern "C" fn initialize_journal_runtime() -> *mut ApiResult {
    match initialize_runtime() {
        Ok(()) => ApiResult::raw_success("Runtime initialized successfully".to_string()),
        Err(result) => result,
    }
}

#[no_mangle]
pub extern "C" fn create_journal_session(config_json: *const c_char) -> *mut ApiResult {
    let session_id = uuid::Uuid::new_v4().to_string();

    let config_str = parse_optional_c_string(config_json);
    let config = match parse_config_json(config_str.as_deref()) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let mut session = match HostSession::from_config(&config) {
        Ok(session) => session,
        Err(e) => return ApiResult::raw_error(format!("Failed to create session: {}", e)),
    };

    if let Err(e) = session.controller.start() {
        return ApiResult::raw_error(format!("Failed to replay mood log: {}", e));
    }

    let response_data = serde_json::json!({
        "session_id": session_id,
        "cards": session.cards.cards(),
    }).to_string();

    if let Err(result) = create_session(session_id, session) {
        return result;
    }

    ApiResult::raw_success(response_data)
}

#[no_mangle]
pub extern "C" fn remove_journal_session(session_id: *const c_char) -> *mut ApiResult {
    let session_id_str = match parse_c_string(session_id, "Session ID string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    if let Err(result) = remove_session(&session_id_str) {
        return result;
    }

    ApiResult::raw_success(format!("Journal session '{}' removed successfully", session_id_str))
}

#[no_mangle]
pub extern "C" fn submit_mood(session_id: *const c_char, text: *const c_char, tag: *const c_char) -> *mut ApiResult {
    let session_id_str = match parse_c_string(session_id, "Session ID string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    let text_str = match parse_c_string(text, "Text string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    if let Err(result) = validate_mood_text(&text_str) {
        return result;
    }

    let tag_str = match parse_c_string(tag, "Tag string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    with_session(&session_id_str, |session, runtime| {
        submit_entry(session, runtime, text_str.trim(), parse_tag(&tag_str))
    })
}

#[no_mangle]
pub extern "C" fn connect_device(session_id: *const c_char) -> *mut ApiResult {
    let session_id_str = match parse_c_string(session_id, "Session ID string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    with_session(&session_id_str, |session, _| connect_session_device(session))
}

#[no_mangle]
pub extern "C" fn get_mood_log(session_id: *const c_char) -> *mut ApiResult {
    let session_id_str = match parse_c_string(session_id, "Session ID string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    with_session(&session_id_str, |session, _| get_log_json(session))
}

#[no_mangle]
pub extern "C" fn get_journal_cards(session_id: *const c_char) -> *mut ApiResult {
    let session_id_str = match parse_c_string(session_id, "Session ID string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    with_session(&session_id_str, |session, _| get_cards_json(session))
}

#[no_mangle]
pub extern "C" fn free_api_result(result: *mut ApiResult) {
    if result.is_null() {
        return;
    }

    unsafe {
        let result = Box::from_raw(result);
        if !result.data.is_null() {
            let _ = std::ffi::CString::from_raw(result.data);
        }
        if !result.error.is_null() {
            let _ = std::ffi::CString::from_raw(result.error);
        }
    }
}
