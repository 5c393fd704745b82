use std::ffi::CStr;
use std::os::raw::c_char;

use crate::api::types::ApiResult;
use crate::config::JournalConfig;
use crate::modules::journal::MoodTag;

pub fn parse_c_string(ptr: *const c_char, field_name: &str) -> Result<String, *mut ApiResult> {
    if ptr.is_null() {
        return Err(ApiResult::raw_error(format!("{} is null", field_name)));
    }

    unsafe {
        match CStr::from_ptr(ptr).to_str() {
            Ok(s) => Ok(s.to_string()),
            Err(_) => Err(ApiResult::raw_error(format!("Invalid UTF-8 string for {}", field_name))),
        }
    }
}

pub fn parse_optional_c_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }

    unsafe {
        CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
    }
}

/// Null or blank config means defaults; environment overrides apply either way.
pub fn parse_config_json(config_json: Option<&str>) -> Result<JournalConfig, *mut ApiResult> {
    let mut config = match config_json.map(str::trim) {
        None | Some("") => JournalConfig::default(),
        Some(raw) => JournalConfig::from_json_str(raw)
            .map_err(|e| ApiResult::raw_error(format!("Failed to parse config: {}", e)))?,
    };
    config.apply_env_overrides();
    Ok(config)
}

pub fn validate_mood_text(text: &str) -> Result<(), *mut ApiResult> {
    if text.trim().is_empty() {
        return Err(ApiResult::raw_error("Mood text is empty"));
    }
    Ok(())
}

pub fn parse_tag(tag: &str) -> MoodTag {
    MoodTag::parse(tag)
}
