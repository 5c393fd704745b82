use std::ffi::CString;
use std::os::raw::c_char;

#[repr(C)]
pub struct ApiResult {
    pub success: u8,
    pub data: *mut c_char,
    pub error: *mut c_char,
}

pub type SessionId = String;

fn into_c_string(text: String, fallback: &str) -> *mut c_char {
    match CString::new(text) {
        Ok(cstring) => cstring.into_raw(),
        Err(_) => CString::new(fallback)
            .expect("Hardcoded fallback string should be valid")
            .into_raw(),
    }
}

impl ApiResult {
    pub fn success(data: String) -> Self {
        Self {
            success: 1,
            data: into_c_string(data, "Data contains invalid characters"),
            error: std::ptr::null_mut(),
        }
    }

    pub fn error(error: String) -> Self {
        Self {
            success: 0,
            data: std::ptr::null_mut(),
            error: into_c_string(error, "Error message contains invalid characters"),
        }
    }

    pub fn into_raw(self) -> *mut ApiResult {
        Box::into_raw(Box::new(self))
    }

    pub fn raw_success(data: String) -> *mut ApiResult {
        Self::success(data).into_raw()
    }

    pub fn raw_error(error: impl Into<String>) -> *mut ApiResult {
        Self::error(error.into()).into_raw()
    }
}
