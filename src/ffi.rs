//! C FFI bindings for rucaptcha-solver.
//!
//! Provides a simple blocking API for solving captchas from C, Python, Go, etc.
//!
//! # Example (C)
//!
//! ```c
//! #include "rucaptcha_solver.h"
//!
//! int main() {
//!     RucaptchaResult result = rucaptcha_solve("api_key", "/tmp/captcha.png", 0);
//!     if (result.error_code == 0) {
//!         printf("%llu: %s\n", result.id, result.answer);
//!     }
//!     rucaptcha_free_result(result);
//!     return 0;
//! }
//! ```

use std::ffi::{c_char, CStr, CString};
use std::ptr;
use std::time::Duration;

use crate::{Solver, SolverError, SubmissionId};

/// Result structure returned by solve functions.
///
/// String fields are heap-allocated and must be freed with `rucaptcha_free_result`.
#[repr(C)]
pub struct RucaptchaResult {
    /// 0 = success, non-zero = error
    pub error_code: i32,
    /// Error message if error_code != 0, NULL otherwise
    pub error_message: *mut c_char,
    /// Submission id assigned by the service, 0 on error
    pub id: u64,
    /// Captcha answer, NULL on error
    pub answer: *mut c_char,
}

impl RucaptchaResult {
    fn success(id: u64, answer: String) -> Self {
        Self {
            error_code: 0,
            error_message: ptr::null_mut(),
            id,
            answer: string_to_ptr(answer),
        }
    }

    fn error(code: i32, message: String) -> Self {
        Self {
            error_code: code,
            error_message: string_to_ptr(message),
            id: 0,
            answer: ptr::null_mut(),
        }
    }
}

/// Stable numeric code for each error kind.
fn error_code(err: &SolverError) -> i32 {
    match err {
        SolverError::Configuration(_) => 5,
        SolverError::ImageFetch(_) => 10,
        SolverError::Submission { .. } => 11,
        SolverError::Poll { .. } => 12,
        SolverError::Transport(_) => 13,
        SolverError::Timeout { .. } => 14,
        SolverError::Cancelled => 15,
        SolverError::InvalidResponse(_) | SolverError::Json(_) => 16,
    }
}

/// Convert Rust String to C string pointer.
fn string_to_ptr(s: String) -> *mut c_char {
    CString::new(s)
        .map(|cs| cs.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Convert C string to Rust String, returns None if null or invalid UTF-8.
unsafe fn ptr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to create runtime: {}", e))
}

fn build_solver(api_key: String, retry_interval_ms: u64) -> Result<Solver, SolverError> {
    Solver::builder(api_key)
        .retry_interval(Duration::from_millis(retry_interval_ms))
        .build()
}

/// Solve a captcha image (blocking).
///
/// # Parameters
///
/// - `api_key`: rucaptcha account key (required)
/// - `image`: URL, local path or base64 text (required)
/// - `retry_interval_ms`: delay between polls, 0 for the default
///
/// # Returns
///
/// A `RucaptchaResult` struct. Check `error_code` for success (0) or failure (non-zero).
/// The caller must free the result with `rucaptcha_free_result`.
///
/// # Safety
///
/// - `api_key` must be a valid null-terminated C string
/// - `image` must be a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn rucaptcha_solve(
    api_key: *const c_char,
    image: *const c_char,
    retry_interval_ms: u64,
) -> RucaptchaResult {
    let api_key = match ptr_to_string(api_key) {
        Some(s) if !s.is_empty() => s,
        _ => return RucaptchaResult::error(1, "api_key is required".to_string()),
    };

    let image = match ptr_to_string(image) {
        Some(s) if !s.is_empty() => s,
        _ => return RucaptchaResult::error(2, "image is required".to_string()),
    };

    let runtime = match runtime() {
        Ok(rt) => rt,
        Err(e) => return RucaptchaResult::error(4, e),
    };

    runtime.block_on(async {
        let solver = match build_solver(api_key, retry_interval_ms) {
            Ok(s) => s,
            Err(e) => {
                return RucaptchaResult::error(
                    error_code(&e),
                    format!("Failed to build solver: {}", e),
                )
            }
        };

        match solver.solve(image).await {
            Ok(result) => RucaptchaResult::success(result.id.get(), result.answer),
            Err(e) => RucaptchaResult::error(error_code(&e), format!("Solve failed: {}", e)),
        }
    })
}

/// Solve a captcha image and return JSON (blocking).
///
/// # Returns
///
/// A JSON string on success:
/// ```json
/// {"success": true, "id": 28473719, "answer": "..."}
/// ```
///
/// Or on error:
/// ```json
/// {"success": false, "error_code": 12, "error": "error message"}
/// ```
///
/// The caller must free the string with `rucaptcha_free_string`.
///
/// # Safety
///
/// Same requirements as `rucaptcha_solve`.
#[no_mangle]
pub unsafe extern "C" fn rucaptcha_solve_json(
    api_key: *const c_char,
    image: *const c_char,
    retry_interval_ms: u64,
) -> *mut c_char {
    let result = rucaptcha_solve(api_key, image, retry_interval_ms);

    let json = if result.error_code == 0 {
        let id = result.id;
        let answer = ptr_to_string(result.answer).unwrap_or_default();
        rucaptcha_free_result(result);

        serde_json::json!({
            "success": true,
            "id": id,
            "answer": answer
        })
        .to_string()
    } else {
        let code = result.error_code;
        let error =
            ptr_to_string(result.error_message).unwrap_or_else(|| "Unknown error".to_string());
        rucaptcha_free_result(result);

        serde_json::json!({
            "success": false,
            "error_code": code,
            "error": error
        })
        .to_string()
    };

    string_to_ptr(json)
}

/// Fetch the account balance (blocking).
///
/// Writes the balance to `out` and returns 0, or returns a non-zero error code.
/// A non-numeric service reply is written as NaN.
///
/// # Safety
///
/// - `api_key` must be a valid null-terminated C string
/// - `out` must be a valid, writable pointer to a double
#[no_mangle]
pub unsafe extern "C" fn rucaptcha_balance(api_key: *const c_char, out: *mut f64) -> i32 {
    if out.is_null() {
        return 3;
    }
    let api_key = match ptr_to_string(api_key) {
        Some(s) if !s.is_empty() => s,
        _ => return 1,
    };
    let runtime = match runtime() {
        Ok(rt) => rt,
        Err(_) => return 4,
    };

    let balance = runtime.block_on(async {
        match build_solver(api_key, 0) {
            Ok(solver) => solver.balance().await,
            Err(e) => Err(e),
        }
    });

    match balance {
        Ok(value) => {
            *out = value;
            0
        }
        Err(e) => error_code(&e),
    }
}

/// Report a wrong answer (blocking).
///
/// Returns the raw service reply, or NULL on failure. The caller must free
/// the string with `rucaptcha_free_string`.
///
/// # Safety
///
/// - `api_key` must be a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn rucaptcha_report(api_key: *const c_char, id: u64) -> *mut c_char {
    let api_key = match ptr_to_string(api_key) {
        Some(s) if !s.is_empty() => s,
        _ => return ptr::null_mut(),
    };
    let runtime = match runtime() {
        Ok(rt) => rt,
        Err(_) => return ptr::null_mut(),
    };

    runtime.block_on(async {
        let reply = match build_solver(api_key, 0) {
            Ok(solver) => solver.report(SubmissionId(id)).await,
            Err(e) => Err(e),
        };
        reply.map(string_to_ptr).unwrap_or(ptr::null_mut())
    })
}

/// Free a RucaptchaResult structure.
///
/// # Safety
///
/// - `result` must be a valid RucaptchaResult previously returned by `rucaptcha_solve`
/// - Each result must only be freed once
#[no_mangle]
pub unsafe extern "C" fn rucaptcha_free_result(result: RucaptchaResult) {
    if !result.error_message.is_null() {
        let _ = CString::from_raw(result.error_message);
    }
    if !result.answer.is_null() {
        let _ = CString::from_raw(result.answer);
    }
}

/// Free a string returned by rucaptcha-solver FFI functions.
///
/// # Safety
///
/// - `s` must be NULL or a valid pointer previously returned by rucaptcha-solver
/// - Each string must only be freed once
#[no_mangle]
pub unsafe extern "C" fn rucaptcha_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = CString::from_raw(s);
    }
}

/// Get the library version.
///
/// # Returns
///
/// A static string with the version number. Do NOT free this string.
#[no_mangle]
pub extern "C" fn rucaptcha_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
