//! Exported call boundary
//!
//! The host loads the library and calls `RVExtension` with a NUL-terminated
//! call string and a caller-owned output buffer. The router behind it is the
//! only process-wide static.

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::sync::OnceLock;

use tracing::error;

use crate::operations;
use crate::router::{Reply, Router};

static ROUTER: OnceLock<Option<Router>> = OnceLock::new();

fn router() -> Option<&'static Router> {
    ROUTER
        .get_or_init(|| match operations::registry() {
            Ok(registry) => Some(Router::new(registry)),
            Err(err) => {
                error!(code = err.code(), error = %err, "operation registry is invalid");
                None
            }
        })
        .as_ref()
}

/// Handles one call string and returns the encoded reply.
///
/// Panics inside an operation become `[false]`. A failed bootstrap aborts
/// the process.
pub fn call_extension(input: &str) -> String {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| router().map(|r| r.call(input))));

    match outcome {
        Ok(Some(outcome)) if outcome.fatal => {
            error!(fatal = true, "bootstrap failed; aborting");
            eprintln!("hive: bootstrap failed, aborting");
            std::process::abort();
        }
        Ok(Some(outcome)) => outcome.encode(),
        Ok(None) => Reply::failure().encode(),
        Err(_) => {
            error!("operation panicked");
            Reply::failure().encode()
        }
    }
}

/// Longest prefix of `text` no longer than `max` bytes that ends on a char
/// boundary
pub fn truncate_utf8(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Host entry point.
///
/// # Safety
///
/// `function` must be null or point to a NUL-terminated string. `output`
/// must be null or valid for writes of `output_size` bytes.
#[no_mangle]
pub unsafe extern "system" fn RVExtension(
    output: *mut c_char,
    output_size: c_int,
    function: *const c_char,
) {
    if output.is_null() || output_size <= 0 {
        return;
    }
    let capacity = output_size as usize - 1;

    let response = if function.is_null() {
        Reply::failure().encode()
    } else {
        let input = CStr::from_ptr(function).to_string_lossy();
        call_extension(&input)
    };

    let bytes = truncate_utf8(&response, capacity).as_bytes();
    ptr::copy_nonoverlapping(bytes.as_ptr().cast::<c_char>(), output, bytes.len());
    *output.add(bytes.len()) = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn call(input: &str, size: usize) -> String {
        let function = CString::new(input).unwrap();
        let mut buffer = vec![0x7f as c_char; size];
        unsafe { RVExtension(buffer.as_mut_ptr(), size as c_int, function.as_ptr()) };
        let text = unsafe { CStr::from_ptr(buffer.as_ptr()) };
        text.to_str().unwrap().to_string()
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        assert_eq!(truncate_utf8("abc", 10), "abc");
        assert_eq!(truncate_utf8("abc", 2), "ab");
        // 'é' is two bytes
        assert_eq!(truncate_utf8("aé", 2), "a");
        assert_eq!(truncate_utf8("", 0), "");
    }

    #[test]
    fn test_unknown_operation_is_false() {
        assert_eq!(call_extension(r#"["Nope","Nothing"]"#), "[false]");
        assert_eq!(call_extension("not a call"), "[false]");
    }

    #[test]
    fn test_deeply_nested_call_is_false() {
        let input = format!(r#"["A","B",{}"#, "[".repeat(20_000));
        assert_eq!(call_extension(&input), "[false]");
    }

    #[test]
    fn test_calls_before_setup_are_false() {
        assert_eq!(call_extension(r#"["Example","GetAll"]"#), "[false]");
    }

    #[test]
    fn test_entry_writes_nul_terminated_reply() {
        assert_eq!(call(r#"["Nope","Nothing"]"#, 64), "[false]");
        // Room for "[fal" plus the terminator
        assert_eq!(call(r#"["Nope","Nothing"]"#, 5), "[fal");
    }

    #[test]
    fn test_null_pointers_are_ignored() {
        unsafe { RVExtension(ptr::null_mut(), 10, ptr::null()) };

        let mut buffer = vec![1 as c_char; 16];
        unsafe { RVExtension(buffer.as_mut_ptr(), 16, ptr::null()) };
        let text = unsafe { CStr::from_ptr(buffer.as_ptr()) };
        assert_eq!(text.to_str().unwrap(), "[false]");
    }
}
