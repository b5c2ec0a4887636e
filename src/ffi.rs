//! C ABI surface (spec.md §6): three entry points over caller-supplied
//! buffers, for embedding this library outside Rust. Each wraps the
//! corresponding safe Rust function; no logic lives here beyond buffer
//! bookkeeping and the UTF-8 boundary crossing.

use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::slice;

/// Success.
pub const ENS_OK: i32 = 0;
/// A panic (e.g. allocation failure) was caught at the FFI boundary.
pub const ENS_ERR_ALLOC: i32 = -1;
/// Normalization/validation failed; the input is not ENS-normalizable.
pub const ENS_ERR_PROCESSING: i32 = -3;
/// The caller's output buffer (or `ens_process`'s normalized buffer) is
/// too small; `*out_len` is set to the required size.
pub const ENS_ERR_BUFFER_TOO_SMALL: i32 = -4;
/// `ens_process`'s beautified buffer is too small; `*beau_len` is set to
/// the required size.
pub const ENS_ERR_BEAUTIFIED_BUFFER_TOO_SMALL: i32 = -5;

/// Reads a caller-supplied byte slice as UTF-8, replacing any invalid
/// sequence with U+FFFD rather than failing — matching the tokenizer's
/// treatment of malformed input as disallowed rather than fatal.
unsafe fn read_input(input: *const c_char, input_len: usize) -> String {
    let bytes = slice::from_raw_parts(input as *const u8, input_len);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Copies `s` into `(out, out_len)` if it fits, else reports the required
/// size and leaves the buffer untouched.
unsafe fn write_output(s: &str, out: *mut c_char, out_len: *mut usize, too_small: i32) -> i32 {
    let bytes = s.as_bytes();
    let capacity = *out_len;
    if bytes.len() > capacity {
        *out_len = bytes.len();
        return too_small;
    }
    std::ptr::copy_nonoverlapping(bytes.as_ptr(), out as *mut u8, bytes.len());
    *out_len = bytes.len();
    ENS_OK
}

fn run_guarded(f: impl FnOnce() -> i32) -> i32 {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or(ENS_ERR_ALLOC)
}

/// # Safety
/// `in_` must point to `in_len` readable bytes; `out` must point to at
/// least `*out_len` writable bytes; `out_len` must be non-null and
/// readable/writable.
#[no_mangle]
pub unsafe extern "C" fn ens_normalize(
    in_: *const c_char,
    in_len: usize,
    out: *mut c_char,
    out_len: *mut usize,
) -> i32 {
    if in_.is_null() || out.is_null() || out_len.is_null() {
        return ENS_ERR_PROCESSING;
    }
    run_guarded(|| {
        let input = read_input(in_, in_len);
        match crate::normalize(&input) {
            Ok(normalized) => write_output(&normalized, out, out_len, ENS_ERR_BUFFER_TOO_SMALL),
            Err(_) => ENS_ERR_PROCESSING,
        }
    })
}

/// # Safety
/// Same contract as [`ens_normalize`].
#[no_mangle]
pub unsafe extern "C" fn ens_beautify(
    in_: *const c_char,
    in_len: usize,
    out: *mut c_char,
    out_len: *mut usize,
) -> i32 {
    if in_.is_null() || out.is_null() || out_len.is_null() {
        return ENS_ERR_PROCESSING;
    }
    run_guarded(|| {
        let input = read_input(in_, in_len);
        match crate::beautify(&input) {
            Ok(beautified) => write_output(&beautified, out, out_len, ENS_ERR_BUFFER_TOO_SMALL),
            Err(_) => ENS_ERR_PROCESSING,
        }
    })
}

/// # Safety
/// `in_` must point to `in_len` readable bytes; `norm`/`beau` must each
/// point to at least `*norm_len`/`*beau_len` writable bytes; `norm_len`
/// and `beau_len` must be non-null and readable/writable.
#[no_mangle]
pub unsafe extern "C" fn ens_process(
    in_: *const c_char,
    in_len: usize,
    norm: *mut c_char,
    norm_len: *mut usize,
    beau: *mut c_char,
    beau_len: *mut usize,
) -> i32 {
    if in_.is_null() || norm.is_null() || norm_len.is_null() || beau.is_null() || beau_len.is_null()
    {
        return ENS_ERR_PROCESSING;
    }
    run_guarded(|| {
        let input = read_input(in_, in_len);
        let processed = match crate::process(&input) {
            Ok(p) => p,
            Err(_) => return ENS_ERR_PROCESSING,
        };
        let norm_result = write_output(
            &processed.normalized,
            norm,
            norm_len,
            ENS_ERR_BUFFER_TOO_SMALL,
        );
        if norm_result != ENS_OK {
            return norm_result;
        }
        write_output(
            &processed.beautified,
            beau,
            beau_len,
            ENS_ERR_BEAUTIFIED_BUFFER_TOO_SMALL,
        )
    })
}
