//! C ABI for platform UIs.
//!
//! A single generation entry point returning SVG markup, plus the matching
//! free function. Every failure is reported as a null pointer; the caller
//! must then show no icon at all.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use keyprint_core::PublicKey;
use keyprint_render::{Renderer, SvgRenderer};

use crate::error::{KeyprintError, Result};
use crate::generator::{Algorithm, Keyprint};

/// Build a [`PublicKey`] from an encoding tag (`"hex"` or `"base58"`).
pub fn public_key_from_tag(encoding: &str, value: &str) -> Result<PublicKey> {
    match encoding.trim().to_ascii_lowercase().as_str() {
        "hex" => Ok(PublicKey::Hex(value.to_string())),
        "base58" | "ss58" => Ok(PublicKey::Base58(value.to_string())),
        _ => Err(KeyprintError::UnknownEncoding(encoding.to_string())),
    }
}

fn generate_svg(key: &str, encoding: &str, algorithm: &str, size: u32) -> Result<String> {
    let key = public_key_from_tag(encoding, key)?;
    let algorithm: Algorithm = algorithm.parse()?;
    let scene = Keyprint::default().scene(&key, algorithm, size)?;
    Ok(SvgRenderer::new().render(&scene)?.into_string())
}

/// # Safety
///
/// `ptr` must be null or a valid NUL-terminated string for the duration of
/// the call.
unsafe fn borrow_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Generate an SVG identicon.
///
/// Returns an owned NUL-terminated string, or null on any failure (null
/// or non-UTF-8 argument, unknown encoding or algorithm tag, malformed
/// key, invalid size). Release the result with [`keyprint_string_free`].
///
/// # Safety
///
/// `key`, `encoding` and `algorithm` must each be null or point to a valid
/// NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn keyprint_generate_svg(
    key: *const c_char,
    encoding: *const c_char,
    algorithm: *const c_char,
    size: u32,
) -> *mut c_char {
    let (Some(key), Some(encoding), Some(algorithm)) =
        (borrow_str(key), borrow_str(encoding), borrow_str(algorithm))
    else {
        return ptr::null_mut();
    };

    match generate_svg(key, encoding, algorithm, size) {
        Ok(svg) => match CString::new(svg) {
            Ok(s) => s.into_raw(),
            Err(_) => ptr::null_mut(),
        },
        Err(e) => {
            tracing::debug!(error = %e, "identicon generation failed");
            ptr::null_mut()
        }
    }
}

/// Release a string returned by [`keyprint_generate_svg`].
///
/// # Safety
///
/// `s` must be null or a pointer obtained from [`keyprint_generate_svg`]
/// that has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn keyprint_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
