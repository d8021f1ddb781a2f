//! C ABI over the invoice calculator, for embedding in a native view layer.
//!
//! Handles are opaque boxes owned by the caller until `tally_invoice_free`.
//! Strings returned by this module must be released with `tally_string_free`.

use std::{
    ffi::{CStr, CString},
    os::raw::{c_char, c_double, c_int},
    ptr,
    sync::OnceLock,
};

use crate::controller::{Confirmation, InvoiceController};
use crate::errors::CalcError;

/// Semantic version of the C surface. Bumps when the ABI changes.
pub const FFI_VERSION: &str = "0.1.0";

/// Status codes returned by every fallible call.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiStatus {
    Ok = 0,
    NullArgument = 1,
    InvalidUtf8 = 2,
    /// Input was not a number and was discarded.
    Discarded = 3,
    Internal = 4,
}

impl From<FfiStatus> for c_int {
    fn from(value: FfiStatus) -> Self {
        value as c_int
    }
}

fn classify_error(err: &CalcError) -> FfiStatus {
    match err {
        CalcError::InvalidNumericInput(_) => FfiStatus::Discarded,
        CalcError::IndexOutOfRange { .. }
        | CalcError::Config(_)
        | CalcError::Io(_)
        | CalcError::Serde(_) => FfiStatus::Internal,
    }
}

/// Store index as seen from C; -1 when it does not fit.
fn row_index(index: usize) -> c_int {
    c_int::try_from(index).unwrap_or(-1)
}

/// Outcome of one confirmation, mirrored for C callers.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct FfiConfirmation {
    /// 0 discarded, 1 staged, 2 committed, 3 updated.
    pub kind: c_int,
    /// Store index of the committed or updated entry, or -1.
    pub index: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct FfiInvoiceTotals {
    pub total_sales: c_double,
    pub total_tax: c_double,
    pub grand_total: c_double,
}

/// Opaque invoice calculator handle.
pub struct InvoiceHandle {
    inner: InvoiceController,
}

/// Returns the crate version as a static C string. Do not free it.
#[no_mangle]
pub extern "C" fn tally_version() -> *const c_char {
    static VERSION: OnceLock<CString> = OnceLock::new();
    VERSION
        .get_or_init(|| CString::new(env!("CARGO_PKG_VERSION")).unwrap_or_default())
        .as_ptr()
}

#[no_mangle]
pub extern "C" fn tally_invoice_new() -> *mut InvoiceHandle {
    Box::into_raw(Box::new(InvoiceHandle {
        inner: InvoiceController::new(),
    }))
}

/// # Safety
/// `handle` must come from `tally_invoice_new` and not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn tally_invoice_free(handle: *mut InvoiceHandle) {
    if handle.is_null() {
        return;
    }
    drop(Box::from_raw(handle));
}

/// Feeds one confirmed input value to the calculator.
///
/// # Safety
/// `handle` must be live, `raw` a NUL-terminated string and `out` either
/// null or writable.
#[no_mangle]
pub unsafe extern "C" fn tally_invoice_confirm(
    handle: *mut InvoiceHandle,
    raw: *const c_char,
    out: *mut FfiConfirmation,
) -> c_int {
    if handle.is_null() || raw.is_null() {
        return FfiStatus::NullArgument.into();
    }
    let text = match CStr::from_ptr(raw).to_str() {
        Ok(text) => text,
        Err(_) => return FfiStatus::InvalidUtf8.into(),
    };

    let outcome = (*handle).inner.confirm(text);
    let (kind, index) = match outcome {
        Confirmation::Discarded => (0, -1),
        Confirmation::Staged { .. } => (1, -1),
        Confirmation::Committed { index, .. } => (2, row_index(index)),
        Confirmation::Updated { index, .. } => (3, row_index(index)),
    };
    if !out.is_null() {
        *out = FfiConfirmation { kind, index };
    }
    if outcome == Confirmation::Discarded {
        FfiStatus::Discarded.into()
    } else {
        FfiStatus::Ok.into()
    }
}

/// # Safety
/// `handle` must be live and `out` writable.
#[no_mangle]
pub unsafe extern "C" fn tally_invoice_totals(
    handle: *const InvoiceHandle,
    out: *mut FfiInvoiceTotals,
) -> c_int {
    if handle.is_null() || out.is_null() {
        return FfiStatus::NullArgument.into();
    }
    let totals = (*handle).inner.totals();
    *out = FfiInvoiceTotals {
        total_sales: totals.total_sales,
        total_tax: totals.total_tax,
        grand_total: totals.grand_total,
    };
    FfiStatus::Ok.into()
}

/// Writes the display rows and totals as JSON to `out_json`.
///
/// # Safety
/// `handle` must be live and `out_json` writable. The string written must be
/// released with `tally_string_free`.
#[no_mangle]
pub unsafe extern "C" fn tally_invoice_rows_json(
    handle: *const InvoiceHandle,
    out_json: *mut *mut c_char,
) -> c_int {
    if handle.is_null() || out_json.is_null() {
        return FfiStatus::NullArgument.into();
    }
    *out_json = ptr::null_mut();
    let json = match serde_json::to_string(&(*handle).inner.snapshot()) {
        Ok(json) => json,
        Err(err) => return classify_error(&CalcError::from(err)).into(),
    };
    match CString::new(json) {
        Ok(cstring) => {
            *out_json = cstring.into_raw();
            FfiStatus::Ok.into()
        }
        Err(_) => FfiStatus::Internal.into(),
    }
}

/// # Safety
/// `value` must come from this module, or be null.
#[no_mangle]
pub unsafe extern "C" fn tally_string_free(value: *mut c_char) {
    if value.is_null() {
        return;
    }
    drop(CString::from_raw(value));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirm(handle: *mut InvoiceHandle, raw: &str) -> (c_int, FfiConfirmation) {
        let text = CString::new(raw).unwrap();
        let mut out = FfiConfirmation::default();
        let status = unsafe { tally_invoice_confirm(handle, text.as_ptr(), &mut out) };
        (status, out)
    }

    #[test]
    fn exposes_version() {
        let version = unsafe { CStr::from_ptr(tally_version()) };
        assert_eq!(version.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn two_confirmations_make_one_entry() {
        let handle = tally_invoice_new();

        let (status, out) = confirm(handle, "100");
        assert_eq!(status, FfiStatus::Ok as c_int);
        assert_eq!((out.kind, out.index), (1, -1));

        let (_, out) = confirm(handle, "15");
        assert_eq!((out.kind, out.index), (2, 0));

        let (status, out) = confirm(handle, "abc");
        assert_eq!(status, FfiStatus::Discarded as c_int);
        assert_eq!(out.kind, 0);

        let mut totals = FfiInvoiceTotals::default();
        assert_eq!(unsafe { tally_invoice_totals(handle, &mut totals) }, 0);
        assert_eq!(totals.grand_total, 115.0);

        let mut json: *mut c_char = ptr::null_mut();
        assert_eq!(unsafe { tally_invoice_rows_json(handle, &mut json) }, 0);
        let text = unsafe { CStr::from_ptr(json) }.to_str().unwrap().to_owned();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["rows"][0]["entry"]["sales"], 100.0);
        assert_eq!(value["totals"]["total_tax"], 15.0);

        unsafe {
            tally_string_free(json);
            tally_invoice_free(handle);
        }
    }

    #[test]
    fn oversized_indices_map_to_minus_one() {
        assert_eq!(row_index(7), 7);
        assert_eq!(row_index(c_int::MAX as usize), c_int::MAX);
        assert_eq!(row_index(usize::MAX), -1);
    }

    #[test]
    fn null_arguments_are_rejected() {
        let mut totals = FfiInvoiceTotals::default();
        let status = unsafe { tally_invoice_totals(ptr::null(), &mut totals) };
        assert_eq!(status, FfiStatus::NullArgument as c_int);
        unsafe {
            tally_invoice_free(ptr::null_mut());
            tally_string_free(ptr::null_mut());
        }
    }
}
