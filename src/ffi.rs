//! FFI boundary definitions for C interop

use libc::{c_char, time_t};
use std::ffi::{CStr, CString};
use std::ptr;

use crate::config::Config;
use crate::host::{Color, Host, SystemHost};
use crate::ipc::SessionBusSource;
use crate::render::{render, DisplayRecord, RenderError};

/// Opaque handle to the Rust core state
pub struct MullvadStatusCore {
    config: Config,
    host: SystemHost,
}

/// Display record returned to C
#[repr(C)]
pub struct CDisplayRecord {
    /// Rendered text (owned by Rust, valid until next call)
    pub text: *const c_char,
    /// Host color string for the record (owned by Rust, valid until next call)
    pub color: *const c_char,
    /// Whether the color is the "good" classification
    pub good: bool,
    /// Unix timestamp after which the block should be polled again
    pub cache_until: time_t,
    /// Result of the render
    pub code: CResultCode,
}

/// Result codes
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CResultCode {
    Ok = 0,
    InvalidHandle = 1,
    InvalidString = 2,
    UnexpectedState = 3,
    SerializeError = 4,
}

// Static storage for strings returned to C
// These are overwritten on each call, so C code must copy if needed
thread_local! {
    static TEXT: std::cell::RefCell<Option<CString>> = std::cell::RefCell::new(None);
    static COLOR: std::cell::RefCell<Option<CString>> = std::cell::RefCell::new(None);
    static JSON: std::cell::RefCell<Option<CString>> = std::cell::RefCell::new(None);
}

impl From<RenderError> for CResultCode {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::UnexpectedState(_) => CResultCode::UnexpectedState,
        }
    }
}

type StringSlot = std::thread::LocalKey<std::cell::RefCell<Option<CString>>>;

fn stash(slot: &'static StringSlot, value: &str) -> *const c_char {
    slot.with(|cell| {
        let cstring = CString::new(value).unwrap_or_default();
        let ptr = cstring.as_ptr();
        *cell.borrow_mut() = Some(cstring);
        ptr
    })
}

fn empty_record(code: CResultCode) -> CDisplayRecord {
    CDisplayRecord {
        text: ptr::null(),
        color: ptr::null(),
        good: false,
        cache_until: 0,
        code,
    }
}

unsafe fn read_str(s: *const c_char) -> Option<String> {
    if s.is_null() {
        return None;
    }
    CStr::from_ptr(s).to_str().ok().map(str::to_string)
}

fn render_record(core: &MullvadStatusCore) -> Result<DisplayRecord, RenderError> {
    render(&core.config, &SessionBusSource, &core.host)
}

/// Create a new core instance
///
/// # Safety
/// Returns a pointer that must be freed with `mullvad_status_free`
#[no_mangle]
pub extern "C" fn mullvad_status_new() -> *mut MullvadStatusCore {
    let core = Box::new(MullvadStatusCore {
        config: Config::default(),
        host: SystemHost::default(),
    });
    Box::into_raw(core)
}

/// Free the core instance
///
/// # Safety
/// `core` must be a valid pointer returned by `mullvad_status_new`
#[no_mangle]
pub unsafe extern "C" fn mullvad_status_free(core: *mut MullvadStatusCore) {
    if !core.is_null() {
        drop(Box::from_raw(core));
    }
}

/// Install a logger reading `RUST_LOG`
///
/// Safe to call more than once; later calls do nothing.
#[no_mangle]
pub extern "C" fn mullvad_status_init_logging() {
    let _ = env_logger::try_init();
}

/// Set configuration value: seconds until the block should be polled again
///
/// # Safety
/// `core` must be valid
#[no_mangle]
pub unsafe extern "C" fn mullvad_status_set_cache_timeout(
    core: *mut MullvadStatusCore,
    seconds: u32,
) -> CResultCode {
    match core.as_mut() {
        Some(core) => {
            core.config.cache_timeout = seconds;
            CResultCode::Ok
        }
        None => CResultCode::InvalidHandle,
    }
}

unsafe fn set_string(
    core: *mut MullvadStatusCore,
    value: *const c_char,
    field: fn(&mut Config) -> &mut String,
) -> CResultCode {
    let core = match core.as_mut() {
        Some(c) => c,
        None => return CResultCode::InvalidHandle,
    };

    match read_str(value) {
        Some(s) => {
            *field(&mut core.config) = s;
            CResultCode::Ok
        }
        None => CResultCode::InvalidString,
    }
}

/// Set configuration value: icon shown while connected
///
/// # Safety
/// `core` must be valid, `icon` must be a valid C string
#[no_mangle]
pub unsafe extern "C" fn mullvad_status_set_icon_on(
    core: *mut MullvadStatusCore,
    icon: *const c_char,
) -> CResultCode {
    set_string(core, icon, |c| &mut c.icon_on)
}

/// Set configuration value: icon shown while disconnected
///
/// # Safety
/// `core` must be valid, `icon` must be a valid C string
#[no_mangle]
pub unsafe extern "C" fn mullvad_status_set_icon_off(
    core: *mut MullvadStatusCore,
    icon: *const c_char,
) -> CResultCode {
    set_string(core, icon, |c| &mut c.icon_off)
}

/// Set configuration value: icon shown for an unknown state or a failed query
///
/// # Safety
/// `core` must be valid, `icon` must be a valid C string
#[no_mangle]
pub unsafe extern "C" fn mullvad_status_set_icon_unknown(
    core: *mut MullvadStatusCore,
    icon: *const c_char,
) -> CResultCode {
    set_string(core, icon, |c| &mut c.icon_unknown)
}

/// Set configuration value: format template with an `{icon}` placeholder
///
/// # Safety
/// `core` must be valid, `format` must be a valid C string
#[no_mangle]
pub unsafe extern "C" fn mullvad_status_set_format(
    core: *mut MullvadStatusCore,
    format: *const c_char,
) -> CResultCode {
    set_string(core, format, |c| &mut c.format)
}

/// Set the color strings used for good and bad states
///
/// # Safety
/// `core` must be valid, `good` and `bad` must be valid C strings
#[no_mangle]
pub unsafe extern "C" fn mullvad_status_set_colors(
    core: *mut MullvadStatusCore,
    good: *const c_char,
    bad: *const c_char,
) -> CResultCode {
    let core = match core.as_mut() {
        Some(c) => c,
        None => return CResultCode::InvalidHandle,
    };

    match (read_str(good), read_str(bad)) {
        (Some(good), Some(bad)) => {
            core.host = SystemHost::with_colors(&good, &bad);
            CResultCode::Ok
        }
        _ => CResultCode::InvalidString,
    }
}

/// Query the VPN state and render the block (blocking)
///
/// # Safety
/// `core` must be valid
#[no_mangle]
pub unsafe extern "C" fn mullvad_status_render(core: *const MullvadStatusCore) -> CDisplayRecord {
    let core = match core.as_ref() {
        Some(c) => c,
        None => return empty_record(CResultCode::InvalidHandle),
    };

    match render_record(core) {
        Ok(record) => CDisplayRecord {
            text: stash(&TEXT, &record.text),
            color: stash(&COLOR, core.host.color(record.color)),
            good: record.color == Color::Good,
            cache_until: record.cache_until.timestamp() as time_t,
            code: CResultCode::Ok,
        },
        Err(err) => empty_record(err.into()),
    }
}

/// Query the VPN state and render the block as i3bar JSON (blocking)
///
/// Returns null on error; `code` receives the result when non-null.
///
/// # Safety
/// `core` must be valid, `code` must be null or point to writable memory
#[no_mangle]
pub unsafe extern "C" fn mullvad_status_render_json(
    core: *const MullvadStatusCore,
    code: *mut CResultCode,
) -> *const c_char {
    let result = match core.as_ref() {
        Some(core) => render_record(core)
            .map_err(CResultCode::from)
            .and_then(|record| {
                record
                    .to_json(&core.host)
                    .map_err(|_| CResultCode::SerializeError)
            }),
        None => Err(CResultCode::InvalidHandle),
    };

    let (ptr, rc) = match result {
        Ok(json) => (stash(&JSON, &json), CResultCode::Ok),
        Err(rc) => (ptr::null(), rc),
    };
    if let Some(code) = code.as_mut() {
        *code = rc;
    }
    ptr
}
