/// localStorage key holding the music mute preference.
pub const MUTED_KEY: &str = "snowbox_muted";

/// Calls the closure with browser localStorage, if available. No-op on non-WASM.
#[allow(unused_variables)]
pub fn with_local_storage(f: impl FnOnce(&web_sys::Storage)) {
    #[cfg(target_family = "wasm")]
    {
        if let Some(window) = web_sys::window()
            && let Ok(Some(storage)) = window.local_storage()
        {
            f(&storage);
        }
    }
}

/// Stored values are the strings `"true"` / `"false"`; anything else is
/// treated as unmuted.
pub fn parse_flag(value: Option<&str>) -> bool {
    value == Some("true")
}

pub fn load_muted() -> bool {
    let mut muted = false;
    with_local_storage(|storage| {
        let value = storage.get_item(MUTED_KEY).ok().flatten();
        muted = parse_flag(value.as_deref());
    });
    muted
}

pub fn save_muted(muted: bool) {
    with_local_storage(|storage| {
        let _ = storage.set_item(MUTED_KEY, if muted { "true" } else { "false" });
    });
}
