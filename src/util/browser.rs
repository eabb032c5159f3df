//! Thin wrappers over `window` APIs so pages stay free of `web_sys` calls.
//! Native (test) builds get inert stubs, the same split the rest of the
//! crate applies to browser-only code.

/// Ask the user to confirm a destructive action. Returns false outside the
/// browser or when the dialog fails to open.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = message;
        false
    }
}

/// Open a URL in a new tab (report downloads).
pub fn open_in_new_tab(url: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.open_with_url_and_target(url, "_blank");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = url;
    }
}
