//! Accent color handling.
//!
//! The particle field is painted in the theme's accent color, which the page
//! exposes as the `--accent-color` CSS custom property. Values are passed to the
//! canvas as CSS text, so any color syntax the browser accepts works.

/// Accent used when neither the parameters nor the page provide one.
pub const DEFAULT_ACCENT: &str = "#D4A574";

/// CSS custom property the page theme sets.
pub const ACCENT_PROPERTY: &str = "--accent-color";

/// Picks the accent from a raw custom-property value, falling back to [`DEFAULT_ACCENT`].
pub fn resolve_accent(css_value: &str) -> String {
	let v = css_value.trim();
	if v.is_empty() {
		DEFAULT_ACCENT.to_string()
	} else {
		v.to_string()
	}
}

/// Reads the accent color from the document root's computed style.
pub fn document_accent() -> String {
	let value = web_sys::window()
		.and_then(|w| {
			let root = w.document()?.document_element()?;
			w.get_computed_style(&root).ok().flatten()
		})
		.and_then(|style| style.get_property_value(ACCENT_PROPERTY).ok())
		.unwrap_or_default();
	resolve_accent(&value)
}
