// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deep links into the public translation web page.

use selam_core::LanguageCode;

/// Builds `{base}?sl=..&tl=..&text=..&op=translate` with the text percent-encoded.
pub fn translate_url(
    base: &str,
    text: &str,
    source: &LanguageCode,
    target: &LanguageCode,
) -> String {
    format!(
        "{base}?sl={}&tl={}&text={}&op=translate",
        urlencoding::encode(source.code()),
        urlencoding::encode(target.code()),
        urlencoding::encode(text),
    )
}
