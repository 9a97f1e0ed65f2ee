// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Script-based language detection.

use selam_core::DetectionResult;

/// First code point of the Ethiopic (Ge'ez) block.
pub const GEEZ_START: char = '\u{1200}';
/// Last code point of the Ethiopic (Ge'ez) block.
pub const GEEZ_END: char = '\u{137F}';

/// Returns true for characters in the Ethiopic block, U+1200..=U+137F.
pub fn is_geez(c: char) -> bool {
    (GEEZ_START..=GEEZ_END).contains(&c)
}

/// Classifies `text` as Tigrinya if any character is Ge'ez script.
///
/// Stops at the first match. Anything else, including empty text, is
/// [`DetectionResult::Undetermined`] and left for the provider to detect.
pub fn detect(text: &str) -> DetectionResult {
    if text.chars().any(is_geez) {
        DetectionResult::Tigrinya
    } else {
        DetectionResult::Undetermined
    }
}
