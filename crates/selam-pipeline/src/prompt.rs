// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Instruction template wrapped around every question sent to the model.

const TEMPLATE_HEAD: &str = "Please provide a well-organized and clear response to the following question. Use proper formatting with:
- Clear headings for main topics (marked with **)
- Bullet points for lists
- Short paragraphs
- Proper spacing between sections

Question: ";

/// Wraps `input` in the formatting instructions.
pub fn build_prompt(input: &str) -> String {
    let mut prompt = String::with_capacity(TEMPLATE_HEAD.len() + input.len());
    prompt.push_str(TEMPLATE_HEAD);
    prompt.push_str(input);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_is_appended_last() {
        let prompt = build_prompt("What is Asmara?");
        assert!(prompt.starts_with("Please provide a well-organized"));
        assert!(prompt.contains("(marked with **)"));
        assert!(prompt.ends_with("\n\nQuestion: What is Asmara?"));
    }
}
