// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Prompt templates for story and character-description generation

use crate::models::{BookRequest, CharacterDescription, PAGE_COUNT};

/// Per-page text cap stated to the model, in words
pub const MAX_WORDS_PER_PAGE: usize = 80;

/// System instruction for story generation
pub const STORY_SYSTEM_PROMPT: &str = "You are a children's book author. You write warm, \
     imaginative, age-appropriate stories and always answer with a single valid JSON object, \
     nothing else.";

/// System instruction for photo-based character description
pub const CHARACTER_SYSTEM_PROMPT: &str = "You are an illustrator's assistant. You describe a \
     child's visual appearance concisely so the same character can be drawn consistently \
     across many illustrations.";

/// User instruction for photo-based character description
pub const CHARACTER_USER_PROMPT: &str = "Describe this child's appearance in at most 60 words \
     for use in illustration prompts: hair color and style, eye color, skin tone, face shape \
     and any distinguishing features. Answer with the description only, no preamble.";

/// Build the templated user prompt for story generation.
///
/// Fixes the output language, names the required JSON schema, and states the
/// hard constraints: exact page count, per-page word cap, no brand names in
/// image prompts, kid-appropriate tone. When a character description is
/// available the model is told to keep visual continuity across prompts.
pub fn story_user_prompt(request: &BookRequest, character: Option<&CharacterDescription>) -> String {
    let child_name = request.child_name.as_deref().unwrap_or_default().trim();
    let age = request.age.unwrap_or_default();
    let theme = request.story_theme.as_deref().unwrap_or_default().trim();

    let mut prompt = format!(
        "Write a children's story in {language} for {name}, who is {age} years old, \
         about: {theme}.\n\n\
         Respond with a JSON object of exactly this shape:\n\
         {{\"title\": string, \"subtitle\": string, \"pages\": [{{\"text\": string, \
         \"imagePrompt\": string}}]}}\n\n\
         Hard constraints:\n\
         - The pages array must contain exactly {pages} pages.\n\
         - Each page's text must be at most {words} words.\n\
         - Each imagePrompt describes that page's illustration in English and must not \
           mention any brand names or trademarks.\n\
         - The tone must be kind and suitable for a {age}-year-old: no violence, no \
           frightening imagery.\n\
         - {name} is the hero of the story and appears on every page.",
        language = request.language(),
        name = child_name,
        age = age,
        theme = theme,
        pages = PAGE_COUNT,
        words = MAX_WORDS_PER_PAGE,
    );

    if let Some(character) = character {
        prompt.push_str(&format!(
            "\n- The main character looks like this: {}. Repeat this appearance in every \
             imagePrompt so illustrations stay visually consistent.",
            character.text.trim()
        ));
    }

    prompt
}
