// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Name sanitizers for job identifiers and namespace path segments.

/// Maximum length of a single path segment produced by [`path_name`].
pub const MAX_SEGMENT_LEN: usize = 128;

/// Convert a string to PascalCase for use as a job name and store key.
///
/// Splits on any non-ASCII-alphanumeric character, uppercases the first
/// character of each word and keeps the rest as written, so already
/// PascalCased input (`"SendDigest"`) passes through unchanged.
pub fn pascal_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for word in input
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.push(first.to_ascii_uppercase());
            result.extend(chars);
        }
    }
    result
}

/// Sanitize a string into a URL-path-safe token.
///
/// Lowercases, replaces runs of characters outside `[a-z0-9._-]` with a
/// single hyphen, trims `-`, `_` and `.` from every segment, drops empty
/// segments, and truncates segments to [`MAX_SEGMENT_LEN`]. A leading or
/// trailing `/` in the input is preserved.
pub fn path_name(input: &str) -> String {
    let lower = input.trim().to_lowercase();

    let segments: Vec<String> = lower
        .split('/')
        .map(sanitize_segment)
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        return String::new();
    }

    let mut result = segments.join("/");
    if lower.starts_with('/') {
        result.insert(0, '/');
    }
    if lower.ends_with('/') {
        result.push('/');
    }
    result
}

fn sanitize_segment(segment: &str) -> String {
    let mut slug = String::with_capacity(segment.len());
    let mut last_was_hyphen = false;
    for ch in segment.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_') {
            slug.push(ch);
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    let mut result = trim_segment(&slug).to_string();
    if result.len() > MAX_SEGMENT_LEN {
        result.truncate(MAX_SEGMENT_LEN);
        // Truncation may leave a trailing separator
        result = trim_segment(&result).to_string();
    }
    result
}

fn trim_segment(segment: &str) -> &str {
    segment.trim_matches(|ch| matches!(ch, '-' | '_' | '.'))
}

#[cfg(test)]
#[path = "sanitize_tests.rs"]
mod tests;
