//! Inflections between controller identifiers and type names.
//!
//! A controller identifier is a slash-delimited lowercase path such as
//! `admin/user_profiles`; the corresponding type name is
//! `Admin_UserProfilesController`. [`camelize`] and [`underscore`] convert
//! between the two and round-trip for names that follow the convention.

/// Camelize a slash/underscore-separated identifier.
///
/// Slashes become underscores and the first letter of every
/// underscore-separated word is uppercased:
///
/// - `hello_world` → `HelloWorld`
/// - `hello/another_world` → `Hello_AnotherWorld`
/// - `hello123world` → `Hello123world`
#[must_use]
pub fn camelize(word: &str) -> String {
    word.split('/')
        .map(|part| {
            part.split('_')
                .map(capitalize)
                .collect::<Vec<_>>()
                .concat()
        })
        .collect::<Vec<_>>()
        .join("_")
}

/// Underscore a camelized type name back into a controller identifier.
///
/// Underscores become slashes and an underscore is inserted before every
/// uppercase letter preceded by a word character, then everything is
/// lowercased. Consecutive capitals split letter by letter:
///
/// - `HelloWorld` → `hello_world`
/// - `Hello_AnotherWorld` → `hello/another_world`
/// - `HELLO` → `h_e_l_l_o`
#[must_use]
pub fn underscore(word: &str) -> String {
    word.split('_')
        .map(underscore_part)
        .collect::<Vec<_>>()
        .join("/")
}

fn underscore_part(part: &str) -> String {
    let mut out = String::with_capacity(part.len() + 4);
    let mut prev_is_word = false;
    for ch in part.chars() {
        if ch.is_uppercase() && prev_is_word {
            out.push('_');
        }
        prev_is_word = ch.is_alphanumeric() || ch == '_';
        out.extend(ch.to_lowercase());
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
