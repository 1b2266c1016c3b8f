//! Folder and file naming
//!
//! Every animal gets its own folder named after it, with a short random
//! suffix so two animals sharing a name never share a folder. Images get
//! opaque random names.

use uuid::Uuid;

/// Folder base name used when a profile has no usable name
pub const UNNAMED_FOLDER: &str = "bez_nazwy";

/// Extension given to every downloaded image
pub const IMAGE_EXTENSION: &str = "jpg";

/// Length of the hex suffix appended to folder names
pub const DISAMBIGUATOR_LEN: usize = 5;

/// Length of the hex token used as an image file stem
pub const IMAGE_TOKEN_LEN: usize = 32;

/// Characters that are not allowed in file or folder names on common filesystems
const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Source of random hex tokens
///
/// Injected into the scraper so tests can get predictable names.
pub trait TokenSource {
    /// Returns `len` lowercase hex characters
    fn hex_token(&mut self, len: usize) -> String;
}

/// Token source backed by random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidTokenSource;

impl TokenSource for UuidTokenSource {
    fn hex_token(&mut self, len: usize) -> String {
        let mut token = String::with_capacity(len + 32);
        while token.len() < len {
            token.push_str(&Uuid::new_v4().simple().to_string());
        }
        token.truncate(len);
        token
    }
}

/// Cleans a pet name into a folder base name
///
/// The name is trimmed, filesystem-illegal characters are dropped, runs of
/// whitespace become a single underscore and a trailing duplicate marker
/// such as `_(2)` is removed. Absent or empty names give [`UNNAMED_FOLDER`].
///
/// Illegal characters are treated as separators, so `My/Dog` becomes
/// `My_Dog` rather than `MyDog`.
pub fn sanitize_pet_name(name: Option<&str>) -> String {
    let Some(name) = name else {
        return UNNAMED_FOLDER.to_string();
    };

    let cleaned: String = name
        .chars()
        .map(|c| if ILLEGAL_CHARS.contains(&c) { ' ' } else { c })
        .collect();
    let joined = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    let base = strip_duplicate_marker(&joined);

    if base.is_empty() {
        UNNAMED_FOLDER.to_string()
    } else {
        base.to_string()
    }
}

/// Removes a trailing `_(<digits>)` marker
fn strip_duplicate_marker(name: &str) -> &str {
    let Some(rest) = name.strip_suffix(')') else {
        return name;
    };
    let Some(open) = rest.rfind("_(") else {
        return name;
    };

    let digits = &rest[open + 2..];
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        &name[..open]
    } else {
        name
    }
}

/// Derives a fresh folder name for an animal
///
/// Not deterministic: each call draws a new suffix, so callers must name
/// a given profile only once.
pub fn folder_name(pet_name: Option<&str>, tokens: &mut dyn TokenSource) -> String {
    format!(
        "{}-{}",
        sanitize_pet_name(pet_name),
        tokens.hex_token(DISAMBIGUATOR_LEN)
    )
}

/// Derives an opaque file name for one image
pub fn unique_image_filename(tokens: &mut dyn TokenSource) -> String {
    format!("{}.{}", tokens.hex_token(IMAGE_TOKEN_LEN), IMAGE_EXTENSION)
}
