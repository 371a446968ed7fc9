//! Output vocabulary of the bundled model.

/// Language codes indexed by softmax output.
pub const LANGUAGE_NAMES: [&str; 109] = [
    "eo", "co", "eu", "ta", "de", "mt", "ps", "te", "su", "uz", "zh-Latn", "ne", "nl", "sw", "sq",
    "hmn", "ja", "no", "mn", "so", "ko", "kk", "sl", "ig", "mr", "th", "zu", "ml", "hr", "bs",
    "lo", "sd", "cy", "hy", "uk", "pt", "lv", "iw", "cs", "vi", "jv", "be", "km", "mk", "tr", "fy",
    "am", "zh", "da", "sv", "fi", "ht", "af", "la", "id", "fil", "sm", "ca", "el", "ka", "sr",
    "it", "sk", "ru", "ru-Latn", "bg", "ny", "fa", "haw", "gl", "et", "ms", "gd", "bg-Latn", "ha",
    "is", "ur", "mi", "hi", "bn", "hi-Latn", "fr", "yi", "hu", "xh", "my", "tg", "ro", "ar", "lb",
    "el-Latn", "st", "ceb", "kn", "az", "si", "ky", "mg", "en", "gu", "es", "pl", "ja-Latn", "ga",
    "lt", "sn", "yo", "pa", "ku",
];

/// Number of languages the model distinguishes.
pub const NUM_LANGUAGES: usize = LANGUAGE_NAMES.len();

/// Languages that are reported reliable at a lower probability, since the
/// model routinely splits its mass between them.
pub const CLOSE_LANGUAGES: [&str; 2] = ["hr", "bs"];

/// Code of output `index`.
pub fn language_name(index: usize) -> Option<&'static str> {
    LANGUAGE_NAMES.get(index).copied()
}

/// Output index of `code`.
pub fn language_index(code: &str) -> Option<usize> {
    LANGUAGE_NAMES.iter().position(|&name| name == code)
}
