// build.rs

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

const LOCALES_DIR: &str = "locales";
const FALLBACK_LANG: &str = "en";

fn main() {
    // --- 1. Pick the language: `lang_*` feature first, then TEST3_LANG, then English ---
    let mut active_langs: Vec<String> = env::vars()
        .filter_map(|(key, _)| {
            key.strip_prefix("CARGO_FEATURE_LANG_")
                .map(str::to_lowercase)
        })
        .collect();
    active_langs.sort();

    let lang = match active_langs.first() {
        Some(first) => {
            if active_langs.len() > 1 {
                println!(
                    "cargo:warning=Multiple language features enabled ({:?}). Using '{}'.",
                    active_langs, first
                );
            }
            first.clone()
        }
        None => env::var("TEST3_LANG").unwrap_or_else(|_| FALLBACK_LANG.to_string()),
    };

    println!("cargo:rustc-env=TEST3_LANG_EFFECTIVE={}", lang);
    println!("cargo:rerun-if-env-changed=TEST3_LANG");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={}/", LOCALES_DIR);

    // --- 2. English is always loaded, other languages override its keys ---
    let mut translations = load_locale(FALLBACK_LANG).unwrap_or_else(|| {
        panic!("Missing fallback locale: {}/{}.toml", LOCALES_DIR, FALLBACK_LANG)
    });

    if lang != FALLBACK_LANG {
        match load_locale(&lang) {
            Some(specific) => translations.extend(specific),
            None => println!(
                "cargo:warning=Locale '{}' not found in {}/. Falling back to '{}'.",
                lang, LOCALES_DIR, FALLBACK_LANG
            ),
        }
    }

    // --- 3. Emit the `t!` macro ---
    let mut macro_code = String::from(
        "/// Expands to the translated string for a key, resolved at compile time.\n\
         #[macro_export]\nmacro_rules! t {\n",
    );
    for (key, value) in &translations {
        let escaped_value = value.replace('\\', "\\\\").replace('"', "\\\"");
        macro_code.push_str(&format!(
            "    (\"{}\") => {{ \"{}\" }};\n",
            key, escaped_value
        ));
    }
    // Unknown keys fail the build instead of surfacing at runtime.
    macro_code.push_str(
        "    ($key:expr) => {{ compile_error!(concat!(\"Missing translation key: \", $key)) }};\n",
    );
    macro_code.push('}');

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest_path = Path::new(&out_dir).join("translations.rs");
    fs::write(&dest_path, macro_code).expect("Failed to write translations.rs");
}

/// Reads `locales/<lang>.toml` as a flat key/value table. `None` if the file is absent.
fn load_locale(lang: &str) -> Option<BTreeMap<String, String>> {
    let path = Path::new(LOCALES_DIR).join(format!("{}.toml", lang));
    let content = fs::read_to_string(&path).ok()?;
    let table = toml::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));
    Some(table)
}
