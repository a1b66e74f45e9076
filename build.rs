use indoc::indoc;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Manual shown by the desk's Help panel.
const MANUAL_REL: &str = "assets/help.md";
const GENERATED: &str = "desk_manual.rs";

fn main() {
    let manifest = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let manual = Path::new(&manifest).join(MANUAL_REL);
    println!("cargo:rerun-if-changed={}", manual.display());

    let markdown = fs::read_to_string(&manual).expect("desk manual must be UTF-8 markdown");
    let basename = manual
        .file_name()
        .and_then(|s| s.to_str())
        .expect("invalid desk manual filename");
    fs::write(out_dir.join(basename), &markdown).expect("failed to stage desk manual");

    let src = desk_manual_source(basename, &manual_title(&markdown), &modified_rfc3339(&manual));
    fs::write(out_dir.join(GENERATED), src).expect("failed to write desk_manual.rs");
}

/// First top-level heading, or the panel's own name when the manual has none.
fn manual_title(markdown: &str) -> String {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .unwrap_or_else(|| "Help".to_string())
}

// RFC 3339 so the Help panel can pick its own date format
fn modified_rfc3339(path: &Path) -> String {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map(|t| chrono::DateTime::<chrono::Local>::from(t).to_rfc3339())
        .unwrap_or_default()
}

fn desk_manual_source(basename: &str, title: &str, modified: &str) -> String {
    format!(
        indoc!(
            r#"
                /// The desk manual compiled into the binary, read by the Help panel.
                #[derive(Debug, Clone, Copy)]
                pub struct DeskManual {{
                    pub title: &'static str,
                    pub markdown: &'static str,
                    pub modified_rfc3339: &'static str,
                }}

                pub const DESK_MANUAL: DeskManual = DeskManual {{
                    title: {title:?},
                    markdown: include_str!(concat!(env!("OUT_DIR"), "/{basename}")),
                    modified_rfc3339: {modified:?},
                }};
            "#
        ),
        basename = basename,
        title = title,
        modified = modified,
    )
}
