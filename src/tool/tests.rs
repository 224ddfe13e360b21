use super::expand::expand_env;
use super::*;

fn env<'a>(pairs: &'a [(&'a str, String)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |name| {
        pairs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.clone())
    }
}

fn install(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, b"").unwrap();
    path
}

#[test]
fn test_user_local_install_wins_over_program_files() {
    let local = tempfile::tempdir().unwrap();
    let program_files = tempfile::tempdir().unwrap();
    let user_exe = install(local.path(), "Programs/QuickLook/QuickLook.exe");
    install(program_files.path(), "QuickLook/QuickLook.exe");

    let vars = [
        ("LOCALAPPDATA", local.path().display().to_string()),
        ("ProgramFiles", program_files.path().display().to_string()),
    ];
    let locator = ToolLocator::new(
        vec![
            "%LOCALAPPDATA%/Programs/QuickLook/QuickLook.exe".into(),
            "%ProgramFiles%/QuickLook/QuickLook.exe".into(),
        ],
        None,
    );

    let found = locator.locate_with(env(&vars)).unwrap();
    assert_eq!(found.executable, user_exe);
    assert_eq!(found.process_name(), "QuickLook.exe");
}

#[test]
fn test_falls_through_to_later_candidate() {
    let local = tempfile::tempdir().unwrap();
    let program_files = tempfile::tempdir().unwrap();
    let system_exe = install(program_files.path(), "QuickLook/QuickLook.exe");

    let vars = [
        ("LOCALAPPDATA", local.path().display().to_string()),
        ("ProgramFiles", program_files.path().display().to_string()),
    ];
    let locator = ToolLocator::new(
        vec![
            "%LOCALAPPDATA%/Programs/QuickLook/QuickLook.exe".into(),
            "%ProgramFiles%/QuickLook/QuickLook.exe".into(),
        ],
        None,
    );

    assert_eq!(locator.locate_with(env(&vars)).unwrap().executable, system_exe);
}

#[test]
fn test_directory_is_not_a_match() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("QuickLook.exe")).unwrap();

    let vars = [("ROOT", root.path().display().to_string())];
    let locator = ToolLocator::new(vec!["${ROOT}/QuickLook.exe".into()], None);
    assert!(locator.locate_with(env(&vars)).is_none());
}

#[test]
fn test_unset_variable_skips_candidate() {
    let root = tempfile::tempdir().unwrap();
    let exe = install(root.path(), "sushi");

    // ProgramFiles(x86) only exists on 64-bit Windows
    let vars = [("HOME", root.path().display().to_string())];
    let locator = ToolLocator::new(
        vec!["%ProgramFiles(x86)%/sushi".into(), "$HOME/sushi".into()],
        None,
    );
    assert_eq!(locator.locate_with(env(&vars)).unwrap().executable, exe);
}

#[test]
fn test_exhausted_candidates_is_not_found() {
    let locator = ToolLocator::new(vec!["/definitely/not/here/QuickLook.exe".into()], None);
    assert!(locator.locate_with(|_| None).is_none());
}

#[test]
fn test_expand_percent_style() {
    let vars = [("ProgramFiles(x86)", r"C:\Program Files (x86)".to_string())];
    assert_eq!(
        expand_env(r"%ProgramFiles(x86)%\QuickLook\QuickLook.exe", env(&vars)).as_deref(),
        Some(r"C:\Program Files (x86)\QuickLook\QuickLook.exe")
    );
}

#[test]
fn test_expand_dollar_styles_and_tilde() {
    let vars = [
        ("HOME", "/home/ada".to_string()),
        ("XDG_BIN", "/opt/bin".to_string()),
    ];
    assert_eq!(
        expand_env("~/.local/bin/sushi", env(&vars)).as_deref(),
        Some("/home/ada/.local/bin/sushi")
    );
    assert_eq!(
        expand_env("${XDG_BIN}/sushi", env(&vars)).as_deref(),
        Some("/opt/bin/sushi")
    );
    assert_eq!(
        expand_env("$XDG_BIN/sushi", env(&vars)).as_deref(),
        Some("/opt/bin/sushi")
    );
}

#[test]
fn test_expand_literals_pass_through() {
    assert_eq!(expand_env("/usr/bin/sushi", |_| None).as_deref(), Some("/usr/bin/sushi"));
    assert_eq!(expand_env("100%%/x", |_| None).as_deref(), Some("100%/x"));
    assert_eq!(expand_env("cost$/x", |_| None).as_deref(), Some("cost$/x"));
    assert_eq!(expand_env("~user/x", |_| None).as_deref(), Some("~user/x"));
}

#[test]
fn test_expand_empty_variable_is_unresolved() {
    let vars = [("LOCALAPPDATA", String::new())];
    assert!(expand_env("%LOCALAPPDATA%/x", env(&vars)).is_none());
    assert!(expand_env("${UNTERMINATED/x", env(&vars)).is_none());
}
