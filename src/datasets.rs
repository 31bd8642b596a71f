use crate::bank::{LoadError, QuestionBank};
use include_dir::{include_dir, Dir};

static BANK_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/banks");

/// Names of the question banks compiled into the binary.
pub fn builtin_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = BANK_DIR
        .files()
        .filter_map(|f| f.path().file_stem())
        .filter_map(|stem| stem.to_str())
        .collect();
    names.sort_unstable();
    names
}

/// Loads a bundled bank by name ("sample" -> banks/sample.csv).
/// Returns `None` when no such bank is bundled.
pub fn load_builtin(name: &str) -> Option<Result<QuestionBank, LoadError>> {
    let file = BANK_DIR.get_file(format!("{name}.csv"))?;
    Some(QuestionBank::load_from_reader(file.contents()))
}
