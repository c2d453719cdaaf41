/// Browser-style de-duplicated name: `report.txt`, `report (1).txt`, `report (2).txt`, ...
///
/// `attempt == 0` returns the name unchanged. The counter goes before the
/// last extension; dotfiles and names without an extension get it appended.
pub fn numbered_filename(name: &str, attempt: usize) -> String {
    if attempt == 0 {
        return name.to_string();
    }
    match name.rfind('.') {
        Some(dot) if dot > 0 => {
            let (stem, ext) = name.split_at(dot);
            format!("{stem} ({attempt}){ext}")
        }
        _ => format!("{name} ({attempt})"),
    }
}

#[cfg(test)]
mod tests {
    use super::numbered_filename;

    #[test]
    fn first_attempt_keeps_name() {
        assert_eq!(numbered_filename("tailored-cv.txt", 0), "tailored-cv.txt");
    }

    #[test]
    fn counter_goes_before_extension() {
        assert_eq!(numbered_filename("cover-letter.docx", 1), "cover-letter (1).docx");
        assert_eq!(numbered_filename("a.b.txt", 3), "a.b (3).txt");
    }

    #[test]
    fn names_without_extension_get_suffix() {
        assert_eq!(numbered_filename("notes", 2), "notes (2)");
        assert_eq!(numbered_filename(".env", 1), ".env (1)");
    }
}
