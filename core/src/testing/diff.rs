use std::{borrow::Cow, path::Path};

/// Canonical form used for comparison: carriage returns before a line feed are removed, then
/// a single trailing `\n` is dropped. A text ending with two or more newlines keeps them, so
/// applying this twice is the same as applying it once.
pub fn normalize(text: &str) -> Cow<'_, str> {
    let text = unify_line_endings(text);

    if text.ends_with('\n') && !text.ends_with("\n\n") {
        match text {
            Cow::Borrowed(s) => Cow::Borrowed(&s[..s.len() - 1]),
            Cow::Owned(mut s) => {
                s.pop();
                Cow::Owned(s)
            }
        }
    } else {
        text
    }
}

fn unify_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains("\r\n") {
        return Cow::Borrowed(text);
    }
    let mut lines: Vec<&str> = text.split('\n').collect();
    let last = lines.len() - 1;
    for line in &mut lines[..last] {
        *line = line.trim_end_matches('\r');
    }
    Cow::Owned(lines.join("\n"))
}

/// Rewrites `filepath` in its normalized form (if that changes anything) and returns it.
/// A file that is not valid UTF-8 is decoded lossily for comparison and left untouched.
pub fn normalize_file(filepath: impl AsRef<Path>) -> fsutil::Result<String> {
    let filepath = filepath.as_ref();
    let raw = match String::from_utf8(fsutil::read(filepath)?) {
        Ok(raw) => raw,
        Err(e) => {
            log::debug!("{} is not valid UTF-8: {}", filepath.to_string_lossy(), e);
            let lossy = String::from_utf8_lossy(e.as_bytes());
            return Ok(normalize(&lossy).into_owned());
        }
    };
    let normalized = match normalize(&raw) {
        Cow::Borrowed(s) if s.len() == raw.len() => None,
        changed => Some(changed.into_owned()),
    };
    let Some(normalized) = normalized else {
        return Ok(raw)
    };
    log::debug!("Normalized {}", filepath.to_string_lossy());
    fsutil::write(filepath, &normalized)?;
    Ok(normalized)
}

/// Normalizes both files in place, then compares them exactly.
pub fn compare_files(actual: impl AsRef<Path>, expected: impl AsRef<Path>) -> fsutil::Result<bool> {
    let expected = normalize_file(expected)?;
    let actual = normalize_file(actual)?;
    Ok(actual == expected)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn normalize_ok() {
        assert_eq!(normalize("hello\n"), "hello");
        assert_eq!(normalize("hello"), "hello");
        assert_eq!(normalize("hello\n\n"), "hello\n\n");
        assert_eq!(normalize("a\nb\n"), "a\nb");
        assert_eq!(normalize("a\r\nb\r\n"), "a\nb");
        assert_eq!(normalize("a\r\r\nb\n"), "a\nb");
        assert_eq!(normalize("a\rb\n"), "a\rb");
        assert_eq!(normalize("a \n"), "a ");
        assert_eq!(normalize("\n"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in [
            "hello\n",
            "hello\n\n",
            "x\r\n",
            "x\r\n\r\n",
            "a\r\r\n\n",
            "",
            "\n\n\n",
            "a\rb\n",
        ] {
            let once = normalize(s).into_owned();
            assert_eq!(normalize(&once), once, "input={:?}", s);
        }
    }

    fn write_pair(out: &str, ans: &str) -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("1.out");
        let ans_path = dir.path().join("1.ans");
        fsutil::write(&out_path, out).unwrap();
        fsutil::write(&ans_path, ans).unwrap();
        (dir, out_path, ans_path)
    }

    #[test]
    fn single_trailing_newline_is_tolerated() {
        let (_dir, out, ans) = write_pair("hello", "hello\n");
        assert!(compare_files(&out, &ans).unwrap());
        assert_eq!(fsutil::read_to_string(&ans).unwrap(), "hello");
        assert_eq!(fsutil::read_to_string(&out).unwrap(), "hello");
    }

    #[test]
    fn double_trailing_newline_is_not_tolerated() {
        let (_dir, out, ans) = write_pair("hello", "hello\n\n");
        assert!(!compare_files(&out, &ans).unwrap());
        assert_eq!(fsutil::read_to_string(&ans).unwrap(), "hello\n\n");
    }

    #[test]
    fn carriage_returns_are_normalized() {
        let (_dir, out, ans) = write_pair("1 2\n3\n", "1 2\r\n3\r\n");
        assert!(compare_files(&out, &ans).unwrap());
        assert_eq!(fsutil::read_to_string(&ans).unwrap(), "1 2\n3");
    }

    #[test]
    fn comparison_is_exact() {
        let (_dir, out, ans) = write_pair("3 \n", "3\n");
        assert!(!compare_files(&out, &ans).unwrap());

        let (_dir, out, ans) = write_pair("1.0\n", "1\n");
        assert!(!compare_files(&out, &ans).unwrap());
    }

    #[test]
    fn non_utf8_output_is_wrong_answer_and_kept_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("1.out");
        let ans = dir.path().join("1.ans");
        fsutil::write(&out, [0xffu8, 0xfe, b'\n']).unwrap();
        fsutil::write(&ans, "3\n").unwrap();

        assert!(!compare_files(&out, &ans).unwrap());
        assert_eq!(fsutil::read(&out).unwrap(), vec![0xff, 0xfe, b'\n']);
        assert_eq!(fsutil::read_to_string(&ans).unwrap(), "3");
        assert_eq!(normalize_file(&out).unwrap(), "\u{fffd}\u{fffd}");
    }

    #[test]
    fn second_run_changes_nothing() {
        for (out, ans) in [("hello\n", "hello"), ("hello", "hello\n\n"), ("a\r\n", "b\n")] {
            let (_dir, out_path, ans_path) = write_pair(out, ans);

            let first = compare_files(&out_path, &ans_path).unwrap();
            let out_after_first = fsutil::read_to_string(&out_path).unwrap();
            let ans_after_first = fsutil::read_to_string(&ans_path).unwrap();

            let second = compare_files(&out_path, &ans_path).unwrap();
            assert_eq!(first, second);
            assert_eq!(fsutil::read_to_string(&out_path).unwrap(), out_after_first);
            assert_eq!(fsutil::read_to_string(&ans_path).unwrap(), ans_after_first);
        }
    }
}
