//! Bounded text excerpt handed to the summarizer.

use std::fmt::Write as _;
use std::path::Path;

use super::FileDescriptor;
use crate::config::ExcerptConfig;
use crate::ports::FileSystem;

/// Concatenates the first `max_files` files, each cut to
/// `max_bytes_per_file`, under `FILE: <path>` headers.
///
/// Files that cannot be read as text are skipped without being replaced,
/// so the excerpt may cover fewer files than the cap. The output depends
/// only on the file list and contents, never on timing.
#[must_use]
pub fn build_excerpt(
    root: &Path,
    files: &[FileDescriptor],
    fs: &dyn FileSystem,
    config: &ExcerptConfig,
) -> String {
    let mut excerpt = String::new();
    for descriptor in files.iter().take(config.max_files) {
        let content = match fs.read_to_string(&root.join(&descriptor.path)) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(
                    path = %descriptor.path,
                    error = %e,
                    "skipping unreadable file in excerpt"
                );
                continue;
            }
        };
        let _ = write!(
            excerpt,
            "\nFILE: {}\n{}\n",
            descriptor.path,
            truncate_at_char_boundary(&content, config.max_bytes_per_file)
        );
    }
    excerpt
}

/// Longest prefix of `text` that fits in `max_bytes` without splitting a character.
fn truncate_at_char_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;
    use crate::engine::test_support::write_tree;

    fn descriptor(path: &str) -> FileDescriptor {
        FileDescriptor { path: path.into(), name: path.rsplit('/').next().unwrap_or(path).into() }
    }

    #[test]
    fn caps_file_count_and_size() {
        let dir = tempfile::tempdir().unwrap();
        write_tree(dir.path(), &[("a.js", "abcdefgh"), ("b.js", "12345678"), ("c.js", "zzz")]);
        let files = [descriptor("a.js"), descriptor("b.js"), descriptor("c.js")];
        let config = ExcerptConfig { max_files: 2, max_bytes_per_file: 4 };

        let excerpt = build_excerpt(dir.path(), &files, &LiveFileSystem, &config);
        assert_eq!(excerpt, "\nFILE: a.js\nabcd\n\nFILE: b.js\n1234\n");
    }

    #[test]
    fn unreadable_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_tree(dir.path(), &[("b.js", "ok")]);
        std::fs::write(dir.path().join("a.bin"), [0xff, 0xfe, 0x00]).unwrap();
        let files = [descriptor("a.bin"), descriptor("b.js")];

        let excerpt = build_excerpt(dir.path(), &files, &LiveFileSystem, &ExcerptConfig::default());
        assert_eq!(excerpt, "\nFILE: b.js\nok\n");
    }

    #[test]
    fn truncation_respects_utf8_boundaries() {
        assert_eq!(truncate_at_char_boundary("héllo", 2), "h");
        assert_eq!(truncate_at_char_boundary("héllo", 3), "hé");
        assert_eq!(truncate_at_char_boundary("hi", 10), "hi");
    }
}
