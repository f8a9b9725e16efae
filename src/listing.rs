//! Directory listings and the top-level "available paths" summary.

use crate::config::DocRoot;
use crate::fs::{DirEntry, DocFs, EntryKind};
use crate::path::join_segments;
use crate::resolve::ResolvedDocPath;
use std::cmp::Ordering;
use std::io;
use std::path::PathBuf;

/// Directory under the root whose children are always advertised.
const REFERENCE_DIR: &str = "reference";

/// A Markdown file found in a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedFile {
    /// Display path, including the root prefix (e.g. `docs/overview/a.md`).
    pub display_path: String,
    pub absolute_path: PathBuf,
}

/// Immediate children of a resolved directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Display paths with a trailing `/`.
    pub subdirectories: Vec<String>,
    pub files: Vec<ListedFile>,
}

impl DirectoryListing {
    pub fn file_paths(&self) -> Vec<String> {
        self.files.iter().map(|f| f.display_path.clone()).collect()
    }
}

/// Case-folded ordering with a byte-order tiebreak, so `Apple` sorts next
/// to `apple` rather than before every lowercase name.
pub fn display_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// List subdirectories and `.md` files directly inside `dir`.
pub async fn list_directory<F: DocFs>(
    fs: &F,
    root: &DocRoot,
    dir: &ResolvedDocPath,
) -> io::Result<DirectoryListing> {
    let entries = fs.read_dir(&dir.absolute_path).await?;
    let relative = if dir.is_root() { "" } else { dir.relative_path.as_str() };
    let display = |name: &str| join_segments([root.relative_path(), relative, name]);

    let mut listing = DirectoryListing::default();
    for DirEntry { name, kind } in entries {
        match kind {
            EntryKind::Directory => listing.subdirectories.push(format!("{}/", display(&name))),
            EntryKind::File if name.ends_with(".md") => listing.files.push(ListedFile {
                display_path: display(&name),
                absolute_path: dir.absolute_path.join(&name),
            }),
            _ => {}
        }
    }

    listing.subdirectories.sort_by(|a, b| display_order(a, b));
    listing
        .files
        .sort_by(|a, b| display_order(&a.display_path, &b.display_path));

    Ok(listing)
}

fn is_markdown_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with(".md") || lower.ends_with(".mdx")
}

/// Root-relative paths worth showing to a caller who has not found anything
/// yet: top-level directories and Markdown files, plus the directories inside
/// `reference/`.
pub async fn available_paths<F: DocFs>(fs: &F, root: &DocRoot) -> io::Result<Vec<String>> {
    let entries = fs.read_dir(root.absolute_path()).await?;

    let mut paths = Vec::new();
    let mut has_reference = false;
    for DirEntry { name, kind } in entries {
        match kind {
            EntryKind::Directory => {
                has_reference |= name == REFERENCE_DIR;
                paths.push(format!("{}/", name));
            }
            EntryKind::File if is_markdown_name(&name) => paths.push(name),
            _ => {}
        }
    }

    if has_reference {
        let reference = root.absolute_path().join(REFERENCE_DIR);
        match fs.read_dir(&reference).await {
            Ok(children) => paths.extend(
                children
                    .into_iter()
                    .filter(|e| e.kind == EntryKind::Directory)
                    .map(|e| format!("{}/{}/", REFERENCE_DIR, e.name)),
            ),
            Err(e) => tracing::warn!("Failed to list {}: {}", reference.display(), e),
        }
    }

    paths.sort_by(|a, b| display_order(a, b));
    Ok(paths)
}

/// Render the available-paths hint block; empty when there is nothing to show.
pub fn format_available_paths(paths: &[String]) -> String {
    if paths.is_empty() {
        return String::new();
    }

    let mut block = String::from("Available paths:\n");
    for path in paths {
        block.push_str("- ");
        block.push_str(path);
        block.push('\n');
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;
    use crate::resolve::{PathResolver, Resolution};
    use assert2::{check, let_assert};
    use std::path::Path;
    use std::sync::Arc;

    fn fixture() -> (MemoryFs, Arc<DocRoot>) {
        let fs = MemoryFs::new()
            .with_file("/srv/docs/index.md", "Welcome")
            .with_file("/srv/docs/Zeta.md", "z")
            .with_file("/srv/docs/notes.txt", "not markdown")
            .with_file("/srv/docs/page.MDX", "mdx")
            .with_file("/srv/docs/overview/b.md", "b")
            .with_file("/srv/docs/overview/a.md", "a")
            .with_file("/srv/docs/overview/deep/c.md", "c")
            .with_file("/srv/docs/reference/api/client.md", "client")
            .with_file("/srv/docs/reference/cli/run.md", "run")
            .with_file("/srv/docs/reference/glossary.md", "terms");
        let root = Arc::new(DocRoot::new("docs", "/srv/docs").unwrap());
        (fs, root)
    }

    async fn resolve(fs: &MemoryFs, root: &Arc<DocRoot>, path: &str) -> ResolvedDocPath {
        let resolver = PathResolver::new(root.clone(), fs.clone());
        let_assert!(Resolution::Found(found) = resolver.resolve(path).await);
        found
    }

    #[tokio::test]
    async fn test_list_subdirectory() {
        let (fs, root) = fixture();
        let dir = resolve(&fs, &root, "overview").await;
        let listing = list_directory(&fs, &root, &dir).await.unwrap();

        check!(listing.subdirectories == vec!["docs/overview/deep/"]);
        check!(listing.file_paths() == vec!["docs/overview/a.md", "docs/overview/b.md"]);
        check!(listing.files[0].absolute_path == Path::new("/srv/docs/overview/a.md"));
    }

    #[tokio::test]
    async fn test_list_display_paths_skip_current_dir_segments() {
        let (fs, root) = fixture();
        let dir = resolve(&fs, &root, "./overview/./").await;
        let listing = list_directory(&fs, &root, &dir).await.unwrap();

        check!(listing.subdirectories == vec!["docs/overview/deep/"]);
        check!(listing.file_paths() == vec!["docs/overview/a.md", "docs/overview/b.md"]);
    }

    #[tokio::test]
    async fn test_list_root_filters_non_markdown() {
        let (fs, root) = fixture();
        let dir = resolve(&fs, &root, "").await;
        let listing = list_directory(&fs, &root, &dir).await.unwrap();

        check!(listing.subdirectories == vec!["docs/overview/", "docs/reference/"]);
        // `.MDX` is not part of the primary listing.
        check!(listing.file_paths() == vec!["docs/index.md", "docs/Zeta.md"]);
    }

    #[tokio::test]
    async fn test_listing_is_deterministic() {
        let (fs, root) = fixture();
        let dir = resolve(&fs, &root, "docs").await;
        let first = list_directory(&fs, &root, &dir).await.unwrap();
        let second = list_directory(&fs, &root, &dir).await.unwrap();
        check!(first == second);
    }

    #[tokio::test]
    async fn test_available_paths_include_reference_children() {
        let (fs, root) = fixture();
        let paths = available_paths(&fs, &root).await.unwrap();
        check!(
            paths
                == vec![
                    "index.md",
                    "overview/",
                    "page.MDX",
                    "reference/",
                    "reference/api/",
                    "reference/cli/",
                    "Zeta.md",
                ]
        );
    }

    #[test]
    fn test_format_available_paths() {
        check!(format_available_paths(&[]).is_empty());
        check!(
            format_available_paths(&["a/".to_string(), "b.md".to_string()])
                == "Available paths:\n- a/\n- b.md\n"
        );
    }

    #[test]
    fn test_display_order_folds_case() {
        let mut names = vec!["beta", "Alpha", "alpha", "Gamma"];
        names.sort_by(|a, b| display_order(a, b));
        check!(names == vec!["Alpha", "alpha", "beta", "Gamma"]);
    }
}
