// Author: kelexine (https://github.com/kelexine)
// matcher.rs — .gitignore rule aggregation and matching

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use ignore::Match;
use ignore::gitignore::{Gitignore, GitignoreBuilder, Glob};
use tracing::{debug, warn};
use walkdir::WalkDir;

const GITIGNORE: &str = ".gitignore";

/// How `.gitignore` rules from different directories are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IgnoreMode {
    /// Each `.gitignore` only applies below the directory that holds it,
    /// and deeper files take precedence over shallower ones.
    #[default]
    Scoped,
    /// Every pattern from the root and its ancestors goes into one unscoped
    /// list matched against root-relative paths.
    Flat,
}

enum Rules {
    None,
    Flat(Gitignore),
    /// Ordered deepest directory first.
    Scoped(Vec<Gitignore>),
}

/// Ignore rules for one scan root. Built once, queried per candidate file.
pub struct IgnoreMatcher {
    root: PathBuf,
    rules: Rules,
    /// The root itself sits inside a directory excluded by an ancestor
    /// `.gitignore` (scoped mode only).
    root_ignored: bool,
}

impl IgnoreMatcher {
    /// Collect `.gitignore` rules for `root` (expected to be canonical).
    ///
    /// Both modes read the `.gitignore` of `root` and of every ancestor up to
    /// the filesystem root. Scoped mode additionally loads every `.gitignore`
    /// found inside the tree, and treats a root lying in an ancestor-ignored
    /// directory as ignored along with everything beneath it. Unreadable or malformed files never fail the
    /// build: the matcher degrades towards ignoring less.
    pub fn build(root: &Path, mode: IgnoreMode) -> Self {
        let rules = match mode {
            IgnoreMode::Flat => build_flat(root),
            IgnoreMode::Scoped => build_scoped(root),
        };
        let root_ignored = match &rules {
            Rules::Scoped(layers) => root_excluded(layers, root),
            _ => false,
        };
        if root_ignored {
            warn!(root = %root.display(), "scan root is excluded by an ancestor .gitignore");
        }
        Self {
            root: root.to_path_buf(),
            rules,
            root_ignored,
        }
    }

    /// Matcher that ignores nothing.
    #[cfg(test)]
    pub fn empty(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            rules: Rules::None,
            root_ignored: false,
        }
    }

    pub fn has_rules(&self) -> bool {
        !matches!(self.rules, Rules::None)
    }

    /// Whether `path` is excluded. `path` may be relative to the scan root or
    /// an absolute path beneath it; anything else is reported as not ignored.
    pub fn is_ignored(&self, path: &Path) -> bool {
        if !self.has_rules() {
            return false;
        }

        let rel = if path.is_absolute() {
            match path.strip_prefix(&self.root) {
                Ok(rel) => rel,
                Err(_) => return false,
            }
        } else {
            path
        };
        if rel.as_os_str().is_empty() || rel.has_root() {
            return false;
        }
        if rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return false;
        }

        let is_dir = self.root.join(rel).is_dir();
        match &self.rules {
            Rules::None => false,
            Rules::Flat(gitignore) => {
                let normalized = normalize_separators(rel);
                gitignore
                    .matched_path_or_any_parents(Path::new(normalized.as_ref()), is_dir)
                    .is_ignore()
            }
            Rules::Scoped(layers) => {
                self.root_ignored || self.scoped_is_ignored(layers, rel, is_dir)
            }
        }
    }

    /// Walks from the root towards `rel` one component at a time. An ignored
    /// directory hides everything beneath it, so the first decisive ignore
    /// on the way down ends the search.
    fn scoped_is_ignored(&self, layers: &[Gitignore], rel: &Path, is_dir: bool) -> bool {
        let components: Vec<_> = rel
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect();
        let mut current = self.root.clone();
        for (i, component) in components.iter().enumerate() {
            current.push(component);
            let last = i + 1 == components.len();
            if scoped_match(layers, &current, if last { is_dir } else { true }).is_ignore() {
                return true;
            }
        }
        false
    }
}

/// First decisive match among the layers that govern `path`, deepest first.
fn scoped_match<'a>(layers: &'a [Gitignore], path: &Path, is_dir: bool) -> Match<&'a Glob> {
    for layer in layers {
        if path == layer.path() || !path.starts_with(layer.path()) {
            continue;
        }
        let m = layer.matched(path, is_dir);
        if !m.is_none() {
            return m;
        }
    }
    Match::None
}

/// Whether an ancestor layer excludes `root` or any directory above it.
fn root_excluded(layers: &[Gitignore], root: &Path) -> bool {
    let mut dirs: Vec<&Path> = root.ancestors().collect();
    dirs.reverse();
    dirs.into_iter()
        .any(|dir| scoped_match(layers, dir, true).is_ignore())
}

fn normalize_separators(path: &Path) -> Cow<'_, str> {
    let s = path.to_string_lossy();
    if s.contains('\\') {
        Cow::Owned(s.replace('\\', "/"))
    } else {
        s
    }
}

/// Pattern lines of one `.gitignore`: decoded lossily, trimmed, with blanks
/// and comments removed. Unreadable files contribute nothing.
pub fn read_patterns(path: &Path) -> Vec<String> {
    match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "unreadable .gitignore skipped");
            Vec::new()
        }
    }
}

/// `.gitignore` files of `root` and each of its ancestors, nearest first.
fn ancestor_gitignores(root: &Path) -> Vec<PathBuf> {
    root.ancestors()
        .map(|dir| dir.join(GITIGNORE))
        .filter(|p| p.is_file())
        .collect()
}

fn build_flat(root: &Path) -> Rules {
    let patterns: Vec<String> = ancestor_gitignores(root)
        .iter()
        .flat_map(|p| read_patterns(p))
        .collect();
    if patterns.is_empty() {
        return Rules::None;
    }

    let mut builder = GitignoreBuilder::new(root);
    for line in &patterns {
        if let Err(e) = builder.add_line(None, line) {
            warn!(pattern = %line, error = %e, "invalid ignore pattern; ignore rules disabled");
            return Rules::None;
        }
    }
    match builder.build() {
        Ok(gitignore) => {
            debug!(patterns = patterns.len(), "flat ignore rules compiled");
            Rules::Flat(gitignore)
        }
        Err(e) => {
            warn!(error = %e, "failed to compile ignore rules; ignore rules disabled");
            Rules::None
        }
    }
}

fn build_scoped(root: &Path) -> Rules {
    let mut files = ancestor_gitignores(root);

    // Nested files below the root; the root's own file is already an ancestor.
    files.extend(
        WalkDir::new(root)
            .follow_links(false)
            .min_depth(2)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && e.file_name() == GITIGNORE)
            .map(|e| e.into_path()),
    );

    let mut layers: Vec<Gitignore> = files.iter().filter_map(|p| build_layer(p)).collect();
    if layers.is_empty() {
        return Rules::None;
    }
    layers.sort_by_key(|g| std::cmp::Reverse(g.path().components().count()));
    debug!(layers = layers.len(), "scoped ignore rules compiled");
    Rules::Scoped(layers)
}

fn build_layer(file: &Path) -> Option<Gitignore> {
    let dir = file.parent()?;
    let patterns = read_patterns(file);
    if patterns.is_empty() {
        return None;
    }

    let mut builder = GitignoreBuilder::new(dir);
    for line in &patterns {
        if let Err(e) = builder.add_line(Some(file.to_path_buf()), line) {
            warn!(file = %file.display(), pattern = %line, error = %e, "invalid ignore pattern; file skipped");
            return None;
        }
    }
    match builder.build() {
        Ok(g) => Some(g),
        Err(e) => {
            warn!(file = %file.display(), error = %e, "failed to compile ignore file; skipped");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn canonical(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().canonicalize().unwrap()
    }

    #[test]
    fn test_no_gitignore_ignores_nothing() {
        let dir = tempdir().unwrap();
        let root = canonical(&dir);
        fs::write(root.join("a.rs"), "fn a() {}\n").unwrap();

        let matcher = IgnoreMatcher::empty(&root);
        assert!(!matcher.has_rules());
        assert!(!matcher.is_ignored(Path::new("a.rs")));
    }

    #[test]
    fn test_read_patterns_skips_comments_and_blanks() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(".gitignore");
        fs::write(&file, "# deps\nnode_modules/\n\n   \n  *.log  \n#x\n").unwrap();
        assert_eq!(read_patterns(&file), vec!["node_modules/", "*.log"]);
    }

    #[test]
    fn test_read_patterns_tolerates_invalid_utf8() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(".gitignore");
        fs::write(&file, b"build/\n\xff\xfe junk\n*.tmp\n").unwrap();
        let patterns = read_patterns(&file);
        assert!(patterns.contains(&"build/".to_string()));
        assert!(patterns.contains(&"*.tmp".to_string()));
    }

    #[test]
    fn test_directory_pattern_hides_descendants() {
        for mode in [IgnoreMode::Scoped, IgnoreMode::Flat] {
            let dir = tempdir().unwrap();
            let root = canonical(&dir);
            fs::write(root.join(".gitignore"), "node_modules/\n").unwrap();
            fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
            fs::write(root.join("node_modules/pkg/index.js"), "x\n").unwrap();
            fs::write(root.join("main.js"), "x\n").unwrap();

            let matcher = IgnoreMatcher::build(&root, mode);
            assert!(matcher.is_ignored(Path::new("node_modules/pkg/index.js")), "{mode:?}");
            assert!(matcher.is_ignored(&root.join("node_modules/pkg/index.js")), "{mode:?}");
            assert!(!matcher.is_ignored(Path::new("main.js")), "{mode:?}");
        }
    }

    #[test]
    fn test_glob_and_negation() {
        for mode in [IgnoreMode::Scoped, IgnoreMode::Flat] {
            let dir = tempdir().unwrap();
            let root = canonical(&dir);
            fs::write(root.join(".gitignore"), "*.gen.ts\n!keep.gen.ts\n").unwrap();
            fs::write(root.join("api.gen.ts"), "x\n").unwrap();
            fs::write(root.join("keep.gen.ts"), "x\n").unwrap();

            let matcher = IgnoreMatcher::build(&root, mode);
            assert!(matcher.is_ignored(Path::new("api.gen.ts")), "{mode:?}");
            assert!(!matcher.is_ignored(Path::new("keep.gen.ts")), "{mode:?}");
        }
    }

    #[test]
    fn test_anchored_pattern() {
        let dir = tempdir().unwrap();
        let root = canonical(&dir);
        fs::write(root.join(".gitignore"), "/generated.rs\n").unwrap();
        fs::create_dir(root.join("src")).unwrap();
        fs::write(root.join("generated.rs"), "x\n").unwrap();
        fs::write(root.join("src/generated.rs"), "x\n").unwrap();

        let matcher = IgnoreMatcher::build(&root, IgnoreMode::Scoped);
        assert!(matcher.is_ignored(Path::new("generated.rs")));
        assert!(!matcher.is_ignored(Path::new("src/generated.rs")));
    }

    #[test]
    fn test_ancestor_gitignore_applies_below_root() {
        for mode in [IgnoreMode::Scoped, IgnoreMode::Flat] {
            let dir = tempdir().unwrap();
            let outer = canonical(&dir);
            fs::write(outer.join(".gitignore"), "*.snap.js\n").unwrap();
            let root = outer.join("project");
            fs::create_dir(&root).unwrap();
            fs::write(root.join("ui.snap.js"), "x\n").unwrap();

            let matcher = IgnoreMatcher::build(&root, mode);
            assert!(matcher.is_ignored(Path::new("ui.snap.js")), "{mode:?}");
        }
    }

    #[test]
    fn test_ancestor_gitignore_excluding_the_root() {
        let dir = tempdir().unwrap();
        let outer = canonical(&dir);
        fs::write(outer.join(".gitignore"), "project/\n").unwrap();
        let root = outer.join("project");
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("a.rs"), "x\n").unwrap();
        fs::write(root.join("src/b.rs"), "x\n").unwrap();

        let matcher = IgnoreMatcher::build(&root, IgnoreMode::Scoped);
        assert!(matcher.is_ignored(Path::new("a.rs")));
        assert!(matcher.is_ignored(Path::new("src/b.rs")));
        assert!(!matcher.is_ignored(Path::new("/definitely/elsewhere.rs")));

        // Flat patterns are rooted at the scan root, so `project/` names a
        // child directory there.
        let flat = IgnoreMatcher::build(&root, IgnoreMode::Flat);
        assert!(!flat.is_ignored(Path::new("a.rs")));
    }

    #[test]
    fn test_ancestor_gitignore_excluding_a_grandparent() {
        let dir = tempdir().unwrap();
        let outer = canonical(&dir);
        fs::write(outer.join(".gitignore"), "build/\n").unwrap();
        let root = outer.join("build/gen");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("out.rs"), "x\n").unwrap();

        let matcher = IgnoreMatcher::build(&root, IgnoreMode::Scoped);
        assert!(matcher.is_ignored(Path::new("out.rs")));
    }

    #[test]
    fn test_nested_gitignore_is_scoped_to_its_directory() {
        let dir = tempdir().unwrap();
        let root = canonical(&dir);
        fs::create_dir_all(root.join("web")).unwrap();
        fs::write(root.join("web/.gitignore"), "*.min.js\n").unwrap();
        fs::write(root.join("web/app.min.js"), "x\n").unwrap();
        fs::write(root.join("vendor.min.js"), "x\n").unwrap();

        let matcher = IgnoreMatcher::build(&root, IgnoreMode::Scoped);
        assert!(matcher.is_ignored(Path::new("web/app.min.js")));
        assert!(!matcher.is_ignored(Path::new("vendor.min.js")));
    }

    #[test]
    fn test_deeper_gitignore_overrides_shallower() {
        let dir = tempdir().unwrap();
        let root = canonical(&dir);
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join(".gitignore"), "*.md\n").unwrap();
        fs::write(root.join("docs/.gitignore"), "!guide.md\n").unwrap();

        let matcher = IgnoreMatcher::build(&root, IgnoreMode::Scoped);
        assert!(matcher.is_ignored(Path::new("NOTES.md")));
        assert!(matcher.is_ignored(Path::new("docs/other.md")));
        assert!(!matcher.is_ignored(Path::new("docs/guide.md")));
    }

    #[test]
    fn test_flat_mode_ignores_nested_gitignores() {
        let dir = tempdir().unwrap();
        let root = canonical(&dir);
        fs::create_dir_all(root.join("web")).unwrap();
        fs::write(root.join("web/.gitignore"), "*.min.js\n").unwrap();

        let matcher = IgnoreMatcher::build(&root, IgnoreMode::Flat);
        assert!(!matcher.is_ignored(Path::new("web/app.min.js")));
    }

    #[test]
    fn test_paths_outside_root_are_not_ignored() {
        let dir = tempdir().unwrap();
        let root = canonical(&dir);
        fs::write(root.join(".gitignore"), "*\n").unwrap();

        let matcher = IgnoreMatcher::build(&root, IgnoreMode::Flat);
        assert!(matcher.is_ignored(Path::new("anything.rs")));
        assert!(!matcher.is_ignored(Path::new("/definitely/elsewhere.rs")));
        assert!(!matcher.is_ignored(Path::new("../escape.rs")));
    }

    #[test]
    fn test_backslash_separators_normalized() {
        assert_eq!(normalize_separators(Path::new(r"a\b\c.rs")), "a/b/c.rs");
        assert_eq!(normalize_separators(Path::new("a/b.rs")), "a/b.rs");
    }
}
