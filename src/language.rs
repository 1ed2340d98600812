// Author: kelexine (https://github.com/kelexine)
// language.rs — Code-file classification by extension and well-known filenames

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;

/// Extensions (lowercase, with leading dot) that mark a file as code.
pub static CODE_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Python
        ".py", ".pyx", ".pyi",
        // JavaScript / TypeScript
        ".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs",
        ".java",
        // C / C++
        ".c", ".cpp", ".cc", ".cxx", ".c++", ".h", ".hpp", ".hxx", ".h++",
        ".cs",
        ".go",
        ".rs",
        ".php", ".php3", ".php4", ".php5", ".phtml",
        ".rb", ".rbw",
        ".swift",
        ".kt", ".kts",
        ".scala", ".sc",
        ".r",
        // Objective-C
        ".m", ".mm",
        // Shell
        ".sh", ".bash", ".zsh", ".fish",
        ".pl", ".pm",
        ".lua",
        ".dart",
        ".elm",
        ".ex", ".exs",
        ".erl", ".hrl",
        ".fs", ".fsx", ".fsi",
        ".hs", ".lhs",
        ".jl",
        ".clj", ".cljs", ".cljc",
        ".ml", ".mli",
        ".pas", ".pp",
        ".asm", ".s",
        ".vb", ".vbs",
        ".groovy", ".gradle",
        ".vue",
        ".svelte",
        ".sql",
        ".xml", ".xsl", ".xslt",
        ".html", ".htm", ".xhtml",
        ".css", ".scss", ".sass", ".less",
        ".json", ".jsonc",
        ".yaml", ".yml",
        ".toml",
        ".ini", ".cfg", ".conf",
        ".dockerfile", ".containerfile",
        ".vim",
        ".ps1", ".psm1",
        ".bat", ".cmd",
        ".makefile", ".mk",
        ".cmake",
        ".proto",
        ".graphql", ".gql",
        ".md", ".markdown",
        ".tex",
        ".nim",
        ".cr",
        ".d",
        ".v",
        ".zig",
    ]
    .iter()
    .copied()
    .collect()
});

/// Extensionless project files (lowercase) that still count as code.
pub static EXTENSIONLESS_FILENAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "makefile", "dockerfile", "containerfile", "rakefile",
        "gemfile", "vagrantfile", "berksfile", "guardfile",
        "podfile", "fastfile", "appfile", "deliverfile",
        "snapfile", "scanfile", "matchfile", "gymfile",
    ]
    .iter()
    .copied()
    .collect()
});

/// Lowercased extension with its leading dot, or `None` when the file has none.
pub fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
}

/// Whether `path` names a code file. Only the name is inspected; the caller
/// is responsible for checking that it is a regular file.
pub fn is_code_file(path: &Path) -> bool {
    match dotted_extension(path) {
        Some(ext) => CODE_EXTENSIONS.contains(ext.as_str()),
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .is_some_and(|name| EXTENSIONLESS_FILENAMES.contains(name.as_str())),
    }
}
