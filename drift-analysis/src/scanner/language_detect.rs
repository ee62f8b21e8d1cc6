//! Language detection by file extension, with a short content sniff for
//! ambiguous cases (spec.md §4.1).

/// A language the analysis engine recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    TypeScript,
    JavaScript,
    Python,
    Java,
    CSharp,
    Go,
    Rust,
    Ruby,
    Php,
    Kotlin,
    Cpp,
    C,
    Swift,
    Scala,
}

impl Language {
    /// Map a file extension (without the leading dot) to a language.
    /// Returns `None` for unrecognized or ambiguous extensions.
    pub fn from_extension(ext: Option<&str>) -> Option<Self> {
        match ext? {
            "ts" | "tsx" | "mts" | "cts" => Some(Self::TypeScript),
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "py" | "pyi" => Some(Self::Python),
            "java" => Some(Self::Java),
            "cs" => Some(Self::CSharp),
            "go" => Some(Self::Go),
            "rs" => Some(Self::Rust),
            "rb" => Some(Self::Ruby),
            "php" => Some(Self::Php),
            "kt" | "kts" => Some(Self::Kotlin),
            "cpp" | "cc" | "cxx" | "hpp" | "hh" => Some(Self::Cpp),
            "c" | "h" => Some(Self::C),
            "swift" => Some(Self::Swift),
            "scala" | "sc" => Some(Self::Scala),
            _ => None,
        }
    }

    /// A short content sniff for extensions shared across languages (e.g. a
    /// bare shebang script) or files with no extension at all.
    pub fn sniff(content_head: &[u8]) -> Option<Self> {
        let text = std::str::from_utf8(content_head).ok()?;
        let first_line = text.lines().next()?;
        if first_line.starts_with("#!") {
            if first_line.contains("python") {
                return Some(Self::Python);
            }
            if first_line.contains("ruby") {
                return Some(Self::Ruby);
            }
            if first_line.contains("node") {
                return Some(Self::JavaScript);
            }
        }
        None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::Java => "java",
            Self::CSharp => "csharp",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Ruby => "ruby",
            Self::Php => "php",
            Self::Kotlin => "kotlin",
            Self::Cpp => "cpp",
            Self::C => "c",
            Self::Swift => "swift",
            Self::Scala => "scala",
        }
    }

    /// The concrete tree-sitter grammar to use for this language. C/C++ and
    /// Swift/Scala have no dedicated grammar in the workspace dependency set,
    /// so they borrow the closest available grammar (C# for C-family,
    /// Java for Swift/Scala) — the same approximation `ParserManager::parser_for`
    /// uses to pick a `LanguageParser`.
    pub fn ts_language_for_ext(&self, ext: Option<&str>) -> tree_sitter::Language {
        match self {
            Self::TypeScript => match ext {
                Some("tsx") => tree_sitter_typescript::LANGUAGE_TSX.into(),
                _ => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            },
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::Java | Self::Swift | Self::Scala => tree_sitter_java::LANGUAGE.into(),
            Self::CSharp | Self::Cpp | Self::C => tree_sitter_c_sharp::LANGUAGE.into(),
            Self::Go => tree_sitter_go::LANGUAGE.into(),
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::Ruby => tree_sitter_ruby::LANGUAGE.into(),
            Self::Php => tree_sitter_php::LANGUAGE_PHP.into(),
            Self::Kotlin => tree_sitter_kotlin_sg::LANGUAGE.into(),
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::JavaScript
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
