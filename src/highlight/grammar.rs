use std::path::Path;

use tracing::info;

use super::HighlightType;

/// Keyword lists and comment/string markers for one file type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    pub name: &'static str,
    /// Matched exactly against everything from the first `.` of the file name
    pub file_extensions: &'static [&'static str],
    pub builtin_type_keywords: &'static [&'static str],
    pub control_keywords: &'static [&'static str],
    pub other_keywords: &'static [&'static str],
    pub single_line_comment: Option<&'static str>,
    /// (start, end) markers of a block comment
    pub multi_line_comment: Option<(&'static str, &'static str)>,
    /// A quote preceded by an odd run of this byte does not close a string
    pub string_escape: Option<u8>,
}

impl Grammar {
    /// Classify a token: digits are numbers, then the keyword lists are
    /// checked in priority order (built-in types, control, other).
    pub fn classify(&self, token: &[u8]) -> Option<HighlightType> {
        if token.is_empty() {
            return None;
        }
        if token.iter().all(u8::is_ascii_digit) {
            return Some(HighlightType::Number);
        }

        let matches = |list: &[&str]| list.iter().any(|kw| kw.as_bytes() == token);
        if matches(self.builtin_type_keywords) {
            Some(HighlightType::KeywordBuiltInType)
        } else if matches(self.control_keywords) {
            Some(HighlightType::KeywordControl)
        } else if matches(self.other_keywords) {
            Some(HighlightType::KeywordOther)
        } else {
            None
        }
    }
}

pub static CPP: Grammar = Grammar {
    name: "C++",
    file_extensions: &[".cpp", ".hpp", ".cc", ".hh", ".cxx", ".hxx", ".c", ".h"],
    builtin_type_keywords: &[
        "bool", "char", "char8_t", "char16_t", "char32_t", "double", "float", "int", "long",
        "short", "signed", "unsigned", "void", "wchar_t", "auto", "size_t", "int8_t", "int16_t",
        "int32_t", "int64_t", "uint8_t", "uint16_t", "uint32_t", "uint64_t",
    ],
    control_keywords: &[
        "break", "case", "catch", "continue", "default", "do", "else", "for", "goto", "if",
        "return", "switch", "throw", "try", "while", "co_await", "co_return", "co_yield",
    ],
    other_keywords: &[
        "alignas", "alignof", "class", "const", "consteval", "constexpr", "constinit",
        "const_cast", "decltype", "delete", "dynamic_cast", "enum", "explicit", "export",
        "extern", "false", "friend", "inline", "mutable", "namespace", "new", "noexcept",
        "nullptr", "operator", "private", "protected", "public", "reinterpret_cast", "sizeof",
        "static", "static_assert", "static_cast", "struct", "template", "this", "thread_local",
        "true", "typedef", "typeid", "typename", "union", "using", "virtual", "volatile",
        "include", "define", "ifdef", "ifndef", "endif", "pragma",
    ],
    single_line_comment: Some("//"),
    multi_line_comment: Some(("/*", "*/")),
    string_escape: Some(b'\\'),
};

/// Registered grammars, searched in registration order.
#[derive(Debug, Clone, Default)]
pub struct GrammarCatalog {
    grammars: Vec<Grammar>,
}

impl GrammarCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with the built-in C++ grammar
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(CPP.clone());
        catalog
    }

    pub fn register(&mut self, grammar: Grammar) {
        self.grammars.push(grammar);
    }

    pub fn grammars(&self) -> &[Grammar] {
        &self.grammars
    }

    /// First grammar listing the file's extension, if any
    pub fn select(&self, path: &Path) -> Option<&Grammar> {
        let file_name = path.file_name()?.to_str()?;
        let ext = extension_of(file_name)?;
        self.grammars
            .iter()
            .find(|g| g.file_extensions.iter().any(|e| *e == ext))
    }
}

/// Everything from the first `.` to the end of the file name
pub fn extension_of(file_name: &str) -> Option<&str> {
    file_name.find('.').map(|idx| &file_name[idx..])
}

/// Pick a grammar from the built-in catalog. `None` disables highlighting.
pub fn select_grammar(path: &Path) -> Option<Grammar> {
    let grammar = GrammarCatalog::builtin().select(path).cloned();
    match &grammar {
        Some(g) => info!(grammar = g.name, path = %path.display(), "selected grammar"),
        None => info!(path = %path.display(), "no grammar, highlighting disabled"),
    }
    grammar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_first_dot() {
        assert_eq!(extension_of("main.cpp"), Some(".cpp"));
        assert_eq!(extension_of("archive.tar.gz"), Some(".tar.gz"));
        assert_eq!(extension_of("Makefile"), None);
    }

    #[test]
    fn test_select_builtin() {
        let grammar = select_grammar(Path::new("src/main.cpp")).unwrap();
        assert_eq!(grammar.name, "C++");
        assert!(select_grammar(Path::new("notes.txt")).is_none());
        assert!(select_grammar(Path::new("README")).is_none());
    }

    #[test]
    fn test_directory_dots_are_ignored() {
        assert!(select_grammar(Path::new("./build.d/main.hpp")).is_some());
    }

    #[test]
    fn test_first_registered_match_wins() {
        let mut catalog = GrammarCatalog::builtin();
        catalog.register(Grammar {
            name: "Other C",
            ..CPP.clone()
        });
        let grammar = catalog.select(Path::new("x.c")).unwrap();
        assert_eq!(grammar.name, "C++");
        assert_eq!(catalog.grammars().len(), 2);
    }

    #[test]
    fn test_registered_grammar_is_selectable() {
        let mut catalog = GrammarCatalog::builtin();
        catalog.register(Grammar {
            name: "Shell",
            file_extensions: &[".sh"],
            builtin_type_keywords: &[],
            control_keywords: &["if", "then", "fi"],
            other_keywords: &[],
            single_line_comment: Some("#"),
            multi_line_comment: None,
            string_escape: Some(b'\\'),
        });
        assert_eq!(catalog.select(Path::new("run.sh")).unwrap().name, "Shell");
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(CPP.classify(b"int"), Some(HighlightType::KeywordBuiltInType));
        assert_eq!(CPP.classify(b"while"), Some(HighlightType::KeywordControl));
        assert_eq!(CPP.classify(b"class"), Some(HighlightType::KeywordOther));
        assert_eq!(CPP.classify(b"042"), Some(HighlightType::Number));
        assert_eq!(CPP.classify(b"x1"), None);
        assert_eq!(CPP.classify(b""), None);
    }
}
