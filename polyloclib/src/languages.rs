//! Language classification by file extension.
//!
//! A [`LanguageRegistry`] maps normalized extension keys to language labels.
//! It is an ordinary value, built once and handed to the walker through
//! [`CountOptions`](crate::CountOptions), so tests can swap in a registry of
//! their own.
//!
//! Lookup keys come from [`normalize_extension`]. Only names with exactly one
//! dot are keyed by their suffix; everything else is keyed by the whole
//! lowercased file name. That means `Makefile` looks up `makefile` and
//! `archive.tar.gz` looks up `archive.tar.gz`, never `gz`.

use std::collections::HashMap;

/// Built-in extension table, sorted by key. One entry per key.
const DEFAULT_LANGUAGES: &[(&str, &str)] = &[
    ("4th", "Forth"),
    ("abap", "ABAP"),
    ("ada", "Ada"),
    ("adb", "Ada"),
    ("ads", "Ada"),
    ("agda", "Agda"),
    ("ahk", "AutoHotKey"),
    ("as", "ActionScript"),
    ("asa", "ASP"),
    ("asax", "ASP.NET"),
    ("ascx", "ASP.NET"),
    ("asm", "Assembly"),
    ("asmx", "ASP.NET"),
    ("asp", "ASP"),
    ("aspx", "ASP.NET"),
    ("bash", "BASH"),
    ("bat", "Batch"),
    ("btm", "Batch"),
    ("c", "C"),
    ("c++", "C++"),
    ("cabal", "Cabal"),
    ("cassius", "Cassius"),
    ("cbl", "COBOL"),
    ("cc", "C++"),
    ("ccp", "COBOL"),
    ("ceylon", "Ceylon"),
    ("cfc", "ColdFusion CFScript"),
    ("cfm", "ColdFusion"),
    ("ckt", "Spice Netlist"),
    ("clj", "Clojure"),
    ("cljs", "ClojureScript"),
    ("cmake", "CMake"),
    ("cmd", "Batch"),
    ("cob", "COBOL"),
    ("cobol", "COBOL"),
    ("coffee", "CoffeeScript"),
    ("cogent", "Cogent"),
    ("comp", "GLSL"),
    ("cpp", "C++"),
    ("cpy", "COBOL"),
    ("cr", "Crystal"),
    ("cs", "C#"),
    ("csh", "C Shell"),
    ("cshtml", "Razor"),
    ("csproj", "MSBuild"),
    ("css", "CSS"),
    ("cxx", "C++"),
    ("d", "D"),
    ("dart", "Dart"),
    ("def", "Module-Definition"),
    ("dockerfile", "Dockerfile"),
    ("dockerignore", "Dockerfile"),
    ("dts", "Device Tree"),
    ("dtsi", "Device Tree"),
    ("e", "Specman e"),
    ("e4", "Forth"),
    ("ec", "C"),
    ("ede", "Emacs Dev Env"),
    ("el", "Emacs Lisp"),
    ("elm", "Elm"),
    ("erl", "Erlang"),
    ("ex", "Elixir"),
    ("exs", "Elixir"),
    ("f", "FORTRAN Legacy"),
    ("f03", "FORTRAN Modern"),
    ("f08", "FORTRAN Modern"),
    ("f77", "FORTRAN Legacy"),
    ("f83", "Forth"),
    ("f90", "FORTRAN Modern"),
    ("f95", "FORTRAN Modern"),
    ("fb", "Forth"),
    ("fish", "Fish"),
    ("for", "FORTRAN Legacy"),
    ("forth", "Forth"),
    ("fpm", "Forth"),
    ("fr", "Forth"),
    ("frag", "GLSL"),
    ("frt", "Forth"),
    ("fs", "F#"),
    ("fsi", "F#"),
    ("fsproj", "MSBuild"),
    ("fsscript", "F#"),
    ("fst", "F*"),
    ("fsx", "F#"),
    ("ft", "Forth"),
    ("fth", "Forth"),
    ("ftn", "FORTRAN Legacy"),
    ("gd", "GDScript"),
    ("geom", "GLSL"),
    ("go", "Go"),
    ("groovy", "Groovy"),
    ("grt", "Groovy"),
    ("gtpl", "Groovy"),
    ("gvy", "Groovy"),
    ("h", "C Header"),
    ("hamlet", "Hamlet"),
    ("handlebars", "Handlebars"),
    ("hbs", "Handlebars"),
    ("hex", "HEX"),
    ("hh", "C++ Header"),
    ("hlean", "Lean"),
    ("hpp", "C++ Header"),
    ("hrl", "Erlang"),
    ("hs", "Haskell"),
    ("htm", "HTML"),
    ("html", "HTML"),
    ("hx", "Haxe"),
    ("hxx", "C++ Header"),
    ("idr", "Idris"),
    ("ihex", "Intel HEX"),
    ("in", "Autoconf"),
    ("inl", "C++ Header"),
    ("ipp", "C++ Header"),
    ("irunargs", "Verilog Args File"),
    ("jai", "JAI"),
    ("java", "Java"),
    ("jl", "Julia"),
    ("js", "JavaScript"),
    ("json", "JSON"),
    ("jsx", "JSX"),
    ("julius", "Julius"),
    ("kt", "Kotlin"),
    ("kts", "Kotlin"),
    ("lds", "LD Script"),
    ("lean", "Lean"),
    ("less", "LESS"),
    ("lidr", "Idris"),
    ("lisp", "Lisp"),
    ("lsp", "Lisp"),
    ("lua", "Lua"),
    ("lucius", "Lucius"),
    ("ly", "Happy"),
    ("m", "Objective C"),
    ("mad", "Madlang"),
    ("mak", "Makefile"),
    ("makefile", "Makefile"),
    ("markdown", "Markdown"),
    ("master", "ASP.NET"),
    ("md", "Markdown"),
    ("mk", "Makefile"),
    ("ml", "OCaml"),
    ("mli", "OCaml"),
    ("mm", "Objective C++"),
    ("mustache", "Mustache"),
    ("nb", "Wolfram"),
    ("nim", "Nim"),
    ("nix", "Nix"),
    ("org", "Org"),
    ("oz", "Oz"),
    ("p", "Prolog"),
    ("pad", "Ada"),
    ("pas", "Pascal"),
    ("pcc", "C++"),
    ("pde", "Processing"),
    ("pfo", "FORTRAN Legacy"),
    ("pgc", "C"),
    ("php", "PHP"),
    ("pl", "Perl"),
    ("pm", "Perl"),
    ("polly", "Polly"),
    ("pro", "Prolog"),
    ("props", "MSBuild"),
    ("proto", "Protocol Buffers"),
    ("psl", "PSL Assertion"),
    ("purs", "PureScript"),
    ("py", "Python"),
    ("qcl", "QCL"),
    ("qml", "QML"),
    ("r", "R"),
    ("rake", "Rakefile"),
    ("rb", "Ruby"),
    ("rhtml", "Ruby HTML"),
    ("rs", "Rust"),
    ("rst", "ReStructuredText"),
    ("rx", "Forth"),
    ("s", "Assembly"),
    ("sass", "Sass"),
    ("sc", "Scala"),
    ("scala", "Scala"),
    ("scm", "Scheme"),
    ("scss", "Sass"),
    ("sh", "Shell"),
    ("sitemap", "ASP.NET"),
    ("sml", "Standard ML (SML)"),
    ("sql", "SQL"),
    ("srt", "SRecode Template"),
    ("ss", "Scheme"),
    ("sty", "TeX"),
    ("sv", "SystemVerilog"),
    ("svg", "SVG"),
    ("svh", "SystemVerilog"),
    ("swift", "Swift"),
    ("targets", "MSBuild"),
    ("tcl", "TCL"),
    ("tesc", "GLSL"),
    ("tese", "GLSL"),
    ("tex", "TeX"),
    ("text", "Plain Text"),
    ("thy", "Isabelle"),
    ("toml", "TOML"),
    ("ts", "TypeScript"),
    ("tsx", "TypeScript"),
    ("txt", "Plain Text"),
    ("uc", "Unreal Script"),
    ("uci", "Unreal Script"),
    ("upkg", "Unreal Script"),
    ("ur", "Ur/Web"),
    ("urp", "Ur/Web Project"),
    ("urs", "Ur/Web"),
    ("v", "Coq"),
    ("vala", "Vala"),
    ("vb", "Visual Basic"),
    ("vbproj", "MSBuild"),
    ("vert", "GLSL"),
    ("vg", "Verilog"),
    ("vh", "Verilog"),
    ("vhd", "VHDL"),
    ("vim", "Vim Script"),
    ("vue", "Vue"),
    ("webinfo", "ASP.NET"),
    ("wl", "Wolfram"),
    ("x", "Alex"),
    ("xaml", "XAML"),
    ("xml", "XML"),
    ("xrunargs", "Verilog Args File"),
    ("xtend", "Xtend"),
    ("y", "Happy"),
    ("yaml", "YAML"),
    ("yml", "YAML"),
    ("zsh", "Zsh"),
];

/// Compute the lookup key for a file name.
///
/// ```rust
/// use polyloclib::normalize_extension;
///
/// assert_eq!(normalize_extension("Main.GO"), "go");
/// assert_eq!(normalize_extension("Makefile"), "makefile");
/// assert_eq!(normalize_extension("archive.tar.gz"), "archive.tar.gz");
/// ```
pub fn normalize_extension(file_name: &str) -> String {
    let lower = file_name.to_lowercase();

    if lower.matches('.').count() == 1 {
        if let Some((_, suffix)) = lower.rsplit_once('.') {
            if !suffix.is_empty() {
                return suffix.to_string();
            }
        }
    }

    lower
}

/// Extension key to language label mapping.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    by_key: HashMap<String, String>,
}

impl LanguageRegistry {
    /// Create an empty registry that classifies nothing.
    pub fn new() -> Self {
        Self {
            by_key: HashMap::new(),
        }
    }

    /// Create a registry loaded with the built-in table.
    pub fn with_defaults() -> Self {
        let mut registry = Self {
            by_key: HashMap::with_capacity(DEFAULT_LANGUAGES.len()),
        };
        for (key, language) in DEFAULT_LANGUAGES {
            registry.register(key, language);
        }
        registry
    }

    /// Map an extension key to a language.
    ///
    /// The key is lowercased. The first registration of a key wins: a later
    /// call with the same key leaves the mapping alone and returns `false`.
    pub fn register(&mut self, key: &str, language: &str) -> bool {
        let key = key.to_lowercase();
        if self.by_key.contains_key(&key) {
            return false;
        }
        self.by_key.insert(key, language.to_string());
        true
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, key: &str, language: &str) -> Self {
        self.register(key, language);
        self
    }

    /// Look up an already normalized key.
    pub fn language_for(&self, key: &str) -> Option<&str> {
        self.by_key.get(key).map(String::as_str)
    }

    /// Classify a file name, returning its lookup key and language.
    pub fn classify(&self, file_name: &str) -> Option<(String, &str)> {
        let key = normalize_extension(file_name);
        let language = self.language_for(&key)?;
        Some((key, language))
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Whether no keys are registered.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
