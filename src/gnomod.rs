use std::path::Path;
use anyhow::{Context, Result};
use thiserror::Error;

/// File name of the module manifest inside a project directory.
pub const GNO_MOD_FILE: &str = "gno.mod";

/// The parts of a `gno.mod` file this tool cares about.
///
/// The file follows the line-oriented module-file grammar: one directive per
/// line, `//` comments, and parenthesised blocks grouping entries of one directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GnoMod {
    /// The declared module path (e.g. `gno.land/p/demo/avl`).
    pub module: String,
    /// Language version from a `go` or `gno` directive, if present.
    pub gno_version: Option<String>,
}

/// Errors produced while parsing a `gno.mod` file. Line numbers are 1-based.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GnoModError {
    #[error("gno.mod:{line}: unknown directive: {directive}")]
    UnknownDirective { line: usize, directive: String },
    #[error("gno.mod:{line}: usage: {usage}")]
    Usage { line: usize, usage: &'static str },
    #[error("gno.mod:{line}: repeated {directive} statement")]
    Repeated { line: usize, directive: String },
    #[error("gno.mod:{line}: unterminated block")]
    UnterminatedBlock { line: usize },
    #[error("gno.mod:{line}: unexpected ')'")]
    UnexpectedClose { line: usize },
    #[error("gno.mod:{line}: unterminated quoted string")]
    UnterminatedString { line: usize },
    #[error("gno.mod: no module declaration")]
    MissingModule,
}

const DIRECTIVES: [&str; 9] = [
    "module", "go", "gno", "toolchain", "godebug", "require", "exclude", "replace", "retract",
];

impl GnoMod {
    /// Parses the text of a `gno.mod` file.
    ///
    /// Any directive may be written once per line or grouped in a
    /// `directive (` ... `)` block, one entry per line.
    ///
    /// # Errors
    /// Returns a [`GnoModError`] on unknown directives, malformed `module` or
    /// version lines, unbalanced blocks, or when no module is declared.
    pub fn parse(data: &str) -> Result<GnoMod, GnoModError> {
        let mut gno_mod = GnoMod {
            module: String::new(),
            gno_version: None,
        };
        let mut has_module = false;
        // directive name and opening line of the block we are inside, if any
        let mut block: Option<(String, usize)> = None;

        for (idx, raw) in data.lines().enumerate() {
            let line = idx + 1;
            let tokens = tokenize(raw, line)?;
            if tokens.is_empty() {
                continue;
            }

            if block.is_some() && tokens.len() == 1 && tokens[0] == ")" {
                block = None;
                continue;
            }
            if let Some((directive, _)) = &block {
                gno_mod.apply(directive, &tokens, line, &mut has_module)?;
                continue;
            }

            let directive = tokens[0].as_str();
            let args = &tokens[1..];

            if directive == ")" {
                return Err(GnoModError::UnexpectedClose { line });
            }
            if !DIRECTIVES.contains(&directive) {
                return Err(GnoModError::UnknownDirective {
                    line,
                    directive: directive.to_string(),
                });
            }
            if args.len() == 1 && args[0] == "(" {
                block = Some((directive.to_string(), line));
                continue;
            }
            gno_mod.apply(directive, args, line, &mut has_module)?;
        }

        if let Some((_, line)) = block {
            return Err(GnoModError::UnterminatedBlock { line });
        }
        if !has_module {
            return Err(GnoModError::MissingModule);
        }
        Ok(gno_mod)
    }

    /// Applies one known directive with its arguments.
    fn apply(
        &mut self, directive: &str, args: &[String], line: usize, has_module: &mut bool
    ) -> Result<(), GnoModError> {
        match directive {
            "module" => {
                if *has_module {
                    return Err(GnoModError::Repeated { line, directive: directive.to_string() });
                }
                if args.len() != 1 {
                    return Err(GnoModError::Usage { line, usage: "module module/path" });
                }
                self.module = args[0].clone();
                *has_module = true;
            }
            "go" | "gno" => {
                if self.gno_version.is_some() {
                    return Err(GnoModError::Repeated { line, directive: directive.to_string() });
                }
                if args.len() != 1 {
                    return Err(GnoModError::Usage { line, usage: "gno 1.23" });
                }
                self.gno_version = Some(args[0].clone());
            }
            "toolchain" => {
                if args.len() != 1 {
                    return Err(GnoModError::Usage { line, usage: "toolchain name" });
                }
            }
            // list directives: entries are accepted as-is
            _ => {
                if args.is_empty() {
                    return Err(GnoModError::Usage { line, usage: "directive arguments..." });
                }
            }
        }
        Ok(())
    }

    /// Reads and parses `gno.mod` from `project_dir`.
    ///
    /// # Errors
    /// Returns an error if the file can't be read or doesn't parse.
    pub fn load<P: AsRef<Path>>(project_dir: P) -> Result<GnoMod> {
        let path = project_dir.as_ref().join(GNO_MOD_FILE);
        let data = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read gno.mod at {}", path.display()))?;
        let gno_mod = GnoMod::parse(&data)
            .context("Failed to parse gno.mod")?;
        Ok(gno_mod)
    }
}

/// Returns the module path declared in `<project_dir>/gno.mod`.
///
/// # Errors
/// Returns an error if the manifest is missing or malformed; no partial result is produced.
pub fn read_module_path<P: AsRef<Path>>(project_dir: P) -> Result<String> {
    let gno_mod = GnoMod::load(project_dir)?;
    log::debug!("gno.mod declares module {} (version {:?})", gno_mod.module, gno_mod.gno_version);
    Ok(gno_mod.module)
}

/// Splits one line into tokens: bare words, quoted strings and the block
/// delimiters `(` and `)`. Everything after `//` is dropped.
fn tokenize(raw: &str, line: usize) -> Result<Vec<String>, GnoModError> {
    let mut tokens = Vec::new();
    let mut chars = raw.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '/' {
            chars.next();
            if chars.peek() == Some(&'/') {
                break;
            }
            let mut word = String::from('/');
            read_word(&mut chars, &mut word);
            tokens.push(word);
            continue;
        }
        if c == '(' || c == ')' {
            chars.next();
            tokens.push(c.to_string());
            continue;
        }
        if c == '"' {
            chars.next();
            let mut value = String::new();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '"' => {
                        closed = true;
                        break;
                    }
                    '\\' => match chars.next() {
                        Some(escaped) => value.push(escaped),
                        None => break,
                    },
                    _ => value.push(c),
                }
            }
            if !closed {
                return Err(GnoModError::UnterminatedString { line });
            }
            tokens.push(value);
            continue;
        }
        let mut word = String::new();
        read_word(&mut chars, &mut word);
        tokens.push(word);
    }
    Ok(tokens)
}

fn read_word(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, word: &mut String) {
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() || c == '(' || c == ')' || c == '"' {
            break;
        }
        if c == '/' && word.ends_with('/') {
            // trailing comment glued to the word
            word.pop();
            chars.by_ref().for_each(drop);
            break;
        }
        word.push(c);
        chars.next();
    }
}
