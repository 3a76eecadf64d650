//! Terminal prompts for destructive commands

use std::io::{self, BufRead, IsTerminal, Write};

use crate::error::Result;

pub fn is_stdin_tty() -> bool {
    io::stdin().is_terminal()
}

/// Ask a yes/no question on stdout and read the answer from stdin.
pub fn confirm(prompt: &str) -> Result<bool> {
    let stdin = io::stdin();
    confirm_with(&mut stdin.lock(), &mut io::stdout(), prompt)
}

/// `y` or `yes` in any case confirms; anything else, including end of
/// input, declines.
pub fn confirm_with(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> Result<bool> {
    write!(output, "{prompt}? [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(text: &str) -> bool {
        let mut out = Vec::new();
        confirm_with(&mut text.as_bytes(), &mut out, "Delete user 4").unwrap()
    }

    #[test]
    fn test_confirm_accepts_yes() {
        assert!(answer("y\n"));
        assert!(answer("YES\n"));
        assert!(answer("  Yes  \n"));
    }

    #[test]
    fn test_confirm_declines_by_default() {
        assert!(!answer("\n"));
        assert!(!answer("n\n"));
        assert!(!answer("sure\n"));
        assert!(!answer(""));
    }

    #[test]
    fn test_prompt_written() {
        let mut out = Vec::new();
        confirm_with(&mut "n\n".as_bytes(), &mut out, "Delete blog post 3").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Delete blog post 3? [y/N] ");
    }
}
