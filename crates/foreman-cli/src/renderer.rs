//! Terminal rendering for rich markdown output.
//!
//! Wraps termimad so commands can emit markdown and let one place decide
//! how it reaches the terminal. With `--no-color` the markdown is printed
//! verbatim, which also keeps test assertions stable.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Renders markdown either richly or as plain text.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Green);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Print the given markdown to stdout.
    ///
    /// Header lines keep their hash markers so nesting stays visible;
    /// everything else goes through the termimad skin.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            for line in markdown.lines() {
                if line.starts_with('#') {
                    println!("\x1b[36m{line}\x1b[0m");
                } else {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        } else {
            print!("{markdown}");
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_renderer_is_not_rich() {
        assert!(!TerminalRenderer::new(false).rich_enabled);
    }

    #[test]
    fn default_is_rich() {
        assert!(TerminalRenderer::default().rich_enabled);
    }
}
