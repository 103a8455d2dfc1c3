// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Join surface backed by a text stream.

use std::io::Write;

use defense_queue::{JoinSurface, StatusLine};
use tracing::debug;

/// Writes status lines and form updates to a stream, one per line.
///
/// Empty status text is not printed. Write failures are logged at debug
/// level and otherwise ignored.
#[derive(Debug)]
pub struct TerminalSurface<W: Write> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    /// Creates a surface writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the surface and returns the stream.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            debug!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write> StatusLine for TerminalSurface<W> {
    fn set_status(&mut self, text: &str) {
        if !text.is_empty() {
            self.line(text);
        }
    }
}

impl<W: Write> JoinSurface for TerminalSurface<W> {
    fn set_region_text(&mut self, region: &str) {
        self.line(&format!("Region: {region}"));
    }

    fn set_fias_code(&mut self, fias_code: &str) {
        if !fias_code.is_empty() {
            self.line(&format!("Area code: {fias_code}"));
        }
    }

    fn show_picker(&mut self, options: &[String]) -> bool {
        for (index, option) in options.iter().enumerate() {
            self.line(&format!("  {}. {option}", index + 1));
        }
        true
    }
}
