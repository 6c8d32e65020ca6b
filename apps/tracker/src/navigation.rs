use std::io::Write;

use client_core::Navigator;
use tracing::warn;

/// Prints where an opened issue lives instead of switching pages.
pub struct TerminalNavigator<W: Write> {
    detail_base_url: Option<String>,
    out: W,
}

impl<W: Write> TerminalNavigator<W> {
    pub fn new(detail_base_url: Option<String>, out: W) -> Self {
        Self {
            detail_base_url,
            out,
        }
    }

    pub fn target(&self, route: &str) -> String {
        match &self.detail_base_url {
            Some(base) => format!("{}{route}", base.trim_end_matches('/')),
            None => route.to_string(),
        }
    }
}

impl<W: Write> Navigator for TerminalNavigator<W> {
    fn navigate(&mut self, route: &str) {
        let target = self.target(route);
        if let Err(err) = writeln!(self.out, "Opening {target}") {
            warn!(error = %err, %target, "failed to print navigation target");
        }
    }
}
